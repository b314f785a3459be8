use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::nav::keyboard::SelectionState;
use crate::nav::routes::MenuItem;
use crate::ui::theme::Theme;

pub struct Menu<'a> {
    pub items: &'a [MenuItem],
    pub selection: SelectionState,
    /// Item whose navigation is pending; drawn as pressed.
    pub activated: Option<usize>,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(items: &'a [MenuItem], selection: SelectionState, theme: &'a Theme) -> Self {
        Self {
            items,
            selection,
            activated: None,
            theme,
        }
    }

    pub fn activated(mut self, activated: Option<usize>) -> Self {
        self.activated = activated;
        self
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "portview",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Investment Portfolio Management",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = self.selection.selected == Some(i);
            let is_activated = self.activated == Some(i);
            let indicator = if is_activated {
                "*"
            } else if is_selected {
                ">"
            } else {
                " "
            };
            let key = item.shortcut.map(String::from).unwrap_or_default();

            let label_text = format!(" {indicator} [{key}] {label}", label = item.label);
            let desc_text = format!("     {}", item.description);

            let label_style = if item.disabled {
                Style::default()
                    .fg(colors.text_muted())
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if is_activated {
                Style::default()
                    .fg(colors.selection_fg())
                    .bg(colors.selection_bg())
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_muted()),
                )),
            ];

            let p = Paragraph::new(lines);
            if i < menu_layout.len() {
                p.render(menu_layout[i], buf);
            }
        }
    }
}
