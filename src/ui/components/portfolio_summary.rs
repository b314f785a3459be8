use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, Widget};

use crate::api::schema::PortfolioSummary;
use crate::format::{format_currency, format_gain_loss, format_last_updated, format_number};
use crate::ui::layout::LayoutTier;
use crate::ui::theme::Theme;

const CURRENCY: &str = "USD";

pub struct PortfolioView<'a> {
    summary: &'a PortfolioSummary,
    tier: LayoutTier,
    theme: &'a Theme,
}

impl<'a> PortfolioView<'a> {
    pub fn new(summary: &'a PortfolioSummary, tier: LayoutTier, theme: &'a Theme) -> Self {
        Self {
            summary,
            tier,
            theme,
        }
    }
}

impl Widget for PortfolioView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let summary = self.summary;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(area);

        let (gain_text, tone) = format_gain_loss(
            summary.total_gain_loss,
            summary.total_gain_loss_percent,
            CURRENCY,
        );
        let label = Style::default().fg(colors.text_muted());
        let totals = vec![
            Line::from(vec![
                Span::styled("  Total Value:    ", label),
                Span::styled(
                    format_currency(summary.total_value, CURRENCY),
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Gain/Loss:      ", label),
                Span::styled(gain_text, Style::default().fg(colors.tone(tone))),
            ]),
            Line::from(vec![
                Span::styled("  Last Updated:   ", label),
                Span::styled(
                    format_last_updated(&summary.last_updated),
                    Style::default().fg(colors.fg()),
                ),
            ]),
        ];
        Paragraph::new(totals)
            .block(
                Block::bordered()
                    .title(" Summary ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(layout[0], buf);

        let show_names = self.tier.show_names();
        let mut header = vec!["Symbol"];
        if show_names {
            header.push("Name");
        }
        header.extend(["Shares", "Price", "Market Value", "Gain/Loss"]);

        let rows: Vec<Row> = summary
            .holdings
            .iter()
            .map(|h| {
                let (gain, tone) = format_gain_loss(h.gain_loss, h.gain_loss_percent, CURRENCY);
                let mut cells = vec![Cell::from(h.symbol.clone())];
                if show_names {
                    cells.push(Cell::from(h.name.clone()));
                }
                cells.extend([
                    Cell::from(format_number(h.shares, 0)),
                    Cell::from(format_currency(h.current_price, CURRENCY)),
                    Cell::from(format_currency(h.market_value, CURRENCY)),
                    Cell::from(gain).style(Style::default().fg(colors.tone(tone))),
                ]);
                Row::new(cells).style(Style::default().fg(colors.fg()))
            })
            .collect();

        let widths: Vec<Constraint> = if show_names {
            vec![
                Constraint::Length(8),
                Constraint::Min(20),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(22),
            ]
        } else {
            vec![
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Min(10),
            ]
        };

        let title = format!(" Holdings ({}) ", summary.holdings.len());
        let table = Table::new(rows, widths)
            .header(
                Row::new(header).style(
                    Style::default()
                        .fg(colors.header_fg())
                        .bg(colors.header_bg())
                        .add_modifier(Modifier::BOLD),
                ),
            )
            .column_spacing(1)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(colors.border())),
            );
        Widget::render(table, layout[1], buf);
    }
}
