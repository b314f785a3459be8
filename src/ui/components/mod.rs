pub mod account_form;
pub mod confirm_dialog;
pub mod info_page;
pub mod menu;
pub mod portfolio_summary;
pub mod transaction_list;

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::ui::theme::Theme;

/// `[ Label ]`, inverted when focused.
pub fn button_span<'a>(label: &str, focused: bool, theme: &Theme) -> Span<'a> {
    let colors = &theme.colors;
    let style = if focused {
        Style::default()
            .fg(colors.selection_fg())
            .bg(colors.selection_bg())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.accent())
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Link text, underlined; inverted when focused.
pub fn link_span<'a>(label: &str, focused: bool, theme: &Theme) -> Span<'a> {
    let colors = &theme.colors;
    let style = if focused {
        Style::default()
            .fg(colors.selection_fg())
            .bg(colors.selection_bg())
    } else {
        Style::default().fg(colors.accent())
    };
    Span::styled(label.to_string(), style.add_modifier(Modifier::UNDERLINED))
}
