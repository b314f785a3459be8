use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::api::ApiError;
use crate::focus::FocusTarget;
use crate::lookup::AccountLookup;
use crate::ui::components::button_span;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;
use crate::validation::{ACCOUNT_NUMBER_LEN, ValidationError};

/// Rows the form needs inside its border.
pub const FORM_HEIGHT: u16 = 9;

/// The account-number form at the top of the lookup pages.
pub struct AccountForm<'a> {
    title: &'a str,
    input: &'a LineInput,
    validation_error: Option<&'a ValidationError>,
    banner: Option<&'a ApiError>,
    loading: bool,
    /// Set once results are shown; the form collapses to a summary line.
    loaded_account: Option<&'a str>,
    focus: Option<FocusTarget>,
    theme: &'a Theme,
}

impl<'a> AccountForm<'a> {
    pub fn new<T>(
        title: &'a str,
        lookup: &'a AccountLookup<T>,
        loaded_account: Option<&'a str>,
        focus: Option<FocusTarget>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            input: &lookup.input,
            validation_error: lookup.validation_error.as_ref(),
            banner: lookup.banner.as_ref(),
            loading: lookup.is_loading(),
            loaded_account,
            focus,
            theme,
        }
    }

    fn input_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let focused = self.focus == Some(FocusTarget::AccountInput);
        let text_style = Style::default().fg(colors.fg());
        let cursor_style = Style::default()
            .fg(colors.selection_fg())
            .bg(colors.selection_bg());
        let frame_style = Style::default().fg(if focused {
            colors.border_focused()
        } else {
            colors.border()
        });

        let mut spans = vec![
            Span::styled("  Account Number: ", Style::default().fg(colors.fg())),
            Span::styled("[", frame_style),
        ];
        let mut shown = self.input.value().chars().count();
        if focused {
            let (before, at, after) = self.input.render_parts();
            if at.is_none() {
                shown += 1;
            }
            spans.push(Span::styled(before.to_string(), text_style));
            spans.push(Span::styled(at.unwrap_or(' ').to_string(), cursor_style));
            spans.push(Span::styled(after.to_string(), text_style));
        } else {
            spans.push(Span::styled(self.input.value().to_string(), text_style));
        }
        // One spare cell so the cursor fits after a full entry.
        let fill = (ACCOUNT_NUMBER_LEN + 1).saturating_sub(shown);
        spans.push(Span::styled(
            "_".repeat(fill),
            Style::default().fg(colors.text_muted()),
        ));
        spans.push(Span::styled("]", frame_style));
        Line::from(spans)
    }
}

impl Widget for AccountForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));

        let mut lines: Vec<Line> = vec![Line::from("")];

        if let Some(account) = self.loaded_account {
            lines.push(Line::from(vec![
                Span::styled("  Account: ", Style::default().fg(colors.fg())),
                Span::styled(
                    account.to_string(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                button_span(
                    "New Search",
                    self.focus == Some(FocusTarget::NewSearch),
                    self.theme,
                ),
            ]));
        } else {
            lines.push(self.input_line());
            match self.validation_error {
                Some(err) => lines.push(Line::from(Span::styled(
                    format!("  {err}"),
                    Style::default().fg(colors.error()),
                ))),
                None => lines.push(Line::from(Span::styled(
                    "  Enter a 10-digit account number (digits 1-9)",
                    Style::default().fg(colors.text_muted()),
                ))),
            }
            lines.push(Line::from(""));
            let submit = if self.loading {
                Span::styled(
                    "  Loading...",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::ITALIC),
                )
            } else {
                button_span(
                    "Search",
                    self.focus == Some(FocusTarget::Submit),
                    self.theme,
                )
            };
            lines.push(Line::from(vec![Span::raw("  "), submit]));
        }

        if let Some(err) = self.banner {
            let banner_style = Style::default().fg(colors.error()).bg(colors.error_bg());
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(format!("  Error: {err} "), banner_style),
                Span::raw(" "),
                button_span(
                    "Dismiss",
                    self.focus == Some(FocusTarget::DismissError),
                    self.theme,
                ),
            ]));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::routes::Route;
    use crate::validation::validate_account_number;

    fn render_rows(form: AccountForm) -> Vec<String> {
        let area = Rect::new(0, 0, 90, FORM_HEIGHT + 2);
        let mut buf = Buffer::empty(area);
        form.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn shows_validation_error_inline() {
        let mut lookup: AccountLookup<()> = AccountLookup::new(Route::TransactionHistory);
        lookup.validation_error = Some(ValidationError::NonNumeric);
        let theme = Theme::default();
        let rows = render_rows(AccountForm::new("Portfolio Inquiry", &lookup, None, None, &theme));
        assert!(rows
            .iter()
            .any(|r| r.contains("Account number must contain only numeric characters")));
    }

    #[test]
    fn banner_text_is_the_error_display() {
        let mut lookup: AccountLookup<()> = AccountLookup::new(Route::TransactionHistory);
        lookup.banner = Some(ApiError::Rejected {
            status: 400,
            detail: "Account not found".to_string(),
        });
        let theme = Theme::default();
        let rows = render_rows(AccountForm::new("Portfolio Inquiry", &lookup, None, None, &theme));
        assert!(rows.iter().any(|r| r.contains("Error: Account not found")));
        assert!(rows.iter().any(|r| r.contains("[ Dismiss ]")));
    }

    #[test]
    fn loading_replaces_search_button() {
        let mut lookup: AccountLookup<()> = AccountLookup::new(Route::TransactionHistory);
        lookup.begin(1, validate_account_number("1234567899").unwrap());
        let theme = Theme::default();
        let rows = render_rows(AccountForm::new("Portfolio Inquiry", &lookup, None, None, &theme));
        assert!(rows.iter().any(|r| r.contains("Loading...")));
        assert!(!rows.iter().any(|r| r.contains("[ Search ]")));
    }
}
