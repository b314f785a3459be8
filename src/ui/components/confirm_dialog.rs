use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::focus::{self, FocusNode, FocusTarget, trap::FocusTrap};
use crate::nav::routes::Action;
use crate::ui::components::button_span;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still open; the key was swallowed.
    Pending,
    Confirmed(Action),
    Cancelled(Action),
}

/// Modal yes/no prompt.
///
/// Opening captures the element that had focus and traps Tab inside the
/// two buttons; closing gives the captured focus back.
#[derive(Clone, Debug, Default)]
pub struct ConfirmationDialog {
    is_open: bool,
    title: String,
    message: String,
    on_confirm: Option<Action>,
    on_cancel: Option<Action>,
    previous_focus: Option<FocusTarget>,
    trap: Option<FocusTrap>,
}

impl ConfirmationDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Cancel comes first so it receives initial focus.
    pub fn nodes() -> [FocusNode; 2] {
        [
            FocusNode::button(FocusTarget::DialogCancel),
            FocusNode::button(FocusTarget::DialogConfirm),
        ]
    }

    pub fn open(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: Action,
        on_cancel: Action,
        focus: &mut Option<FocusTarget>,
    ) {
        if self.is_open {
            return;
        }
        self.title = title.into();
        self.message = message.into();
        self.on_confirm = Some(on_confirm);
        self.on_cancel = Some(on_cancel);
        self.previous_focus = *focus;
        self.trap = Some(FocusTrap::acquire(&Self::nodes(), focus));
        self.is_open = true;
        tracing::debug!(title = %self.title, "confirmation dialog opened");
    }

    pub fn close(&mut self, focus: &mut Option<FocusTarget>) {
        if !self.is_open {
            return;
        }
        if let Some(trap) = self.trap.take() {
            trap.release();
        }
        *focus = self.previous_focus.take();
        self.is_open = false;
        tracing::debug!(title = %self.title, "confirmation dialog closed");
    }

    fn confirm(&mut self, focus: &mut Option<FocusTarget>) -> DialogOutcome {
        let action = self.on_confirm.unwrap_or(Action::Noop);
        self.close(focus);
        DialogOutcome::Confirmed(action)
    }

    fn cancel(&mut self, focus: &mut Option<FocusTarget>) -> DialogOutcome {
        let action = self.on_cancel.unwrap_or(Action::Noop);
        self.close(focus);
        DialogOutcome::Cancelled(action)
    }

    pub fn handle_key(&mut self, key: KeyEvent, focus: &mut Option<FocusTarget>) -> DialogOutcome {
        if !self.is_open {
            return DialogOutcome::Pending;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => self.cancel(focus),
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm(focus),
            KeyCode::Tab | KeyCode::BackTab => {
                let trapped = self
                    .trap
                    .as_ref()
                    .is_some_and(|trap| trap.handle_key(key, focus));
                if !trapped {
                    let reverse = key.code == KeyCode::BackTab
                        || key.modifiers.contains(KeyModifiers::SHIFT);
                    *focus = focus::cycle(&Self::nodes(), *focus, reverse);
                }
                DialogOutcome::Pending
            }
            KeyCode::Left | KeyCode::Right => {
                *focus = focus::cycle(&Self::nodes(), *focus, key.code == KeyCode::Left);
                DialogOutcome::Pending
            }
            KeyCode::Enter | KeyCode::Char(' ') => match *focus {
                Some(FocusTarget::DialogConfirm) => self.confirm(focus),
                Some(FocusTarget::DialogCancel) => self.cancel(focus),
                _ => DialogOutcome::Pending,
            },
            _ => DialogOutcome::Pending,
        }
    }
}

pub struct ConfirmDialogView<'a> {
    dialog: &'a ConfirmationDialog,
    focus: Option<FocusTarget>,
    theme: &'a Theme,
}

impl<'a> ConfirmDialogView<'a> {
    pub fn new(dialog: &'a ConfirmationDialog, focus: Option<FocusTarget>, theme: &'a Theme) -> Self {
        Self {
            dialog,
            focus,
            theme,
        }
    }
}

impl Widget for ConfirmDialogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.dialog.is_open() {
            return;
        }
        let colors = &self.theme.colors;
        let dialog_area = centered_rect(40, 30, 44, 8, area);

        Clear.render(dialog_area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.dialog.title()))
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(2),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Span::styled(
            self.dialog.message(),
            Style::default().fg(colors.fg()),
        ))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let buttons = Line::from(vec![
            button_span(
                "Cancel",
                self.focus == Some(FocusTarget::DialogCancel),
                self.theme,
            ),
            Span::raw("   "),
            button_span(
                "Confirm",
                self.focus == Some(FocusTarget::DialogConfirm),
                self.theme,
            ),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        Paragraph::new(Span::styled(
            "[y] Confirm  [n/Esc] Cancel  [Tab] Switch",
            Style::default().fg(colors.text_muted()),
        ))
        .alignment(Alignment::Center)
        .render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open_exit(dialog: &mut ConfirmationDialog, focus: &mut Option<FocusTarget>) {
        dialog.open(
            "Exit Application",
            "Are you sure you want to exit the application?",
            Action::Quit,
            Action::Noop,
            focus,
        );
    }

    #[test]
    fn open_focuses_cancel_and_cancel_restores_focus() {
        let mut dialog = ConfirmationDialog::new();
        let mut focus = Some(FocusTarget::MenuItem(6));
        open_exit(&mut dialog, &mut focus);
        assert!(dialog.is_open());
        assert_eq!(focus, Some(FocusTarget::DialogCancel));

        let outcome = dialog.handle_key(key(KeyCode::Esc), &mut focus);
        assert_eq!(outcome, DialogOutcome::Cancelled(Action::Noop));
        assert!(!dialog.is_open());
        assert_eq!(focus, Some(FocusTarget::MenuItem(6)));
    }

    #[test]
    fn tab_stays_inside_dialog() {
        let mut dialog = ConfirmationDialog::new();
        let mut focus = None;
        open_exit(&mut dialog, &mut focus);

        dialog.handle_key(key(KeyCode::Tab), &mut focus);
        assert_eq!(focus, Some(FocusTarget::DialogConfirm));
        dialog.handle_key(key(KeyCode::Tab), &mut focus);
        assert_eq!(focus, Some(FocusTarget::DialogCancel));
        dialog.handle_key(key(KeyCode::BackTab), &mut focus);
        assert_eq!(focus, Some(FocusTarget::DialogConfirm));
    }

    #[test]
    fn enter_on_confirm_returns_confirm_action() {
        let mut dialog = ConfirmationDialog::new();
        let mut focus = Some(FocusTarget::MenuItem(6));
        open_exit(&mut dialog, &mut focus);
        dialog.handle_key(key(KeyCode::Right), &mut focus);
        let outcome = dialog.handle_key(key(KeyCode::Enter), &mut focus);
        assert_eq!(outcome, DialogOutcome::Confirmed(Action::Quit));
        assert_eq!(focus, Some(FocusTarget::MenuItem(6)));
    }

    #[test]
    fn other_keys_are_swallowed() {
        let mut dialog = ConfirmationDialog::new();
        let mut focus = None;
        open_exit(&mut dialog, &mut focus);
        assert_eq!(
            dialog.handle_key(key(KeyCode::Char('3')), &mut focus),
            DialogOutcome::Pending
        );
        assert!(dialog.is_open());
        assert_eq!(focus, Some(FocusTarget::DialogCancel));
    }

    #[test]
    fn reopening_recaptures_focus() {
        let mut dialog = ConfirmationDialog::new();
        let mut focus = Some(FocusTarget::MenuItem(1));
        open_exit(&mut dialog, &mut focus);
        dialog.handle_key(key(KeyCode::Char('n')), &mut focus);
        assert_eq!(focus, Some(FocusTarget::MenuItem(1)));

        focus = None;
        open_exit(&mut dialog, &mut focus);
        assert_eq!(
            dialog.handle_key(key(KeyCode::Char('y')), &mut focus),
            DialogOutcome::Confirmed(Action::Quit)
        );
        assert_eq!(focus, None);
    }
}
