use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ApiError;
use crate::focus::{self, FocusNode, FocusTarget};
use crate::nav::routes::Route;
use crate::ui::line_input::{InputResult, LineInput};
use crate::validation::{ACCOUNT_NUMBER_LEN, AccountNumber, ValidationError, validate_account_number};

#[derive(Clone, Debug, PartialEq)]
pub enum LookupStatus<T> {
    Idle,
    Loading {
        request_id: u64,
        account: AccountNumber,
    },
    Loaded(T),
}

/// What the page asks the app to do after a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupCommand {
    Handled,
    /// Not consumed; the app may hand it to global navigation.
    Propagate,
    Submit(AccountNumber),
    Navigate(Route),
}

/// State of an account-number form page (portfolio inquiry, transaction history).
#[derive(Clone, Debug)]
pub struct AccountLookup<T> {
    pub input: LineInput,
    pub validation_error: Option<ValidationError>,
    /// Dismissible error from the last request.
    pub banner: Option<ApiError>,
    pub status: LookupStatus<T>,
    link: Route,
}

fn is_backward(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab || key.modifiers.contains(KeyModifiers::SHIFT)
}

impl<T> AccountLookup<T> {
    /// `link` is the sibling page offered next to "Back".
    pub fn new(link: Route) -> Self {
        Self {
            input: LineInput::new("").with_max_len(ACCOUNT_NUMBER_LEN),
            validation_error: None,
            banner: None,
            status: LookupStatus::Idle,
            link,
        }
    }

    pub fn link(&self) -> Route {
        self.link
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LookupStatus::Loading { .. })
    }

    pub fn loaded(&self) -> Option<&T> {
        match &self.status {
            LookupStatus::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn initial_focus(&self) -> Option<FocusTarget> {
        Some(FocusTarget::AccountInput)
    }

    pub fn focus_nodes(&self) -> Vec<FocusNode> {
        let mut nodes = Vec::with_capacity(5);
        if self.loaded().is_some() {
            nodes.push(FocusNode::button(FocusTarget::NewSearch));
        } else {
            nodes.push(FocusNode::text_input(FocusTarget::AccountInput));
            nodes.push(FocusNode::button(FocusTarget::Submit));
        }
        if self.banner.is_some() {
            nodes.push(FocusNode::button(FocusTarget::DismissError));
        }
        nodes.push(FocusNode::button(FocusTarget::Back));
        nodes.push(FocusNode::link(self.link));
        nodes
    }

    pub fn submit(&mut self) -> LookupCommand {
        if self.is_loading() {
            return LookupCommand::Handled;
        }
        match validate_account_number(self.input.value()) {
            Ok(account) => {
                self.validation_error = None;
                self.banner = None;
                LookupCommand::Submit(account)
            }
            Err(err) => {
                self.validation_error = Some(err);
                LookupCommand::Handled
            }
        }
    }

    pub fn begin(&mut self, request_id: u64, account: AccountNumber) {
        self.status = LookupStatus::Loading {
            request_id,
            account,
        };
    }

    /// Applies a response. Returns false (and changes nothing) when the
    /// response belongs to a request this page no longer waits for.
    pub fn finish(&mut self, request_id: u64, result: Result<T, ApiError>) -> bool {
        match &self.status {
            LookupStatus::Loading {
                request_id: pending,
                ..
            } if *pending == request_id => {}
            _ => return false,
        }
        match result {
            Ok(value) => {
                self.banner = None;
                self.status = LookupStatus::Loaded(value);
            }
            Err(err) => {
                self.banner = Some(err);
                self.status = LookupStatus::Idle;
            }
        }
        true
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn new_search(&mut self) {
        self.input.clear();
        self.validation_error = None;
        self.banner = None;
        self.status = LookupStatus::Idle;
    }

    /// Keys while the account field has focus.
    pub fn handle_field_key(
        &mut self,
        key: KeyEvent,
        focus: &mut Option<FocusTarget>,
    ) -> LookupCommand {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            *focus = focus::cycle(&self.focus_nodes(), *focus, is_backward(&key));
            return LookupCommand::Handled;
        }
        match self.input.handle(key) {
            InputResult::Continue => LookupCommand::Handled,
            InputResult::Submit => self.submit(),
            InputResult::Cancel => {
                // Blur; a second Escape is then free to leave the page.
                *focus = None;
                LookupCommand::Handled
            }
        }
    }

    /// Keys while focus is on a button, a link, or nothing.
    pub fn handle_key(&mut self, key: KeyEvent, focus: &mut Option<FocusTarget>) -> LookupCommand {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                *focus = focus::cycle(&self.focus_nodes(), *focus, is_backward(&key));
                LookupCommand::Handled
            }
            KeyCode::Enter | KeyCode::Char(' ') => match *focus {
                Some(FocusTarget::Submit) => self.submit(),
                Some(FocusTarget::NewSearch) => {
                    self.new_search();
                    *focus = Some(FocusTarget::AccountInput);
                    LookupCommand::Handled
                }
                Some(FocusTarget::DismissError) => {
                    self.dismiss_banner();
                    *focus = Some(FocusTarget::AccountInput);
                    LookupCommand::Handled
                }
                Some(FocusTarget::Back) => LookupCommand::Navigate(Route::MainMenu),
                Some(FocusTarget::Link(route)) => LookupCommand::Navigate(route),
                _ => LookupCommand::Propagate,
            },
            KeyCode::Char('d') if self.banner.is_some() => {
                self.dismiss_banner();
                if *focus == Some(FocusTarget::DismissError) {
                    *focus = None;
                }
                LookupCommand::Handled
            }
            KeyCode::Char('n') if self.loaded().is_some() => {
                self.new_search();
                *focus = Some(FocusTarget::AccountInput);
                LookupCommand::Handled
            }
            KeyCode::Char('i') if self.loaded().is_none() => {
                *focus = Some(FocusTarget::AccountInput);
                LookupCommand::Handled
            }
            _ => LookupCommand::Propagate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Lookup = AccountLookup<&'static str>;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(lookup: &mut Lookup, focus: &mut Option<FocusTarget>, s: &str) {
        for ch in s.chars() {
            lookup.handle_field_key(key(KeyCode::Char(ch)), focus);
        }
    }

    fn account(raw: &str) -> AccountNumber {
        validate_account_number(raw).unwrap()
    }

    #[test]
    fn invalid_submit_shows_inline_error() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        let mut focus = lookup.initial_focus();
        type_str(&mut lookup, &mut focus, "12345");
        let cmd = lookup.handle_field_key(key(KeyCode::Enter), &mut focus);
        assert_eq!(cmd, LookupCommand::Handled);
        assert_eq!(lookup.validation_error, Some(ValidationError::WrongLength));

        lookup.new_search();
        type_str(&mut lookup, &mut focus, "1234567890");
        lookup.handle_field_key(key(KeyCode::Enter), &mut focus);
        assert_eq!(lookup.validation_error, Some(ValidationError::ContainsZero));
    }

    #[test]
    fn valid_submit_requests_lookup() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        let mut focus = lookup.initial_focus();
        type_str(&mut lookup, &mut focus, "1234567899");
        let cmd = lookup.handle_field_key(key(KeyCode::Enter), &mut focus);
        assert_eq!(cmd, LookupCommand::Submit(account("1234567899")));
        assert_eq!(lookup.validation_error, None);
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        lookup.begin(2, account("1234567899"));
        assert!(!lookup.finish(1, Ok("old")));
        assert!(lookup.is_loading());
        assert!(lookup.finish(2, Ok("fresh")));
        assert_eq!(lookup.loaded(), Some(&"fresh"));
        assert!(!lookup.finish(2, Ok("duplicate")));
    }

    #[test]
    fn failure_sets_banner_and_returns_to_form() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        lookup.begin(1, account("1234567899"));
        lookup.finish(1, Err(ApiError::Connectivity));
        assert_eq!(lookup.status, LookupStatus::Idle);
        assert_eq!(lookup.banner, Some(ApiError::Connectivity));
        assert!(lookup
            .focus_nodes()
            .iter()
            .any(|n| n.target == FocusTarget::DismissError));

        let mut focus = Some(FocusTarget::DismissError);
        lookup.handle_key(key(KeyCode::Enter), &mut focus);
        assert_eq!(lookup.banner, None);
        assert_eq!(focus, Some(FocusTarget::AccountInput));
    }

    #[test]
    fn submit_while_loading_is_ignored() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        lookup.begin(1, account("1234567899"));
        assert_eq!(lookup.submit(), LookupCommand::Handled);
    }

    #[test]
    fn escape_in_field_blurs_without_propagating() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        let mut focus = lookup.initial_focus();
        let cmd = lookup.handle_field_key(key(KeyCode::Esc), &mut focus);
        assert_eq!(cmd, LookupCommand::Handled);
        assert_eq!(focus, None);

        // Unfocused, Escape is left for the app.
        assert_eq!(
            lookup.handle_key(key(KeyCode::Esc), &mut focus),
            LookupCommand::Propagate
        );
    }

    #[test]
    fn tab_walks_form_then_buttons_then_link() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        let mut focus = lookup.initial_focus();
        lookup.handle_field_key(key(KeyCode::Tab), &mut focus);
        assert_eq!(focus, Some(FocusTarget::Submit));
        lookup.handle_key(key(KeyCode::Tab), &mut focus);
        assert_eq!(focus, Some(FocusTarget::Back));
        lookup.handle_key(key(KeyCode::Tab), &mut focus);
        assert_eq!(focus, Some(FocusTarget::Link(Route::TransactionHistory)));
        assert_eq!(
            lookup.handle_key(key(KeyCode::Enter), &mut focus),
            LookupCommand::Navigate(Route::TransactionHistory)
        );
        lookup.handle_key(key(KeyCode::Tab), &mut focus);
        assert_eq!(focus, Some(FocusTarget::AccountInput));
    }

    #[test]
    fn new_search_after_results() {
        let mut lookup = Lookup::new(Route::TransactionHistory);
        lookup.begin(1, account("1234567899"));
        lookup.finish(1, Ok("done"));
        let mut focus = Some(FocusTarget::NewSearch);
        lookup.handle_key(key(KeyCode::Enter), &mut focus);
        assert_eq!(lookup.status, LookupStatus::Idle);
        assert_eq!(lookup.input.value(), "");
        assert_eq!(focus, Some(FocusTarget::AccountInput));
    }
}
