use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusOptions {
    pub wrap: bool,
    pub skip_disabled: bool,
    pub announce_changes: bool,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            wrap: true,
            skip_disabled: false,
            announce_changes: true,
        }
    }
}

/// Cursor over the list. `selected == None` means nothing is highlighted yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<usize>,
    pub keyboard_driven: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(usize),
    Activate(usize),
    Shortcut { key: char, index: usize },
    Reset,
    /// Key not handled; the caller may pass it on.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

/// Arrow/shortcut navigation over a fixed number of items.
///
/// The controller knows nothing about what the items are; the owning page
/// maps [`NavOutcome`]s to route changes or actions.
#[derive(Clone, Debug)]
pub struct KeyboardNav {
    state: SelectionState,
    item_count: usize,
    options: FocusOptions,
    shortcuts: Vec<Option<char>>,
    disabled: Vec<bool>,
}

impl KeyboardNav {
    pub fn new(item_count: usize, options: FocusOptions) -> Self {
        Self {
            state: SelectionState::default(),
            item_count,
            options,
            shortcuts: Vec::new(),
            disabled: Vec::new(),
        }
    }

    pub fn with_shortcuts(mut self, shortcuts: Vec<Option<char>>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    pub fn with_disabled(mut self, disabled: Vec<bool>) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn options(&self) -> FocusOptions {
        self.options
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::default();
    }

    /// Highlight an item directly (shortcut activation, Tab focus).
    pub fn select(&mut self, index: usize) {
        if index < self.item_count {
            self.state = SelectionState {
                selected: Some(index),
                keyboard_driven: true,
            };
        }
    }

    fn is_disabled(&self, index: usize) -> bool {
        self.disabled.get(index).copied().unwrap_or(false)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> NavOutcome {
        if key.kind == KeyEventKind::Release
            || key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return NavOutcome::Ignored;
        }

        match key.code {
            KeyCode::Down | KeyCode::Right => self.step(Step::Forward),
            KeyCode::Up | KeyCode::Left => self.step(Step::Backward),
            KeyCode::Enter | KeyCode::Char(' ') => match self.state.selected {
                Some(index) if !self.is_disabled(index) => NavOutcome::Activate(index),
                _ => NavOutcome::Ignored,
            },
            KeyCode::Esc => {
                self.reset();
                NavOutcome::Reset
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => self.shortcut(ch),
            _ => NavOutcome::Ignored,
        }
    }

    fn shortcut(&self, key: char) -> NavOutcome {
        match self.shortcuts.iter().position(|s| *s == Some(key)) {
            Some(index) if index < self.item_count && !self.is_disabled(index) => {
                NavOutcome::Shortcut { key, index }
            }
            _ => NavOutcome::Ignored,
        }
    }

    fn step(&mut self, step: Step) -> NavOutcome {
        if self.item_count == 0 {
            return NavOutcome::Ignored;
        }
        match self.next_index(step) {
            Some(index) => {
                self.state = SelectionState {
                    selected: Some(index),
                    keyboard_driven: true,
                };
                NavOutcome::Moved(index)
            }
            None => NavOutcome::Ignored,
        }
    }

    /// One step from `from`; `None` behaves as index -1.
    fn advance(&self, from: Option<usize>, step: Step) -> usize {
        let count = self.item_count as isize;
        let current = from.map_or(-1, |i| i as isize);
        let raw = match step {
            Step::Forward => current + 1,
            Step::Backward => current - 1,
        };
        let index = if self.options.wrap {
            if raw >= count {
                0
            } else if raw < 0 {
                count - 1
            } else {
                raw
            }
        } else {
            raw.clamp(0, count - 1)
        };
        index as usize
    }

    fn next_index(&self, step: Step) -> Option<usize> {
        let mut candidate = self.advance(self.state.selected, step);
        if !self.options.skip_disabled {
            return Some(candidate);
        }
        for _ in 0..self.item_count {
            if !self.is_disabled(candidate) {
                return Some(candidate);
            }
            let next = self.advance(Some(candidate), step);
            if next == candidate {
                // Clamped against the edge.
                break;
            }
            candidate = next;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn opts(wrap: bool) -> FocusOptions {
        FocusOptions {
            wrap,
            ..FocusOptions::default()
        }
    }

    #[test]
    fn starts_with_nothing_selected() {
        let nav = KeyboardNav::new(3, FocusOptions::default());
        assert_eq!(nav.state(), SelectionState::default());
        assert_eq!(nav.selected(), None);
        assert!(!nav.state().keyboard_driven);
    }

    #[test]
    fn down_presses_wrap_modulo_count() {
        for count in 1..6 {
            let mut nav = KeyboardNav::new(count, opts(true));
            for k in 1..=(count * 3) {
                nav.handle_key(key(KeyCode::Down));
                assert_eq!(nav.selected(), Some((k - 1) % count), "count={count} k={k}");
                assert!(nav.state().keyboard_driven);
            }
        }
    }

    #[test]
    fn down_presses_clamp_without_wrap() {
        for count in 1..6 {
            let mut nav = KeyboardNav::new(count, opts(false));
            for k in 1..=(count * 3) {
                nav.handle_key(key(KeyCode::Down));
                assert_eq!(nav.selected(), Some((k - 1).min(count - 1)));
            }
        }
    }

    #[test]
    fn up_from_nothing_wraps_to_last_or_clamps_to_first() {
        let mut nav = KeyboardNav::new(4, opts(true));
        assert_eq!(nav.handle_key(key(KeyCode::Up)), NavOutcome::Moved(3));

        let mut nav = KeyboardNav::new(4, opts(false));
        assert_eq!(nav.handle_key(key(KeyCode::Up)), NavOutcome::Moved(0));
        assert_eq!(nav.handle_key(key(KeyCode::Left)), NavOutcome::Moved(0));
    }

    #[test]
    fn right_and_left_mirror_down_and_up() {
        let mut nav = KeyboardNav::new(3, opts(true));
        nav.handle_key(key(KeyCode::Right));
        nav.handle_key(key(KeyCode::Right));
        assert_eq!(nav.selected(), Some(1));
        nav.handle_key(key(KeyCode::Left));
        assert_eq!(nav.selected(), Some(0));
        nav.handle_key(key(KeyCode::Left));
        assert_eq!(nav.selected(), Some(2));
    }

    #[test]
    fn empty_list_never_leaves_nothing_selected() {
        let mut nav = KeyboardNav::new(0, opts(true));
        for code in [KeyCode::Down, KeyCode::Up, KeyCode::Left, KeyCode::Right] {
            assert_eq!(nav.handle_key(key(code)), NavOutcome::Ignored);
            assert_eq!(nav.selected(), None);
        }
        assert_eq!(nav.handle_key(key(KeyCode::Enter)), NavOutcome::Ignored);
    }

    #[test]
    fn escape_always_resets() {
        let mut nav = KeyboardNav::new(5, opts(true));
        assert_eq!(nav.handle_key(key(KeyCode::Esc)), NavOutcome::Reset);
        assert_eq!(nav.state(), SelectionState::default());

        nav.handle_key(key(KeyCode::Down));
        nav.handle_key(key(KeyCode::Down));
        assert_eq!(nav.handle_key(key(KeyCode::Esc)), NavOutcome::Reset);
        assert_eq!(
            nav.state(),
            SelectionState {
                selected: None,
                keyboard_driven: false
            }
        );
    }

    #[test]
    fn enter_and_space_activate_only_with_selection() {
        let mut nav = KeyboardNav::new(3, opts(true));
        assert_eq!(nav.handle_key(key(KeyCode::Enter)), NavOutcome::Ignored);

        nav.handle_key(key(KeyCode::Down));
        nav.handle_key(key(KeyCode::Down));
        assert_eq!(nav.handle_key(key(KeyCode::Enter)), NavOutcome::Activate(1));
        assert_eq!(nav.handle_key(key(KeyCode::Char(' '))), NavOutcome::Activate(1));
        // Activation does not move the cursor
        assert_eq!(nav.selected(), Some(1));
    }

    #[test]
    fn shortcuts_bypass_the_cursor() {
        let mut nav = KeyboardNav::new(3, opts(true))
            .with_shortcuts(vec![Some('1'), Some('2'), Some('3')]);
        assert_eq!(
            nav.handle_key(key(KeyCode::Char('2'))),
            NavOutcome::Shortcut { key: '2', index: 1 }
        );
        assert_eq!(nav.selected(), None);
        assert_eq!(nav.handle_key(key(KeyCode::Char('9'))), NavOutcome::Ignored);
    }

    #[test]
    fn other_keys_and_modified_keys_are_ignored() {
        let mut nav = KeyboardNav::new(3, opts(true)).with_shortcuts(vec![Some('1')]);
        assert_eq!(nav.handle_key(key(KeyCode::Char('x'))), NavOutcome::Ignored);
        assert_eq!(nav.handle_key(key(KeyCode::Tab)), NavOutcome::Ignored);
        let ctrl_one = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL);
        assert_eq!(nav.handle_key(ctrl_one), NavOutcome::Ignored);
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn skip_disabled_steps_over_items() {
        let options = FocusOptions {
            wrap: true,
            skip_disabled: true,
            announce_changes: false,
        };
        let mut nav =
            KeyboardNav::new(4, options).with_disabled(vec![false, true, true, false]);
        assert_eq!(nav.handle_key(key(KeyCode::Down)), NavOutcome::Moved(0));
        assert_eq!(nav.handle_key(key(KeyCode::Down)), NavOutcome::Moved(3));
        assert_eq!(nav.handle_key(key(KeyCode::Down)), NavOutcome::Moved(0));
        assert_eq!(nav.handle_key(key(KeyCode::Up)), NavOutcome::Moved(3));
    }

    #[test]
    fn skip_disabled_without_wrap_stops_at_edge() {
        let options = FocusOptions {
            wrap: false,
            skip_disabled: true,
            announce_changes: false,
        };
        let mut nav = KeyboardNav::new(3, options).with_disabled(vec![false, false, true]);
        nav.handle_key(key(KeyCode::Down));
        nav.handle_key(key(KeyCode::Down));
        assert_eq!(nav.selected(), Some(1));
        assert_eq!(nav.handle_key(key(KeyCode::Down)), NavOutcome::Ignored);
        assert_eq!(nav.selected(), Some(1));
    }

    #[test]
    fn all_disabled_keeps_selection() {
        let options = FocusOptions {
            wrap: true,
            skip_disabled: true,
            announce_changes: false,
        };
        let mut nav = KeyboardNav::new(2, options).with_disabled(vec![true, true]);
        assert_eq!(nav.handle_key(key(KeyCode::Down)), NavOutcome::Ignored);
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn disabled_items_cannot_be_activated() {
        let mut nav = KeyboardNav::new(2, opts(true))
            .with_shortcuts(vec![Some('1'), Some('2')])
            .with_disabled(vec![true, false]);
        nav.handle_key(key(KeyCode::Down));
        assert_eq!(nav.selected(), Some(0));
        assert_eq!(nav.handle_key(key(KeyCode::Enter)), NavOutcome::Ignored);
        assert_eq!(nav.handle_key(key(KeyCode::Char('1'))), NavOutcome::Ignored);
    }
}
