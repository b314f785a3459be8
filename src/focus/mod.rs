//! Focus model for the terminal UI.
//!
//! Each screen describes its interactive pieces as an ordered slice of
//! [`FocusNode`]s (render order). The app keeps a single
//! `Option<FocusTarget>` as the active element; Tab cycling and the modal
//! [`FocusTrap`](trap::FocusTrap) both work against these slices.

pub mod trap;

use crate::nav::routes::Route;

/// Identifies an interactive element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    MenuItem(usize),
    AccountInput,
    Submit,
    NewSearch,
    DismissError,
    Back,
    Link(Route),
    DialogCancel,
    DialogConfirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Button,
    Link,
    TextInput,
    TextArea,
    Select,
    ContentEditable,
    Static,
}

impl ElementKind {
    pub fn is_natively_focusable(self) -> bool {
        matches!(
            self,
            ElementKind::Button
                | ElementKind::Link
                | ElementKind::TextInput
                | ElementKind::TextArea
                | ElementKind::Select
        )
    }

    /// Elements that own typed characters (and Escape).
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            ElementKind::TextInput | ElementKind::TextArea | ElementKind::ContentEditable
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusNode {
    pub target: FocusTarget,
    pub kind: ElementKind,
    pub tab_index: Option<i32>,
}

impl FocusNode {
    pub fn new(target: FocusTarget, kind: ElementKind) -> Self {
        Self {
            target,
            kind,
            tab_index: None,
        }
    }

    pub fn button(target: FocusTarget) -> Self {
        Self::new(target, ElementKind::Button)
    }

    pub fn link(route: Route) -> Self {
        Self::new(FocusTarget::Link(route), ElementKind::Link)
    }

    pub fn text_input(target: FocusTarget) -> Self {
        Self::new(target, ElementKind::TextInput)
    }

    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    pub fn is_focusable(&self) -> bool {
        self.kind.is_natively_focusable() || self.tab_index.is_some_and(|i| i >= 0)
    }
}

pub fn kind_of(nodes: &[FocusNode], target: FocusTarget) -> Option<ElementKind> {
    nodes.iter().find(|n| n.target == target).map(|n| n.kind)
}

/// Native Tab order: the next focusable node after `current`, wrapping.
/// With nothing focused, Tab lands on the first node and Shift+Tab on the last.
pub fn cycle(
    nodes: &[FocusNode],
    current: Option<FocusTarget>,
    reverse: bool,
) -> Option<FocusTarget> {
    let ring: Vec<FocusTarget> = nodes
        .iter()
        .filter(|n| n.is_focusable())
        .map(|n| n.target)
        .collect();
    if ring.is_empty() {
        return None;
    }
    let len = ring.len();
    let position = current.and_then(|c| ring.iter().position(|t| *t == c));
    let next = match (position, reverse) {
        (None, false) => 0,
        (None, true) => len - 1,
        (Some(i), false) => (i + 1) % len,
        (Some(i), true) => (i + len - 1) % len,
    };
    Some(ring[next])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<FocusNode> {
        vec![
            FocusNode::text_input(FocusTarget::AccountInput),
            FocusNode::new(FocusTarget::MenuItem(0), ElementKind::Static),
            FocusNode::button(FocusTarget::Submit),
            FocusNode::link(Route::MainMenu),
        ]
    }

    #[test]
    fn tab_index_makes_static_nodes_focusable() {
        let node = FocusNode::new(FocusTarget::MenuItem(0), ElementKind::Static);
        assert!(!node.is_focusable());
        assert!(node.with_tab_index(0).is_focusable());
        assert!(!node.with_tab_index(-1).is_focusable());
    }

    #[test]
    fn cycle_skips_unfocusable_and_wraps() {
        let nodes = page();
        let next = cycle(&nodes, Some(FocusTarget::AccountInput), false);
        assert_eq!(next, Some(FocusTarget::Submit));
        let next = cycle(&nodes, Some(FocusTarget::Link(Route::MainMenu)), false);
        assert_eq!(next, Some(FocusTarget::AccountInput));
        let prev = cycle(&nodes, Some(FocusTarget::AccountInput), true);
        assert_eq!(prev, Some(FocusTarget::Link(Route::MainMenu)));
    }

    #[test]
    fn cycle_from_nothing() {
        let nodes = page();
        assert_eq!(cycle(&nodes, None, false), Some(FocusTarget::AccountInput));
        assert_eq!(cycle(&nodes, None, true), Some(FocusTarget::Link(Route::MainMenu)));
        assert_eq!(cycle(&[], None, false), None);
    }

    #[test]
    fn editable_kinds() {
        assert!(ElementKind::TextInput.is_editable());
        assert!(ElementKind::ContentEditable.is_editable());
        assert!(!ElementKind::Button.is_editable());
        assert!(!ElementKind::ContentEditable.is_natively_focusable());
    }
}
