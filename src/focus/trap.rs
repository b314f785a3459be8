use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{FocusNode, FocusTarget};

/// Keeps Tab/Shift+Tab inside a container while an overlay is open.
///
/// Only the wrap-around at either end is handled here; Tab presses in the
/// middle of the container are left to the caller's normal focus cycling.
/// Restoring the focus that was active before [`FocusTrap::acquire`] is the
/// caller's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusTrap {
    first: Option<FocusTarget>,
    last: Option<FocusTarget>,
}

impl FocusTrap {
    /// Scans `container` in order and focuses its first focusable node.
    /// A container with nothing focusable yields an inert trap.
    pub fn acquire(container: &[FocusNode], focus: &mut Option<FocusTarget>) -> Self {
        let mut focusable = container
            .iter()
            .filter(|n| n.is_focusable())
            .map(|n| n.target);
        let first = focusable.next();
        let last = focusable.last().or(first);

        if let Some(first) = first {
            *focus = Some(first);
        }
        tracing::trace!(?first, ?last, "focus trap acquired");
        Self { first, last }
    }

    pub fn first(&self) -> Option<FocusTarget> {
        self.first
    }

    pub fn last(&self) -> Option<FocusTarget> {
        self.last
    }

    /// Returns true when the key was consumed (default prevented).
    pub fn handle_key(&self, key: KeyEvent, focus: &mut Option<FocusTarget>) -> bool {
        let backward = match key.code {
            KeyCode::BackTab => true,
            KeyCode::Tab => key.modifiers.contains(KeyModifiers::SHIFT),
            _ => return false,
        };
        let (Some(first), Some(last)) = (self.first, self.last) else {
            return false;
        };

        if backward && *focus == Some(first) {
            *focus = Some(last);
            true
        } else if !backward && *focus == Some(last) {
            *focus = Some(first);
            true
        } else {
            false
        }
    }

    pub fn release(self) {
        tracing::trace!(first = ?self.first, "focus trap released");
    }
}
