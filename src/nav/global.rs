use crate::focus::ElementKind;
use crate::nav::routes::Route;

/// Snapshot of the ambient state an Escape press is judged against.
/// Built fresh for every press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapeContext {
    pub route: Route,
    pub active: Option<ElementKind>,
    pub modal_open: bool,
}

/// The application-wide Escape-to-home listener.
///
/// Attached once when the app mounts and detached on unmount; while
/// detached it never navigates.
#[derive(Clone, Debug, Default)]
pub struct GlobalNavigation {
    attached: bool,
}

impl GlobalNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Where an Escape press should take the user, if anywhere.
    pub fn handle_escape(&self, ctx: &EscapeContext) -> Option<Route> {
        if !self.attached || ctx.route.is_home() {
            return None;
        }
        if ctx.active.is_some_and(ElementKind::is_editable) {
            tracing::debug!(route = ctx.route.path(), "escape left to focused field");
            return None;
        }
        if ctx.modal_open {
            tracing::debug!(route = ctx.route.path(), "escape left to modal");
            return None;
        }
        Some(Route::MainMenu)
    }
}
