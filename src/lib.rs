// Library target exists so integration tests can drive the app without a terminal.
// The binary entry point is main.rs, which only owns the terminal and the render pass.

pub mod api;
pub mod app;
pub mod config;
pub mod event;
pub mod focus;
pub mod format;
pub mod logging;
pub mod lookup;
pub mod nav;
pub mod schedule;
pub mod ui;
pub mod validation;
