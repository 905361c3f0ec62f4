//! Terminal result viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The viewer shows a finished run. It is organized into three layers:
//!
//! - **[`app`]**: viewer state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   output, globals, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point is [`App`]: construct it from an [`Execution`] and call
//! [`App::run`] to start the event loop.
//!
//! [`Execution`]: crate::Execution
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
