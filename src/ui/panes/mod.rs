//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and the marked line
//! - [`output`]: Lines written by `print`
//! - [`globals`]: Final global bindings
//! - [`status`]: Status bar with keybindings and run outcome
//!
//! Each pane module exports a primary `render_*` function taking the frame,
//! its area, the data to show and a scroll offset it clamps in place.

pub mod globals;
pub mod output;
pub mod source;
pub mod status;

pub use globals::render_globals_pane;
pub use output::render_output_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
