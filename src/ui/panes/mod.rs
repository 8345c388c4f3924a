//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`visual`]: Bars, tree, graph, container or table view of the current step
//! - [`log`]: Step descriptions up to the cursor
//! - [`details`]: Algorithm-specific state (pass, pivot, buckets, distances)
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function. Panes are
//! stateless apart from the scroll offset they clamp in place.

pub mod details;
pub mod log;
pub mod status;
pub mod visual;

pub use details::render_details_pane;
pub use log::render_log_pane;
pub use status::render_status_bar;
pub use visual::render_visual_pane;
