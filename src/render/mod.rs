//! Menu rendering.
//!
//! Produces the line-oriented BitBar/xbar plugin output.

pub mod menu;

pub use menu::{render_abort, render_menu, DisplayMode};
