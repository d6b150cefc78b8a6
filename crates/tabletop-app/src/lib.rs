//! Tabletop Application
//!
//! Native shell that builds a demo table, replays scripted pointer gestures
//! through the stage and prints the resulting layout.

mod app;
mod demo;

pub use app::{App, AppError, AppResult, Report};
pub use demo::{DemoTable, Gesture, center_of};
