//! Layout algorithms and the container state that drives them.
//!
//! The algorithms themselves are pure functions over sizes so they can be
//! tested without a component tree; the scene feeds them and writes the
//! resulting positions back.

mod grid_pane;
mod linear;
mod stack;

pub use grid_pane::{CellMetrics, GridLayout, GridPane, Structure};
pub use linear::{LinearLayout, LinearPacker, Orientation};
pub use stack::{CardStack, StackAligner};

pub(crate) use grid_pane::check_spacing;
