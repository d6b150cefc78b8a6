//! Tabletop Core Library
//!
//! Layout and pointer-interaction engine for tabletop game components:
//! coordinates, grids, linear and stacked layouts, the component tree and
//! drag-and-drop negotiation.

pub mod alignment;
pub mod config;
pub mod coordinate;
pub mod drag;
pub mod grid;
pub mod layout;
pub mod observable;
pub mod scene;
pub mod stage;
pub mod viewport;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use config::{ConfigError, DragConfig, ScaleLimits, StageConfig};
pub use coordinate::{Coordinate, CoordinateError, CoordinatePlain, normalize_rotation};
pub use drag::{DragError, DragEvent, DragNegotiator, DragPhase, DragSession, DropEvent, DropOutcome};
pub use grid::{COLUMN_WIDTH_AUTO, Grid, GridError, GridResult, ROW_HEIGHT_AUTO};
pub use layout::{CardStack, GridPane, LinearLayout, LinearPacker, Orientation, StackAligner};
pub use observable::{ListenerId, Observers, Property};
pub use scene::{Component, ComponentId, ComponentKind, Scene, SceneError, SceneResult, Traversable};
pub use stage::Stage;
pub use viewport::Viewport;
