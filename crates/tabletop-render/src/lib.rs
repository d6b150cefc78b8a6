//! Tabletop Render Library
//!
//! Turns a laid-out scene into something a renderer can draw: an immutable
//! [`SceneSnapshot`], the [`Renderer`] trait and a text outline renderer.

mod outline;
mod renderer;
mod snapshot;

pub use outline::OutlineRenderer;
pub use renderer::{RenderResult, Renderer, RendererError};
pub use snapshot::{CellSnapshot, ComponentSnapshot, GridSnapshot, SceneSnapshot};
