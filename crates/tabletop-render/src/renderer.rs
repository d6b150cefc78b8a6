//! Renderer trait abstraction.

use thiserror::Error;

use crate::snapshot::SceneSnapshot;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Unknown component in snapshot: {0}")]
    UnknownComponent(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Something that can draw a captured scene.
///
/// Renderers work from a [`SceneSnapshot`] rather than the live scene, so a
/// frame always shows a consistent, fully laid-out state.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, snapshot: &SceneSnapshot) -> RenderResult<()>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}
