//! Error types for the renderer

use thiserror::Error;

/// Contract violations between layout and rendering
///
/// These cannot happen when the layout tree comes from
/// [`layout::compute`](crate::layout::compute).
#[derive(Debug, Error)]
pub enum RenderError {
    /// A node reached the renderer without a position
    #[error("node '{name}' has no coordinates; layout must run before rendering")]
    MissingCoordinates { name: String },

    /// A node position is NaN or infinite
    #[error("node '{name}' has a non-finite position ({x}, {y})")]
    NonFiniteCoordinate { name: String, x: f64, y: f64 },
}
