//! SVG renderer for positioned layout trees
//!
//! This module turns a [`LayoutNode`] tree into ordered drawing primitives
//! and serializes them as a self-contained SVG document with an explicit
//! `viewBox`, so an embedding page can scale it without knowing the geometry.

pub mod config;
pub mod draw;
pub mod error;
pub mod svg;

pub use config::SvgConfig;
pub use draw::{draw, DrawCommand, Drawing, ShapeClass};
pub use error::RenderError;
pub use svg::{render_svg, render_svg_with_stylesheet, SvgBuilder};

use crate::layout::{GeometryConfig, LayoutNode};
use crate::stylesheet::Stylesheet;

/// A rendered diagram: SVG markup plus the canvas extents
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDiagram {
    pub markup: String,
    pub width: f64,
    pub height: f64,
}

/// Render a positioned layout with the default SVG options and palette
pub fn render(root: &LayoutNode<'_>, geometry: &GeometryConfig) -> Result<RenderedDiagram, RenderError> {
    render_with(root, geometry, &SvgConfig::default(), &Stylesheet::default())
}

/// Render a positioned layout with explicit SVG options and palette
pub fn render_with(
    root: &LayoutNode<'_>,
    geometry: &GeometryConfig,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> Result<RenderedDiagram, RenderError> {
    let drawing = draw(root, geometry)?;
    let markup = render_svg_with_stylesheet(&drawing, config, stylesheet);
    Ok(RenderedDiagram {
        markup,
        width: drawing.width,
        height: drawing.height,
    })
}
