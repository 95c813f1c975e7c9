//! Tree Diagram - layout and SVG rendering for AND/OR labeled trees
//!
//! This library lays out a labeled tree top-down, reserving one horizontal
//! slot per leaf, and renders it as a scalable SVG document. Nodes whose
//! children combine through an AND/OR relation get a circular relation
//! marker and "comb" connectors fanning out from it.
//!
//! # Example
//!
//! ```rust
//! use tree_diagram::{render_tree, RelationType, Tree};
//!
//! let tree = Tree::node("login", vec![Tree::leaf("password"), Tree::leaf("otp")])
//!     .with_relation(RelationType::And);
//! let diagram = render_tree(&tree).unwrap();
//! assert!(diagram.markup.contains("<svg"));
//! assert!(diagram.markup.contains("AND"));
//! ```

pub mod error;
pub mod layout;
pub mod renderer;
pub mod stylesheet;
pub mod tree;

pub use error::InputError;
pub use layout::{GeometryConfig, LayoutNode, TreeLimits, ValidationError};
pub use renderer::{render, RenderError, RenderedDiagram, SvgConfig};
pub use tree::{RelationType, Tree};

use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Input document could not be read
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Input tree or configuration rejected before layout
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Layout and renderer disagree
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Geometry shared by layout and rendering
    pub geometry: GeometryConfig,
    /// Size guards checked before layout
    pub limits: TreeLimits,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Debug mode: log every node position
    pub debug: bool,
}

/// TOML layout of a configuration file
#[derive(Deserialize)]
struct TomlConfig {
    #[serde(default)]
    geometry: GeometryConfig,
    #[serde(default)]
    limits: TreeLimits,
    #[serde(default)]
    svg: SvgConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `[geometry]`, `[limits]` and `[svg]` sections from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, InputError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        if parsed.limits.max_depth > layout::JSON_MAX_DEPTH {
            warn!(
                max_depth = parsed.limits.max_depth,
                json_max_depth = layout::JSON_MAX_DEPTH;
                "max_depth exceeds what JSON input can reach"
            );
        }
        Ok(Self::new()
            .with_geometry(parsed.geometry)
            .with_limits(parsed.limits)
            .with_svg(parsed.svg))
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Set the geometry configuration
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the tree size limits
    pub fn with_limits(mut self, limits: TreeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Lay out a tree with default size limits
///
/// # Example
///
/// ```rust
/// use tree_diagram::{layout, GeometryConfig, Tree};
///
/// let tree = Tree::node("root", vec![Tree::leaf("a"), Tree::leaf("b")]);
/// let root = layout(&tree, &GeometryConfig::default()).unwrap();
/// assert_eq!(root.width_units, 2);
/// assert_eq!(root.position.unwrap().x, 125.0);
/// ```
pub fn layout<'a>(
    tree: &'a Tree,
    geometry: &GeometryConfig,
) -> Result<LayoutNode<'a>, ValidationError> {
    layout::compute(tree, geometry, &TreeLimits::default())
}

/// Render a tree to SVG with default configuration
pub fn render_tree(tree: &Tree) -> Result<RenderedDiagram, DiagramError> {
    render_with_config(tree, &RenderConfig::default())
}

/// Render a JSON tree document to SVG with default configuration
///
/// # Example
///
/// ```rust
/// use tree_diagram::render_json;
///
/// let diagram = render_json(r#"{"root_node": {"name": "only"}}"#).unwrap();
/// assert_eq!((diagram.width, diagram.height), (220.0, 210.0));
/// ```
pub fn render_json(source: &str) -> Result<RenderedDiagram, DiagramError> {
    let tree = Tree::from_json(source)?;
    render_tree(&tree)
}

/// Render a tree to SVG with custom configuration
pub fn render_with_config(
    tree: &Tree,
    config: &RenderConfig,
) -> Result<RenderedDiagram, DiagramError> {
    let root = layout::compute(tree, &config.geometry, &config.limits)?;

    if config.debug {
        for node in root.iter() {
            let indent = "  ".repeat(node.level);
            let (x, y) = node.position.map(|p| (p.x, p.y)).unwrap_or_default();
            debug!(
                "{}[{}] level={} units={} x={:.1} y={:.1}",
                indent, node.label(), node.level, node.width_units, x, y
            );
            if let Some(marker) = node.relation {
                debug!(
                    "{}  <{}> x={:.1} y={:.1}",
                    indent, marker.kind, marker.center.x, marker.center.y
                );
            }
        }
    }

    let diagram = renderer::render_with(&root, &config.geometry, &config.svg, &config.stylesheet)?;
    Ok(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_leaf() {
        let diagram = render_tree(&Tree::leaf("X")).unwrap();
        assert!(diagram.markup.contains("<svg"));
        assert!(diagram.markup.contains("</svg>"));
        assert!(diagram.markup.contains(">X</text>"));
        assert_eq!(diagram.width, 220.0);
        assert_eq!(diagram.height, 210.0);
    }

    #[test]
    fn test_render_relation() {
        let tree = Tree::node("r", vec![Tree::leaf("a"), Tree::leaf("b")])
            .with_relation(RelationType::Or);
        let diagram = render_tree(&tree).unwrap();
        assert!(diagram.markup.contains("td-relation-bg"));
        assert!(diagram.markup.contains(">OR</text>"));
    }

    #[test]
    fn test_render_validation_error() {
        let result = render_tree(&Tree::leaf(""));
        assert!(matches!(result, Err(DiagramError::Validation(_))));
    }

    #[test]
    fn test_render_json_error() {
        let result = render_json("{ not json");
        assert!(matches!(result, Err(DiagramError::Input(InputError::Json(_)))));
    }

    #[test]
    fn test_render_json_too_deep_is_validation_error() {
        let mut source = r#"{"name": "bottom"}"#.to_string();
        for i in 0..55 {
            source = format!(r#"{{"name": "level {}", "children": [{}]}}"#, i, source);
        }
        let result = render_json(&source);
        assert!(
            matches!(
                result,
                Err(DiagramError::Validation(ValidationError::TooDeep { max: 50, .. }))
            ),
            "got {:?}",
            result.map(|d| d.width)
        );
    }

    #[test]
    fn test_config_from_toml() {
        let config = RenderConfig::from_toml_str(
            r#"
[geometry]
nodeWidth = 100.0
sibling_gap = 20.0

[limits]
max_depth = 8

[svg]
pretty_print = false
"#,
        )
        .unwrap();
        assert_eq!(config.geometry.node_width, 100.0);
        assert_eq!(config.geometry.sibling_gap, 20.0);
        assert_eq!(config.geometry.node_height, 60.0);
        assert_eq!(config.limits.max_depth, 8);
        assert_eq!(config.limits.max_nodes, 10_000);
        assert!(!config.svg.pretty_print);
        assert!(config.svg.standalone);
    }

    #[test]
    fn test_config_from_empty_toml() {
        let config = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(config.geometry, GeometryConfig::default());
    }

    #[test]
    fn test_custom_geometry_changes_canvas() {
        let config = RenderConfig::new()
            .with_geometry(GeometryConfig::default().with_canvas_margin(10.0))
            .with_debug(true);
        let diagram = render_with_config(&Tree::leaf("X"), &config).unwrap();
        assert_eq!((diagram.width, diagram.height), (130.0, 120.0));
    }
}
