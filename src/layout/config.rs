//! Configuration for the layout engine

use serde::Deserialize;

use super::error::ValidationError;

/// Geometry constants shared by the layout engine and the renderer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Width of a node slot and of internal-node rectangles
    #[serde(alias = "nodeWidth")]
    pub node_width: f64,

    /// Height of internal-node rectangles
    #[serde(alias = "nodeHeight")]
    pub node_height: f64,

    /// Vertical distance between consecutive levels
    #[serde(alias = "levelHeight")]
    pub level_height: f64,

    /// Horizontal gap between sibling slots
    #[serde(alias = "siblingGap")]
    pub sibling_gap: f64,

    /// Offset of the root row from the top edge
    #[serde(alias = "topMargin")]
    pub top_margin: f64,

    /// Space added to the right and bottom of the canvas
    #[serde(alias = "canvasMargin")]
    pub canvas_margin: f64,

    /// Radius of the AND/OR marker
    #[serde(alias = "relationMarkerRadius")]
    pub relation_marker_radius: f64,

    /// Radius of leaf circles
    #[serde(alias = "leafRadius")]
    pub leaf_radius: f64,

    /// Character budget per label line
    #[serde(alias = "textWrapWidth")]
    pub text_wrap_width: usize,

    /// Distance between stacked label lines
    #[serde(alias = "lineHeight")]
    pub line_height: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 60.0,
            level_height: 150.0,
            sibling_gap: 10.0,
            top_margin: 50.0,
            canvas_margin: 100.0,
            relation_marker_radius: 15.0,
            leaf_radius: 50.0,
            text_wrap_width: 10,
            line_height: 14.0,
        }
    }
}

impl GeometryConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node slot size
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    /// Set the vertical distance between levels
    pub fn with_level_height(mut self, height: f64) -> Self {
        self.level_height = height;
        self
    }

    /// Set the gap between sibling slots
    pub fn with_sibling_gap(mut self, gap: f64) -> Self {
        self.sibling_gap = gap;
        self
    }

    /// Set the top margin
    pub fn with_top_margin(mut self, margin: f64) -> Self {
        self.top_margin = margin;
        self
    }

    /// Set the canvas margin
    pub fn with_canvas_margin(mut self, margin: f64) -> Self {
        self.canvas_margin = margin;
        self
    }

    /// Set the relation marker radius
    pub fn with_relation_marker_radius(mut self, radius: f64) -> Self {
        self.relation_marker_radius = radius;
        self
    }

    /// Set the leaf circle radius
    pub fn with_leaf_radius(mut self, radius: f64) -> Self {
        self.leaf_radius = radius;
        self
    }

    /// Set the label wrap budget in characters
    pub fn with_text_wrap_width(mut self, chars: usize) -> Self {
        self.text_wrap_width = chars;
        self
    }

    /// Set the label line height
    pub fn with_line_height(mut self, height: f64) -> Self {
        self.line_height = height;
        self
    }

    /// Horizontal extent of one width unit
    pub fn slot_width(&self) -> f64 {
        self.node_width + self.sibling_gap
    }

    /// Check that every option is positive and finite
    pub fn validate(&self) -> Result<(), ValidationError> {
        let options = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("level_height", self.level_height),
            ("sibling_gap", self.sibling_gap),
            ("top_margin", self.top_margin),
            ("canvas_margin", self.canvas_margin),
            ("relation_marker_radius", self.relation_marker_radius),
            ("leaf_radius", self.leaf_radius),
            ("text_wrap_width", self.text_wrap_width as f64),
            ("line_height", self.line_height),
        ];
        for (option, value) in options {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::invalid_geometry(option, value));
            }
        }
        Ok(())
    }
}

/// Deepest tree `serde_json` can read before its nesting limit
///
/// Each level costs one object and one `children` array, and the
/// `{"root_node": ...}` envelope costs one more object.
pub const JSON_MAX_DEPTH: usize = 62;

/// Size guards applied to a tree before layout
///
/// The default depth stays below [`JSON_MAX_DEPTH`] so JSON input deeper than
/// the limit fails validation instead of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeLimits {
    /// Deepest allowed level (root is level 0)
    #[serde(alias = "maxDepth")]
    pub max_depth: usize,

    /// Largest allowed number of nodes
    #[serde(alias = "maxNodes")]
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 50,
            max_nodes: 10_000,
        }
    }
}

impl TreeLimits {
    /// Set the maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum node count
    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeometryConfig::default();
        assert_eq!(config.node_width, 120.0);
        assert_eq!(config.node_height, 60.0);
        assert_eq!(config.level_height, 150.0);
        assert_eq!(config.sibling_gap, 10.0);
        assert_eq!(config.top_margin, 50.0);
        assert_eq!(config.canvas_margin, 100.0);
        assert_eq!(config.relation_marker_radius, 15.0);
        assert_eq!(config.leaf_radius, 50.0);
        assert_eq!(config.text_wrap_width, 10);
        assert_eq!(config.line_height, 14.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeometryConfig::new()
            .with_node_size(150.0, 75.0)
            .with_sibling_gap(30.0);

        assert_eq!(config.node_width, 150.0);
        assert_eq!(config.node_height, 75.0);
        assert_eq!(config.slot_width(), 180.0);
    }

    #[test]
    fn test_rejects_non_positive_option() {
        let err = GeometryConfig::new()
            .with_level_height(0.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("level_height"));

        let err = GeometryConfig::new()
            .with_line_height(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("line_height"));

        let err = GeometryConfig::new()
            .with_text_wrap_width(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("text_wrap_width"));
    }

    #[test]
    fn test_deserialize_partial_toml_with_aliases() {
        let config: GeometryConfig = toml::from_str(
            r#"
nodeWidth = 100.0
level_height = 120.0
"#,
        )
        .unwrap();
        assert_eq!(config.node_width, 100.0);
        assert_eq!(config.level_height, 120.0);
        assert_eq!(config.node_height, 60.0);
    }

    #[test]
    fn test_default_limits() {
        let limits = TreeLimits::default();
        assert_eq!(limits.max_depth, 50);
        assert!(limits.max_depth < JSON_MAX_DEPTH);
        assert_eq!(limits.max_nodes, 10_000);
    }
}
