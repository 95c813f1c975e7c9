//! Error types for the layout engine

use thiserror::Error;

/// Errors that reject an input before any layout work starts
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A node has an empty or whitespace-only label
    #[error("node at '{path}' has an empty name")]
    EmptyName { path: String },

    /// The tree is deeper than the configured limit
    #[error("node at '{path}' is at depth {depth}, deeper than the limit of {max}")]
    TooDeep {
        path: String,
        depth: usize,
        max: usize,
    },

    /// The tree has more nodes than the configured limit
    #[error("tree has more than {max} nodes")]
    TooManyNodes { max: usize },

    /// A geometry option is zero, negative or not finite
    #[error("geometry option '{option}' must be positive and finite, got {value}")]
    InvalidGeometry { option: &'static str, value: f64 },
}

impl ValidationError {
    /// Create an empty name error
    pub fn empty_name(path: impl Into<String>) -> Self {
        Self::EmptyName { path: path.into() }
    }

    /// Create a depth limit error
    pub fn too_deep(path: impl Into<String>, depth: usize, max: usize) -> Self {
        Self::TooDeep {
            path: path.into(),
            depth,
            max,
        }
    }

    /// Create an invalid geometry error
    pub fn invalid_geometry(option: &'static str, value: f64) -> Self {
        Self::InvalidGeometry { option, value }
    }

    /// Path of the offending node, if the error concerns one
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::EmptyName { path } | Self::TooDeep { path, .. } => Some(path),
            _ => None,
        }
    }
}
