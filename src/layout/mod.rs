//! Layout engine for computing node positions
//!
//! This module takes an input [`Tree`] and computes the spatial layout,
//! producing a [`LayoutNode`] tree with positioned nodes and relation markers.

pub mod config;
pub mod engine;
pub mod error;
pub mod text;
pub mod types;

pub use config::{GeometryConfig, TreeLimits, JSON_MAX_DEPTH};
pub use engine::{assign_coordinates, compute, compute_widths};
pub use error::ValidationError;
pub use text::wrap_label;
pub use types::*;

use crate::tree::Tree;

/// Check a tree against `limits` and reject empty labels.
///
/// The walk uses an explicit stack so an oversized tree is rejected without
/// recursing through it.
pub fn validate_tree(tree: &Tree, limits: &TreeLimits) -> Result<(), ValidationError> {
    let mut stack: Vec<(&Tree, Vec<usize>)> = vec![(tree, vec![])];
    let mut visited = 0usize;

    while let Some((node, path)) = stack.pop() {
        visited += 1;
        if visited > limits.max_nodes {
            return Err(ValidationError::TooManyNodes {
                max: limits.max_nodes,
            });
        }
        if path.len() > limits.max_depth {
            return Err(ValidationError::too_deep(
                format_path(&path),
                path.len(),
                limits.max_depth,
            ));
        }
        if node.name.trim().is_empty() {
            return Err(ValidationError::empty_name(format_path(&path)));
        }

        for (index, child) in node.children.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(index);
            stack.push((child, child_path));
        }
    }

    Ok(())
}

/// Render a child-index path as `/`, `/0`, `/0/2`, ...
fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.iter().map(|i| format!("/{}", i)).collect()
}
