//! Layout computation engine
//!
//! Layout runs in two passes over the tree:
//!
//! 1. [`compute_widths`] (post-order) builds a [`LayoutNode`] per tree node with
//!    its level and the number of leaf slots its subtree reserves.
//! 2. [`assign_coordinates`] (pre-order placement, post-order centering) lays
//!    each parent's children left to right, one slot of `node_width +
//!    sibling_gap` per width unit, and centers the parent between its first
//!    and last child.
//!
//! Both passes are single deterministic walks with no backtracking.

use log::{debug, trace};

use crate::tree::Tree;

use super::config::{GeometryConfig, TreeLimits};
use super::error::ValidationError;
use super::types::*;
use super::validate_tree;

/// Validate `tree` and `geometry`, then compute a fully positioned layout.
pub fn compute<'a>(
    tree: &'a Tree,
    geometry: &GeometryConfig,
    limits: &TreeLimits,
) -> Result<LayoutNode<'a>, ValidationError> {
    geometry.validate()?;
    validate_tree(tree, limits)?;

    let mut root = compute_widths(tree, 0);
    assign_coordinates(&mut root, 0.0, geometry);

    debug!(
        nodes = root.node_count(),
        width_units = root.width_units;
        "Layout computed"
    );
    Ok(root)
}

/// Build the unpositioned layout tree, reserving one slot per leaf.
pub fn compute_widths(node: &Tree, level: usize) -> LayoutNode<'_> {
    if node.is_leaf() {
        if let Some(relation) = node.relation_type {
            debug!(
                name = node.name.as_str(),
                relation = relation.label();
                "Ignoring relation on a node without children"
            );
        }
        return LayoutNode::new(node, level, 1);
    }

    let children: Vec<LayoutNode<'_>> = node
        .children
        .iter()
        .map(|child| compute_widths(child, level + 1))
        .collect();
    let total: usize = children.iter().map(|c| c.width_units).sum();

    let mut layout = LayoutNode::new(node, level, total.max(1));
    layout.children = children;
    layout
}

/// Position `layout` and its subtree, starting at `start_x` on the left.
///
/// The parent is centered on the midpoint of its first and last child, not on
/// the mean of all children.
pub fn assign_coordinates<'l, 'a>(
    layout: &'l mut LayoutNode<'a>,
    start_x: f64,
    geometry: &GeometryConfig,
) -> &'l mut LayoutNode<'a> {
    let y = layout.level as f64 * geometry.level_height + geometry.top_margin;

    if layout.is_leaf() {
        layout.position = Some(Point::new(start_x + geometry.node_width / 2.0, y));
        layout.relation = None;
        trace!(name = layout.label(), x = start_x + geometry.node_width / 2.0, y = y; "Placed leaf");
        return layout;
    }

    let mut current_x = start_x;
    for child in &mut layout.children {
        let extent = child.width_units as f64 * geometry.slot_width();
        assign_coordinates(child, current_x, geometry);
        current_x += extent;
    }

    let first_x = child_x(layout.children.first());
    let last_x = child_x(layout.children.last());
    let x = (first_x + last_x) / 2.0;
    let position = Point::new(x, y);
    layout.position = Some(position);

    layout.relation = layout
        .node
        .effective_relation()
        .map(|kind| RelationMarker {
            kind,
            center: position.offset_y(geometry.level_height * 2.0 / 5.0),
        });

    trace!(name = layout.label(), x = x, y = y; "Placed internal node");
    layout
}

fn child_x(child: Option<&LayoutNode<'_>>) -> f64 {
    child.and_then(|c| c.position).map(|p| p.x).unwrap_or_default()
}
