//! Core types for the layout engine

use crate::tree::{RelationType, Tree};

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same point moved vertically by `dy`
    pub fn offset_y(self, dy: f64) -> Self {
        Self::new(self.x, self.y + dy)
    }

    /// Whether both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// AND/OR junction drawn between a node and its children
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationMarker {
    pub kind: RelationType,
    pub center: Point,
}

/// Layout of one tree node and its subtree
///
/// Built by [`compute_widths`](super::compute_widths) with `position` unset,
/// then positioned in place by [`assign_coordinates`](super::assign_coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode<'a> {
    /// Source node
    pub node: &'a Tree,
    /// Depth from the root (root = 0)
    pub level: usize,
    /// Number of leaf slots this subtree reserves
    pub width_units: usize,
    /// Center of the node shape
    pub position: Option<Point>,
    /// Junction between this node and its children
    pub relation: Option<RelationMarker>,
    pub children: Vec<LayoutNode<'a>>,
}

impl<'a> LayoutNode<'a> {
    /// Create an unpositioned layout node
    pub fn new(node: &'a Tree, level: usize, width_units: usize) -> Self {
        Self {
            node,
            level,
            width_units,
            position: None,
            relation: None,
            children: vec![],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Display label of the source node
    pub fn label(&self) -> &'a str {
        &self.node.name
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(LayoutNode::node_count).sum::<usize>()
    }

    /// Pre-order iterator over this subtree
    pub fn iter(&self) -> impl Iterator<Item = &LayoutNode<'a>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_offset() {
        let p = Point::new(10.0, 20.0).offset_y(-5.0);
        assert_eq!(p, Point::new(10.0, 15.0));
    }

    #[test]
    fn test_point_finite() {
        assert!(Point::new(0.0, 1.0).is_finite());
        assert!(!Point::new(f64::INFINITY, 1.0).is_finite());
    }

    #[test]
    fn test_iter_is_pre_order() {
        let tree = Tree::node(
            "r",
            vec![Tree::node("a", vec![Tree::leaf("a1")]), Tree::leaf("b")],
        );
        let a1 = LayoutNode::new(&tree.children[0].children[0], 2, 1);
        let mut a = LayoutNode::new(&tree.children[0], 1, 1);
        a.children.push(a1);
        let b = LayoutNode::new(&tree.children[1], 1, 1);
        let mut root = LayoutNode::new(&tree, 0, 2);
        root.children = vec![a, b];

        let labels: Vec<&str> = root.iter().map(LayoutNode::label).collect();
        assert_eq!(labels, vec!["r", "a", "a1", "b"]);
        assert_eq!(root.node_count(), 4);
    }
}
