//! Conversion of a positioned layout into drawing primitives
//!
//! All connectors are emitted before any node shape, so node shapes paint
//! over connector ends.

use log::debug;

use crate::layout::{wrap_label, GeometryConfig, LayoutNode, Point};

use super::error::RenderError;

/// Style tag attached to every primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    NodeRect,
    NodeCircle,
    NodeText,
    Connector,
    RelationMarker,
    RelationText,
}

impl ShapeClass {
    /// CSS class name, without prefix
    pub fn css_name(self) -> &'static str {
        match self {
            ShapeClass::NodeRect => "node-rect",
            ShapeClass::NodeCircle => "node-circle",
            ShapeClass::NodeText => "node-text",
            ShapeClass::Connector => "connection-line",
            ShapeClass::RelationMarker => "relation-bg",
            ShapeClass::RelationText => "relation-text",
        }
    }
}

/// A single drawing primitive in absolute coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        class: ShapeClass,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        class: ShapeClass,
    },
    Line {
        from: Point,
        to: Point,
        class: ShapeClass,
    },
    Text {
        position: Point,
        content: String,
        class: ShapeClass,
    },
}

impl DrawCommand {
    pub fn class(&self) -> ShapeClass {
        match self {
            DrawCommand::Circle { class, .. }
            | DrawCommand::Rect { class, .. }
            | DrawCommand::Line { class, .. }
            | DrawCommand::Text { class, .. } => *class,
        }
    }

    fn line(from: Point, to: Point) -> Self {
        DrawCommand::Line {
            from,
            to,
            class: ShapeClass::Connector,
        }
    }
}

/// Ordered primitives plus the canvas that bounds them
///
/// `origin` is the top-left corner of the canvas. It stays at `(0, 0)`
/// unless a shape reaches past the left or top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub commands: Vec<DrawCommand>,
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Drawing {
    /// Commands carrying the given style tag
    pub fn with_class(&self, class: ShapeClass) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.class() == class)
    }
}

/// Turn a positioned layout tree into drawing primitives.
pub fn draw(root: &LayoutNode<'_>, geometry: &GeometryConfig) -> Result<Drawing, RenderError> {
    let (origin, width, height) = canvas_bounds(root, geometry)?;

    let mut commands = vec![];
    draw_connections(root, geometry, &mut commands)?;
    draw_nodes(root, geometry, &mut commands)?;

    debug!(
        min_x = origin.x,
        min_y = origin.y,
        width = width,
        height = height,
        commands = commands.len();
        "Diagram drawn"
    );
    Ok(Drawing {
        commands,
        origin,
        width,
        height,
    })
}

fn position(layout: &LayoutNode<'_>) -> Result<Point, RenderError> {
    let p = layout
        .position
        .ok_or_else(|| RenderError::MissingCoordinates {
            name: layout.label().to_string(),
        })?;
    if !p.is_finite() {
        return Err(RenderError::NonFiniteCoordinate {
            name: layout.label().to_string(),
            x: p.x,
            y: p.y,
        });
    }
    Ok(p)
}

/// Canvas origin and size bounding every node shape
///
/// The right and bottom edges get the canvas margin. The origin only moves
/// below zero when an overridden geometry pushes a circle or rect past the
/// left or top edge.
fn canvas_bounds(
    root: &LayoutNode<'_>,
    geometry: &GeometryConfig,
) -> Result<(Point, f64, f64), RenderError> {
    let mut min_x = 0.0_f64;
    let mut min_y = 0.0_f64;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for layout in root.iter() {
        let p = position(layout)?;
        let (half_width, above, below) = if layout.is_leaf() {
            (
                (geometry.node_width / 2.0).max(geometry.leaf_radius),
                (geometry.node_height / 2.0).max(geometry.leaf_radius),
                geometry.node_height.max(geometry.leaf_radius),
            )
        } else {
            (
                geometry.node_width / 2.0,
                geometry.node_height / 2.0,
                geometry.node_height,
            )
        };
        min_x = min_x.min(p.x - half_width);
        min_y = min_y.min(p.y - above);
        max_x = max_x.max(p.x + half_width);
        max_y = max_y.max(p.y + below);
    }

    Ok((
        Point::new(min_x, min_y),
        max_x + geometry.canvas_margin - min_x,
        max_y + geometry.canvas_margin - min_y,
    ))
}

/// Emit connectors from `layout` to its children, then recurse.
fn draw_connections(
    layout: &LayoutNode<'_>,
    geometry: &GeometryConfig,
    out: &mut Vec<DrawCommand>,
) -> Result<(), RenderError> {
    if layout.is_leaf() {
        return Ok(());
    }

    let parent = position(layout)?;
    let parent_bottom = parent.offset_y(geometry.node_height / 2.0);

    match layout.relation {
        Some(marker) => {
            let r = geometry.relation_marker_radius;
            let center = marker.center;
            let distribution_y = center.y + 2.0 * r;

            out.push(DrawCommand::line(parent_bottom, center.offset_y(-r)));
            out.push(DrawCommand::Circle {
                center,
                radius: r,
                class: ShapeClass::RelationMarker,
            });
            out.push(DrawCommand::Text {
                position: center,
                content: marker.kind.label().to_string(),
                class: ShapeClass::RelationText,
            });
            out.push(DrawCommand::line(
                center.offset_y(r),
                Point::new(center.x, distribution_y),
            ));

            for child in &layout.children {
                let child_top = position(child)?.offset_y(-geometry.node_height / 2.0);
                let junction = Point::new(child_top.x, distribution_y);
                out.push(DrawCommand::line(Point::new(center.x, distribution_y), junction));
                out.push(DrawCommand::line(junction, child_top));
            }
        }
        None => {
            for child in &layout.children {
                let child_top = position(child)?.offset_y(-geometry.node_height / 2.0);
                out.push(DrawCommand::line(parent_bottom, child_top));
            }
        }
    }

    for child in &layout.children {
        draw_connections(child, geometry, out)?;
    }
    Ok(())
}

/// Emit the shape and label lines of `layout`, then recurse.
fn draw_nodes(
    layout: &LayoutNode<'_>,
    geometry: &GeometryConfig,
    out: &mut Vec<DrawCommand>,
) -> Result<(), RenderError> {
    let center = position(layout)?;

    if layout.is_leaf() {
        out.push(DrawCommand::Circle {
            center,
            radius: geometry.leaf_radius,
            class: ShapeClass::NodeCircle,
        });
    } else {
        out.push(DrawCommand::Rect {
            x: center.x - geometry.node_width / 2.0,
            y: center.y - geometry.node_height / 2.0,
            width: geometry.node_width,
            height: geometry.node_height,
            class: ShapeClass::NodeRect,
        });
    }

    let lines = wrap_label(layout.label(), geometry.text_wrap_width);
    let start_y = center.y - (lines.len() - 1) as f64 * geometry.line_height / 2.0;
    for (i, line) in lines.iter().enumerate() {
        out.push(DrawCommand::Text {
            position: Point::new(center.x, start_y + i as f64 * geometry.line_height),
            content: line.trim_end().to_string(),
            class: ShapeClass::NodeText,
        });
    }

    for child in &layout.children {
        draw_nodes(child, geometry, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute, compute_widths, TreeLimits};
    use crate::tree::{RelationType, Tree};
    use pretty_assertions::assert_eq;

    fn drawing(tree: &Tree) -> Drawing {
        let geometry = GeometryConfig::default();
        let layout = compute(tree, &geometry, &TreeLimits::default()).unwrap();
        draw(&layout, &geometry).unwrap()
    }

    #[test]
    fn test_single_leaf() {
        let d = drawing(&Tree::leaf("X"));
        assert_eq!(
            d.commands,
            vec![
                DrawCommand::Circle {
                    center: Point::new(60.0, 50.0),
                    radius: 50.0,
                    class: ShapeClass::NodeCircle,
                },
                DrawCommand::Text {
                    position: Point::new(60.0, 50.0),
                    content: "X".to_string(),
                    class: ShapeClass::NodeText,
                },
            ]
        );
        assert_eq!(d.origin, Point::new(0.0, 0.0));
        assert_eq!((d.width, d.height), (220.0, 210.0));
    }

    #[test]
    fn test_direct_connectors() {
        let tree = Tree::node("r", vec![Tree::leaf("a"), Tree::leaf("b")]);
        let d = drawing(&tree);
        let lines: Vec<_> = d.with_class(ShapeClass::Connector).cloned().collect();
        assert_eq!(
            lines,
            vec![
                DrawCommand::line(Point::new(125.0, 80.0), Point::new(60.0, 170.0)),
                DrawCommand::line(Point::new(125.0, 80.0), Point::new(190.0, 170.0)),
            ]
        );
        assert_eq!(d.with_class(ShapeClass::RelationMarker).count(), 0);
    }

    #[test]
    fn test_comb_connectors() {
        let tree = Tree::node("r", vec![Tree::leaf("a"), Tree::leaf("b")])
            .with_relation(RelationType::And);
        let d = drawing(&tree);

        assert_eq!(
            d.commands[..6].to_vec(),
            vec![
                DrawCommand::line(Point::new(125.0, 80.0), Point::new(125.0, 95.0)),
                DrawCommand::Circle {
                    center: Point::new(125.0, 110.0),
                    radius: 15.0,
                    class: ShapeClass::RelationMarker,
                },
                DrawCommand::Text {
                    position: Point::new(125.0, 110.0),
                    content: "AND".to_string(),
                    class: ShapeClass::RelationText,
                },
                DrawCommand::line(Point::new(125.0, 125.0), Point::new(125.0, 140.0)),
                DrawCommand::line(Point::new(125.0, 140.0), Point::new(60.0, 140.0)),
                DrawCommand::line(Point::new(60.0, 140.0), Point::new(60.0, 170.0)),
            ]
        );
        assert_eq!(d.with_class(ShapeClass::Connector).count(), 6);
    }

    #[test]
    fn test_connectors_precede_nodes() {
        let tree = Tree::node(
            "r",
            vec![Tree::node("a", vec![Tree::leaf("a1")]), Tree::leaf("b")],
        )
        .with_relation(RelationType::Or);
        let d = drawing(&tree);
        let first_node = d
            .commands
            .iter()
            .position(|c| matches!(c.class(), ShapeClass::NodeRect | ShapeClass::NodeCircle))
            .unwrap();
        assert!(d.commands[first_node..]
            .iter()
            .all(|c| !matches!(c.class(), ShapeClass::Connector | ShapeClass::RelationMarker)));
    }

    #[test]
    fn test_internal_node_is_rect() {
        let tree = Tree::node("r", vec![Tree::leaf("a")]);
        let d = drawing(&tree);
        let rects: Vec<_> = d.with_class(ShapeClass::NodeRect).cloned().collect();
        assert_eq!(
            rects,
            vec![DrawCommand::Rect {
                x: 0.0,
                y: 20.0,
                width: 120.0,
                height: 60.0,
                class: ShapeClass::NodeRect,
            }]
        );
        assert_eq!(d.with_class(ShapeClass::NodeCircle).count(), 1);
    }

    #[test]
    fn test_multiline_label_centered() {
        let d = drawing(&Tree::leaf("alpha beta gamma delta"));
        let ys: Vec<f64> = d
            .with_class(ShapeClass::NodeText)
            .map(|c| match c {
                DrawCommand::Text { position, .. } => position.y,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ys, vec![43.0, 57.0]);
    }

    #[test]
    fn test_label_lines_trimmed() {
        let d = drawing(&Tree::leaf("Authentication service"));
        let texts: Vec<&str> = d
            .with_class(ShapeClass::NodeText)
            .map(|c| match c {
                DrawCommand::Text { content, .. } => content.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts, vec!["Authentication", "service"]);
    }

    #[test]
    fn test_missing_coordinates() {
        let tree = Tree::leaf("x");
        let layout = compute_widths(&tree, 0);
        let err = draw(&layout, &GeometryConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::MissingCoordinates { name } if name == "x"));
    }

    #[test]
    fn test_non_finite_coordinates() {
        let tree = Tree::leaf("x");
        let mut layout = compute_widths(&tree, 0);
        layout.position = Some(Point::new(f64::NAN, 0.0));
        let err = draw(&layout, &GeometryConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::NonFiniteCoordinate { .. }));
    }

    #[test]
    fn test_large_leaf_radius_grows_canvas() {
        let geometry = GeometryConfig::default().with_leaf_radius(80.0);
        let tree = Tree::leaf("x");
        let layout = compute(&tree, &geometry, &TreeLimits::default()).unwrap();
        let d = draw(&layout, &geometry).unwrap();
        // circle spans x -20..140 and y -30..130
        assert_eq!(d.origin, Point::new(-20.0, -30.0));
        assert_eq!((d.width, d.height), (20.0 + 140.0 + 100.0, 30.0 + 130.0 + 100.0));
    }

    #[test]
    fn test_tall_rect_moves_origin_up() {
        let geometry = GeometryConfig::default().with_node_size(120.0, 160.0);
        let tree = Tree::node("r", vec![Tree::leaf("a")]);
        let layout = compute(&tree, &geometry, &TreeLimits::default()).unwrap();
        let d = draw(&layout, &geometry).unwrap();

        // root rect top is 50 - 80
        assert_eq!(d.origin, Point::new(0.0, -30.0));
        let top = d
            .with_class(ShapeClass::NodeRect)
            .map(|c| match c {
                DrawCommand::Rect { y, .. } => *y,
                _ => unreachable!(),
            })
            .fold(f64::MAX, f64::min);
        assert!(top >= d.origin.y);
    }
}
