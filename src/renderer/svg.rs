//! SVG generation from drawing primitives

use crate::layout::Point;
use crate::stylesheet::Stylesheet;

use super::draw::{DrawCommand, Drawing, ShapeClass};
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
        }
    }

    /// Add CSS custom properties and class rules from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let palette = stylesheet.clone().sanitized().with_defaults();
        let properties = palette
            .colors
            .iter()
            .map(|(token, value)| format!("--{}: {};", token, value))
            .collect::<Vec<_>>()
            .join(" ");
        self.styles.push(format!(":root {{ {} }}", properties));

        let p = self.prefix();
        let font = palette.resolve_or_default("font-family");
        self.styles.extend([
            format!(
                ".{p}node-rect {{ fill: var(--node-fill); stroke: var(--node-stroke); stroke-width: 2; rx: 5; }}"
            ),
            format!(
                ".{p}node-circle {{ fill: var(--node-fill); stroke: var(--node-stroke); stroke-width: 2; }}"
            ),
            format!(
                ".{p}node-text {{ fill: var(--node-text); font-family: {font}; font-size: 12px; text-anchor: middle; dominant-baseline: middle; }}"
            ),
            format!(".{p}connection-line {{ stroke: var(--connector); stroke-width: 2; fill: none; }}"),
            format!(
                ".{p}relation-text {{ fill: var(--relation-text); font-family: {font}; font-size: 12px; font-weight: bold; text-anchor: middle; dominant-baseline: middle; }}"
            ),
            format!(
                ".{p}relation-bg {{ fill: var(--relation-fill); stroke: var(--relation-stroke); stroke-width: 2; }}"
            ),
        ]);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class_name(&self, class: ShapeClass) -> String {
        format!("{}{}", self.prefix(), class.css_name())
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a circle element
    pub fn add_circle(&mut self, center: Point, r: f64, class: ShapeClass) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"/>"#,
            self.indent_str(),
            self.class_name(class),
            center.x,
            center.y,
            r
        ));
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64, class: ShapeClass) {
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            self.class_name(class),
            x,
            y,
            w,
            h
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, from: Point, to: Point, class: ShapeClass) {
        self.elements.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            self.indent_str(),
            self.class_name(class),
            from.x,
            from.y,
            to.x,
            to.y
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &str, position: Point, class: ShapeClass) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}">{}</text>"#,
            self.indent_str(),
            self.class_name(class),
            position.x,
            position.y,
            escape_xml(text)
        ));
    }

    /// Add any drawing primitive
    pub fn add_command(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                class,
            } => self.add_circle(*center, *radius, *class),
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                class,
            } => self.add_rect(*x, *y, *width, *height, *class),
            DrawCommand::Line { from, to, class } => self.add_line(*from, *to, *class),
            DrawCommand::Text {
                position,
                content,
                class,
            } => self.add_text(content, *position, *class),
        }
    }

    /// Build the final SVG string for a `width` x `height` canvas whose
    /// top-left corner is `origin`
    pub fn build(self, origin: Point, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="{} {} {} {}" preserveAspectRatio="xMidYMid meet">"#,
            origin.x, origin.y, width, height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a drawing to an SVG string (with default stylesheet)
pub fn render_svg(drawing: &Drawing, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(drawing, config, &Stylesheet::default())
}

/// Render a drawing to an SVG string with a custom stylesheet
pub fn render_svg_with_stylesheet(
    drawing: &Drawing,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    for command in &drawing.commands {
        builder.add_command(command);
    }

    builder.build(drawing.origin, drawing.width, drawing.height)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
