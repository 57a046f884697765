//! Drawing port and the non-browser backends

use crate::chartkit::line_path;
use std::fmt::Write;

/// Horizontal anchoring of a text run relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn canvas_value(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    pub fn svg_anchor(&self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

/// Stroke style for lines and outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    /// Round caps and joins
    pub round: bool,
}

impl Stroke {
    pub const fn new(color: &'static str, width: f64) -> Self {
        Self { color, width, round: false }
    }

    pub const fn rounded(mut self) -> Self {
        self.round = true;
        self
    }
}

/// Font and placement for a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: &'static str,
    pub font_size: f64,
    pub font_family: &'static str,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }
}

/// Strategy trait for drawing backends
pub trait DrawSurface {
    /// Reset the surface to a blank `width` x `height` area
    fn clear(&mut self, width: f64, height: f64);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke);

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke);

    fn circle(&mut self, center: (f64, f64), radius: f64, fill: &'static str, outline: Option<&Stroke>);

    /// Draw `text` with its baseline at `at.1`
    fn text(&mut self, text: &str, at: (f64, f64), style: &TextStyle);
}

// ============================================================================
// RECORDING SURFACE
// ============================================================================

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Line { from: (f64, f64), to: (f64, f64), stroke: Stroke },
    Polyline { points: Vec<(f64, f64)>, stroke: Stroke },
    Circle { center: (f64, f64), radius: f64, fill: &'static str, outline: Option<Stroke> },
    Text { text: String, at: (f64, f64), style: TextStyle },
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circles(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, .. } => Some(*center),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[(f64, f64)]> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke: *stroke });
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke: *stroke,
        });
    }

    fn circle(&mut self, center: (f64, f64), radius: f64, fill: &'static str, outline: Option<&Stroke>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            outline: outline.copied(),
        });
    }

    fn text(&mut self, text: &str, at: (f64, f64), style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}

// ============================================================================
// SVG SURFACE
// ============================================================================

/// Surface that serializes draw calls into a standalone SVG document
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    fn stroke_attrs(stroke: &Stroke) -> String {
        let mut attrs = format!(r#"stroke="{}" stroke-width="{}""#, stroke.color, stroke.width);
        if stroke.round {
            attrs.push_str(r#" stroke-linecap="round" stroke-linejoin="round""#);
        }
        attrs
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        let _ = write!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            Self::stroke_attrs(stroke)
        );
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="none" {}/>"#,
            line_path(points),
            Self::stroke_attrs(stroke)
        );
    }

    fn circle(&mut self, center: (f64, f64), radius: f64, fill: &'static str, outline: Option<&Stroke>) {
        let outline_attrs = outline.map(Self::stroke_attrs).unwrap_or_default();
        let _ = write!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" {}/>"#,
            center.0, center.1, radius, fill, outline_attrs
        );
    }

    fn text(&mut self, text: &str, at: (f64, f64), style: &TextStyle) {
        let _ = write!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" fill="{}" font-size="{}" font-family="{}" text-anchor="{}">{}</text>"#,
            at.0,
            at.1,
            style.color,
            style.font_size,
            style.font_family,
            style.align.svg_anchor(),
            escape_xml(text)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: TextStyle = TextStyle {
        color: "#64748b",
        font_size: 12.0,
        font_family: "Inter, sans-serif",
        align: TextAlign::Right,
    };

    #[test]
    fn test_recording_surface() {
        let mut surface = RecordingSurface::new();
        surface.clear(100.0, 50.0);
        surface.circle((10.0, 20.0), 4.0, "#8b5cf6", None);
        surface.text("30 kr", (5.0, 5.0), &LABEL);

        assert_eq!(surface.commands.len(), 3);
        assert_eq!(surface.circles().collect::<Vec<_>>(), vec![(10.0, 20.0)]);
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["30 kr"]);
    }

    #[test]
    fn test_svg_surface_output() {
        let mut surface = SvgSurface::new();
        surface.clear(200.0, 100.0);
        surface.polyline(&[(0.0, 0.0), (10.0, 10.0)], &Stroke::new("#8b5cf6", 3.0).rounded());
        surface.polyline(&[(0.0, 0.0)], &Stroke::new("#8b5cf6", 3.0));
        surface.text("<a & b>", (1.0, 2.0), &LABEL);

        let svg = surface.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"d="M0.00,0.00L10.00,10.00""#));
        assert!(svg.contains("stroke-linecap=\"round\""));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("&lt;a &amp; b&gt;"));
        assert!(svg.contains(r#"text-anchor="end""#));
    }
}
