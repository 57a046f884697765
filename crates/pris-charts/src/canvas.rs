//! Browser canvas backend for [`DrawSurface`]

use crate::surface::{DrawSurface, Stroke, TextStyle};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Size the canvas backing store for the device pixel ratio and return a
    /// surface drawing in logical (CSS) pixels, together with that size.
    pub fn prepare(canvas: &HtmlCanvasElement) -> Option<(Self, f64, f64)> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let rect = canvas.get_bounding_client_rect();
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| *r > 0.0)
            .unwrap_or(1.0);

        canvas.set_width((rect.width() * dpr) as u32);
        canvas.set_height((rect.height() * dpr) as u32);
        if let Err(e) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            tracing::warn!("Failed to scale canvas for dpr {}: {:?}", dpr, e);
        }

        Some((Self::new(ctx), rect.width(), rect.height()))
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        let cap = if stroke.round { "round" } else { "butt" };
        let join = if stroke.round { "round" } else { "miter" };
        self.ctx.set_line_cap(cap);
        self.ctx.set_line_join(join);
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.stroke();
    }

    fn circle(&mut self, center: (f64, f64), radius: f64, fill: &'static str, outline: Option<&Stroke>) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center.0, center.1, radius, 0.0, std::f64::consts::TAU) {
            tracing::warn!("Canvas arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        if let Some(stroke) = outline {
            self.apply_stroke(stroke);
            self.ctx.stroke();
        }
    }

    fn text(&mut self, text: &str, at: (f64, f64), style: &TextStyle) {
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_align(style.align.canvas_value());
        if let Err(e) = self.ctx.fill_text(text, at.0, at.1) {
            tracing::warn!("Canvas fill_text failed: {:?}", e);
        }
    }
}
