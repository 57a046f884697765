//! # pris-charts
//!
//! Price-history charting for PrisSjekk.
//!
//! ## Architecture
//!
//! Geometry is computed by pure functions and drawn through the
//! [`DrawSurface`] port, so the same chart can target a browser canvas, an
//! SVG string, or a recording surface in tests.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, paths
//! - `surface` - Drawing port plus SVG and recording backends
//! - `canvas` - `CanvasRenderingContext2d` backend
//! - `price_history` - Price-history geometry, renderer and pointer lookup
//! - `history_chart` - Leptos component wrapping the canvas renderer

pub mod canvas;
pub mod chartkit;
pub mod history_chart;
pub mod price_history;
pub mod surface;

pub use canvas::*;
pub use chartkit::*;
pub use history_chart::*;
pub use price_history::*;
pub use surface::*;

// Re-export colors from pris-core for convenience
pub use pris_core::colors;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Room for price labels on the left and date labels below
    pub const fn price_history() -> Self {
        Self::new(20.0, 40.0, 40.0, 60.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::price_history()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins); may be negative for tiny surfaces
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Inner height (excluding margins); may be negative for tiny surfaces
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Whether there is any plot area left after margins
    pub fn has_plot_area(&self) -> bool {
        self.inner_width() > 0.0 && self.inner_height() > 0.0
    }

    pub fn plot_left(&self) -> f64 {
        self.margin.left
    }

    pub fn plot_right(&self) -> f64 {
        self.margin.left + self.inner_width()
    }

    pub fn plot_top(&self) -> f64 {
        self.margin.top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.margin.top + self.inner_height()
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(400.0, 200.0)
    }
}
