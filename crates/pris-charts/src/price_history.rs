//! Price-history line chart: geometry, rendering and pointer lookup
//!
//! Everything here is a pure function of `(points, size)`. The geometry is
//! rebuilt from scratch on every call and the caller's points are never
//! reordered in place.

use crate::{
    chartkit::{IndexScale, LinearScale, Scale},
    colors,
    surface::{DrawSurface, Stroke, TextAlign, TextStyle},
    ChartDimensions, ChartMargin,
};
use pris_core::{format_nok_compact, price_bounds, sorted_by_date, PricePoint};

/// Number of vertical steps between gridlines (gridlines = steps + 1)
pub const GRID_STEPS: usize = 5;

/// Fraction of the price range added above and below the series
pub const PRICE_PADDING_RATIO: f64 = 0.1;

/// Drawing surface size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl ChartSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ChartSize {
    fn default() -> Self {
        Self::new(400.0, 200.0)
    }
}

/// Visual style of the price-history chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChartStyle {
    pub grid: Stroke,
    pub axis: Stroke,
    pub line: Stroke,
    pub marker_fill: &'static str,
    pub marker_radius: f64,
    pub marker_outline: Stroke,
    pub price_label: TextStyle,
    pub date_label: TextStyle,
    /// Gap between a price label and the plot area
    pub price_label_gap: f64,
    /// Distance from the plot bottom to the date label baseline
    pub date_label_offset: f64,
}

impl Default for PriceChartStyle {
    fn default() -> Self {
        Self {
            grid: Stroke::new(colors::GRID, 1.0),
            axis: Stroke::new(colors::AXIS, 1.0),
            line: Stroke::new(colors::PRIMARY, 3.0).rounded(),
            marker_fill: colors::PRIMARY,
            marker_radius: 4.0,
            marker_outline: Stroke::new(colors::MARKER_OUTLINE, 2.0),
            price_label: TextStyle {
                color: colors::TEXT_MUTED,
                font_size: 12.0,
                font_family: "Inter, sans-serif",
                align: TextAlign::Right,
            },
            date_label: TextStyle {
                color: colors::TEXT_MUTED,
                font_size: 11.0,
                font_family: "Inter, sans-serif",
                align: TextAlign::Center,
            },
            price_label_gap: 10.0,
            date_label_offset: 20.0,
        }
    }
}

/// Horizontal gridline with its price label
#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub y: f64,
    pub price: f64,
    pub label: String,
}

/// A sorted price point and where it lands on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlottedPoint {
    pub point: PricePoint,
    pub x: f64,
    pub y: f64,
}

/// Date tick under the x axis
#[derive(Debug, Clone, PartialEq)]
pub struct DateTick {
    pub index: usize,
    pub x: f64,
    pub label: String,
}

/// Result of a pointer lookup, carrying what a tooltip needs
#[derive(Debug, Clone, PartialEq)]
pub struct NearestPoint {
    pub index: usize,
    pub point: PricePoint,
    pub x: f64,
    pub y: f64,
    pub price_label: String,
    pub date_label: String,
}

/// Derived chart geometry for one `(points, size)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChartGeometry {
    pub dims: ChartDimensions,
    pub points: Vec<PricePoint>,
    pub padded_min: f64,
    pub padded_max: f64,
    y_scale: LinearScale,
    x_scale: IndexScale,
}

/// Price range padded on both sides; flat series get a synthetic range
pub fn padded_price_range(min_price: f64, max_price: f64) -> (f64, f64) {
    let mut range = max_price - min_price;
    if range <= 0.0 {
        range = (min_price.abs() * 0.1).max(1.0);
    }
    (
        min_price - range * PRICE_PADDING_RATIO,
        max_price + range * PRICE_PADDING_RATIO,
    )
}

impl PriceChartGeometry {
    /// Compute geometry, or `None` when there is nothing to draw
    pub fn compute(points: &[PricePoint], size: ChartSize) -> Option<Self> {
        let dims = ChartDimensions::new(size.width, size.height)
            .with_margin(ChartMargin::price_history());
        if !dims.has_plot_area() {
            return None;
        }

        let sorted = sorted_by_date(points);
        let (min_price, max_price) = price_bounds(&sorted)?;
        let (padded_min, padded_max) = padded_price_range(min_price, max_price);

        let y_scale = LinearScale::new()
            .domain(padded_min, padded_max)
            .range(dims.plot_bottom(), dims.plot_top());
        let x_scale = IndexScale::new(sorted.len()).range(dims.plot_left(), dims.plot_right());

        Some(Self {
            dims,
            points: sorted,
            padded_min,
            padded_max,
            y_scale,
            x_scale,
        })
    }

    pub fn x_for(&self, index: usize) -> f64 {
        self.x_scale.scale(index)
    }

    pub fn y_for(&self, price: f64) -> f64 {
        self.y_scale.scale(price)
    }

    /// Gridlines from `padded_max` (top) down to `padded_min` (bottom)
    pub fn gridlines(&self) -> Vec<Gridline> {
        self.y_scale
            .ticks(GRID_STEPS + 1)
            .into_iter()
            .rev()
            .map(|price| Gridline {
                y: self.y_for(price),
                price,
                label: format_nok_compact(price),
            })
            .collect()
    }

    pub fn plotted(&self) -> Vec<PlottedPoint> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| PlottedPoint {
                point: *p,
                x: self.x_for(i),
                y: self.y_for(p.price),
            })
            .collect()
    }

    /// Ticks for the first, middle and last point, without duplicates
    pub fn date_ticks(&self) -> Vec<DateTick> {
        let count = self.points.len();
        if count == 0 {
            return Vec::new();
        }

        let mut indices = vec![0, count / 2, count - 1];
        indices.dedup();
        indices
            .into_iter()
            .map(|index| DateTick {
                index,
                x: self.x_for(index),
                label: self.points[index].short_date(),
            })
            .collect()
    }

    /// Point nearest to a pointer x coordinate, if inside the plot area
    pub fn nearest(&self, pointer_x: f64) -> Option<NearestPoint> {
        let index = self.x_scale.nearest_index(pointer_x)?;
        let point = *self.points.get(index)?;
        Some(NearestPoint {
            index,
            point,
            x: self.x_for(index),
            y: self.y_for(point.price),
            price_label: format_nok_compact(point.price),
            date_label: point.long_date(),
        })
    }

    /// Draw the full chart onto `surface`
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, style: &PriceChartStyle) {
        let dims = &self.dims;
        surface.clear(dims.width, dims.height);

        for grid in self.gridlines() {
            surface.line((dims.plot_left(), grid.y), (dims.plot_right(), grid.y), &style.grid);
            surface.text(
                &grid.label,
                (dims.plot_left() - style.price_label_gap, grid.y + 4.0),
                &style.price_label,
            );
        }

        surface.line(
            (dims.plot_left(), dims.plot_bottom()),
            (dims.plot_right(), dims.plot_bottom()),
            &style.axis,
        );
        surface.line(
            (dims.plot_left(), dims.plot_top()),
            (dims.plot_left(), dims.plot_bottom()),
            &style.axis,
        );

        let plotted = self.plotted();
        if plotted.len() >= 2 {
            let path: Vec<(f64, f64)> = plotted.iter().map(|p| (p.x, p.y)).collect();
            surface.polyline(&path, &style.line);
        }
        for p in &plotted {
            surface.circle(
                (p.x, p.y),
                style.marker_radius,
                style.marker_fill,
                Some(&style.marker_outline),
            );
        }

        let label_y = dims.plot_bottom() + style.date_label_offset;
        for tick in self.date_ticks() {
            surface.text(&tick.label, (tick.x, label_y), &style.date_label);
        }
    }
}

/// Render a price history onto `surface`.
///
/// Empty input and surfaces too small for the padding box are a no-op.
pub fn render<S: DrawSurface + ?Sized>(
    points: &[PricePoint],
    size: ChartSize,
    style: &PriceChartStyle,
    surface: &mut S,
) {
    match PriceChartGeometry::compute(points, size) {
        Some(geometry) => geometry.draw(surface, style),
        None => tracing::trace!("Skipping price chart draw: nothing to plot"),
    }
}

/// Find the sorted point nearest to a pointer x coordinate.
///
/// Returns `None` outside `[left, left + chart_width]`.
pub fn lookup_nearest(pointer_x: f64, size: ChartSize, points: &[PricePoint]) -> Option<NearestPoint> {
    PriceChartGeometry::compute(points, size)?.nearest(pointer_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SvgSurface};
    use chrono::{TimeZone, Utc};

    fn point(price: f64, day: u32) -> PricePoint {
        PricePoint::new(price, Utc.with_ymd_and_hms(2025, 5, day, 7, 0, 0).unwrap())
    }

    fn series() -> Vec<PricePoint> {
        vec![
            point(32.9, 1),
            point(29.9, 5),
            point(34.5, 9),
            point(27.0, 13),
            point(31.0, 19),
        ]
    }

    const SIZE: ChartSize = ChartSize::new(400.0, 200.0);

    #[test]
    fn test_empty_series_draws_nothing() {
        let mut surface = RecordingSurface::new();
        render(&[], SIZE, &PriceChartStyle::default(), &mut surface);
        assert!(surface.is_empty());
        assert_eq!(lookup_nearest(100.0, SIZE, &[]), None);
    }

    #[test]
    fn test_too_small_surface_draws_nothing() {
        let mut surface = RecordingSurface::new();
        render(&series(), ChartSize::new(90.0, 200.0), &PriceChartStyle::default(), &mut surface);
        assert!(surface.is_empty());

        render(&series(), ChartSize::new(0.0, 0.0), &PriceChartStyle::default(), &mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_padding_applied_to_range() {
        let geometry = PriceChartGeometry::compute(&series(), SIZE).unwrap();
        let range = 34.5 - 27.0;
        assert!((geometry.padded_min - (27.0 - range * 0.1)).abs() < 1e-9);
        assert!((geometry.padded_max - (34.5 + range * 0.1)).abs() < 1e-9);
    }

    #[test]
    fn test_higher_price_maps_higher_on_screen() {
        let geometry = PriceChartGeometry::compute(&series(), SIZE).unwrap();
        let plotted = geometry.plotted();

        for a in &plotted {
            for b in &plotted {
                if a.point.price > b.point.price {
                    assert!(a.y < b.y, "{} should be above {}", a.point.price, b.point.price);
                }
            }
        }
        for p in &plotted {
            assert!(p.y > geometry.dims.plot_top() && p.y < geometry.dims.plot_bottom());
        }
    }

    #[test]
    fn test_points_spread_across_plot_width() {
        let geometry = PriceChartGeometry::compute(&series(), SIZE).unwrap();
        let xs: Vec<f64> = geometry.plotted().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![60.0, 135.0, 210.0, 285.0, 360.0]);
    }

    #[test]
    fn test_render_is_order_independent() {
        let style = PriceChartStyle::default();
        let mut forward = RecordingSurface::new();
        render(&series(), SIZE, &style, &mut forward);

        let mut shuffled_input = series();
        shuffled_input.reverse();
        shuffled_input.swap(1, 3);
        let mut shuffled = RecordingSurface::new();
        render(&shuffled_input, SIZE, &style, &mut shuffled);

        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_render_is_idempotent() {
        let style = PriceChartStyle::default();
        let mut first = SvgSurface::new();
        render(&series(), SIZE, &style, &mut first);
        let mut second = SvgSurface::new();
        render(&series(), SIZE, &style, &mut second);

        assert_eq!(first.finish(), second.finish());
    }

    #[test]
    fn test_draw_call_layout() {
        let mut surface = RecordingSurface::new();
        render(&series(), SIZE, &PriceChartStyle::default(), &mut surface);

        // 6 gridlines + 2 axes
        let lines = surface
            .commands
            .iter()
            .filter(|c| matches!(c, crate::surface::DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, GRID_STEPS + 1 + 2);
        assert_eq!(surface.polylines().count(), 1);
        assert_eq!(surface.circles().count(), 5);

        let texts: Vec<&str> = surface.texts().collect();
        assert_eq!(texts.len(), 6 + 3);
        assert_eq!(&texts[6..], &["1. mai", "9. mai", "19. mai"]);
    }

    #[test]
    fn test_gridlines_top_to_bottom() {
        let geometry = PriceChartGeometry::compute(&series(), SIZE).unwrap();
        let grid = geometry.gridlines();

        assert_eq!(grid.len(), 6);
        assert!((grid[0].y - geometry.dims.plot_top()).abs() < 1e-9);
        assert!((grid[5].y - geometry.dims.plot_bottom()).abs() < 1e-9);
        assert!((grid[0].price - geometry.padded_max).abs() < 1e-9);
        assert!(grid.windows(2).all(|w| w[0].price > w[1].price));
    }

    #[test]
    fn test_single_point_centered_without_line() {
        let points = vec![point(29.9, 19)];
        let mut surface = RecordingSurface::new();
        render(&points, SIZE, &PriceChartStyle::default(), &mut surface);

        assert_eq!(surface.polylines().count(), 0);
        let circles: Vec<_> = surface.circles().collect();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].0, 210.0);
        assert_eq!(surface.texts().filter(|t| *t == "19. mai").count(), 1);
    }

    #[test]
    fn test_flat_series_has_finite_geometry() {
        let points = vec![point(30.0, 1), point(30.0, 2), point(30.0, 3)];
        let geometry = PriceChartGeometry::compute(&points, SIZE).unwrap();

        assert!((geometry.padded_min - 29.7).abs() < 1e-9);
        assert!((geometry.padded_max - 30.3).abs() < 1e-9);
        let center = (geometry.dims.plot_top() + geometry.dims.plot_bottom()) / 2.0;
        for p in geometry.plotted() {
            assert!(p.y.is_finite());
            assert!((p.y - center).abs() < 1e-9);
        }
    }

    #[test]
    fn test_flat_zero_price_uses_unit_range() {
        assert_eq!(padded_price_range(0.0, 0.0), (-0.1, 0.1));
    }

    #[test]
    fn test_lookup_at_plot_edges() {
        let points = series();
        let first = lookup_nearest(60.0, SIZE, &points).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.point, point(32.9, 1));
        assert_eq!(first.price_label, "32,90\u{a0}kr");
        assert_eq!(first.date_label, "1. mai 2025");

        let last = lookup_nearest(360.0, SIZE, &points).unwrap();
        assert_eq!(last.index, 4);
        assert_eq!(last.point, point(31.0, 19));
        assert_eq!(last.price_label, "31\u{a0}kr");
    }

    #[test]
    fn test_lookup_outside_plot_is_none() {
        let points = series();
        assert_eq!(lookup_nearest(59.9, SIZE, &points), None);
        assert_eq!(lookup_nearest(360.1, SIZE, &points), None);
    }

    #[test]
    fn test_lookup_rounds_to_nearest_index() {
        let points = series();
        // points are 75px apart starting at x = 60
        assert_eq!(lookup_nearest(97.0, SIZE, &points).unwrap().index, 0);
        assert_eq!(lookup_nearest(98.0, SIZE, &points).unwrap().index, 1);
        let mid = lookup_nearest(215.0, SIZE, &points).unwrap();
        assert_eq!(mid.index, 2);
        assert_eq!(mid.x, 210.0);
    }

    #[test]
    fn test_lookup_uses_sorted_order() {
        let mut points = series();
        points.reverse();
        assert_eq!(lookup_nearest(60.0, SIZE, &points).unwrap().point, point(32.9, 1));
    }
}
