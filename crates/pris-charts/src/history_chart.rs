//! Price-history chart component with hover tooltip

use crate::{
    canvas::CanvasSurface,
    price_history::{lookup_nearest, render, ChartSize, NearestPoint, PriceChartStyle},
    surface::DrawSurface,
};
use leptos::prelude::*;
use pris_core::PricePoint;

/// Price-history chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub height: f64,
    pub show_tooltip: bool,
    pub style: PriceChartStyle,
    /// Tooltip offset from the pointer, in pixels
    pub tooltip_offset: (f64, f64),
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 200.0,
            show_tooltip: true,
            style: PriceChartStyle::default(),
            tooltip_offset: (-80.0, -60.0),
        }
    }
}

impl ChartConfig {
    /// Small chart for product cards
    pub fn compact() -> Self {
        Self {
            height: 120.0,
            show_tooltip: false,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Tooltip {
    nearest: NearestPoint,
    left: f64,
    top: f64,
}

/// Canvas chart of a product's price history
#[component]
pub fn PriceHistoryChart(
    #[prop(into)] points: Signal<Vec<PricePoint>>,
    #[prop(optional)] config: Option<ChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let height = config.height;
    let show_tooltip = config.show_tooltip;
    let style = config.style;
    let (offset_x, offset_y) = config.tooltip_offset;

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let tooltip = RwSignal::new(None::<Tooltip>);

    let resized = RwSignal::new(0u32);
    let resize_listener =
        window_event_listener(leptos::ev::resize, move |_| resized.update(|n| *n += 1));
    on_cleanup(move || resize_listener.remove());

    // Full redraw whenever the data, the viewport or the mounted canvas changes
    Effect::new(move |_| {
        resized.track();
        let data = points.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let Some((mut surface, width, height)) = CanvasSurface::prepare(&canvas) else {
            tracing::warn!("2d canvas context unavailable");
            return;
        };

        surface.clear(width, height);
        render(&data, ChartSize::new(width, height), &style, &mut surface);
    });

    let on_mouse_move = move |ev: web_sys::MouseEvent| {
        if !show_tooltip {
            return;
        }
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };

        let rect = canvas.get_bounding_client_rect();
        let x = ev.client_x() as f64 - rect.left();
        let y = ev.client_y() as f64 - rect.top();
        let size = ChartSize::new(rect.width(), rect.height());

        let hit = points.with_untracked(|data| lookup_nearest(x, size, data));
        tooltip.set(hit.map(|nearest| Tooltip {
            nearest,
            left: x + offset_x,
            top: y + offset_y,
        }));
    };

    view! {
        <div
            class="price-history-chart"
            style=format!("position: relative; width: 100%; height: {}px;", height)
        >
            <canvas
                node_ref=canvas_ref
                class="phc-canvas"
                style="width: 100%; height: 100%; cursor: crosshair;"
                on:mousemove=on_mouse_move
                on:mouseleave=move |_| tooltip.set(None)
            />

            {move || {
                tooltip.get().map(|t| {
                    view! {
                        <div
                            class="phc-tooltip"
                            style=format!("left: {:.0}px; top: {:.0}px;", t.left, t.top)
                        >
                            <div class="phc-tooltip-price">{t.nearest.price_label}</div>
                            <div class="phc-tooltip-date">{t.nearest.date_label}</div>
                        </div>
                    }
                })
            }}
        </div>
    }
}
