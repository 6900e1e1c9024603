use std::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::geometry::{PlotArea, ValueRange, bar_layout, line_path, pie_slices};
use super::{AXIS_COLOR, BACKGROUND, COLORS, TEXT_COLOR};
use crate::domain::analytics::{ChartPoint, NamedValue, PerformanceBar};
use crate::domain::logging::{LogComponent, get_logger};

const PADDING: f64 = 40.0;

/// Canvas 2D renderer for the dashboard charts
pub struct CanvasRenderer {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| JsValue::from_str("Failed to get 2D context"))?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))?;

        Ok(Self {
            context,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn clear(&self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
        self.context.set_fill_style(&JsValue::from(BACKGROUND));
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn color(index: usize) -> &'static str {
        COLORS[index % COLORS.len()]
    }

    fn render_no_data_message(&self) -> Result<(), JsValue> {
        self.context.set_fill_style(&JsValue::from(TEXT_COLOR));
        self.context.set_font("14px sans-serif");
        self.context.set_text_align("center");
        self.context.fill_text("Aucune donnée", self.width / 2.0, self.height / 2.0)
    }

    /// Pie with `name: NN%` labels outside each slice.
    pub fn render_pie(&self, slices: &[NamedValue]) -> Result<(), JsValue> {
        self.clear();
        let values: Vec<f64> = slices.iter().map(|slice| slice.value).collect();
        let geometry = pie_slices(&values);
        if geometry.is_empty() {
            return self.render_no_data_message();
        }

        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        let radius = (self.width.min(self.height) / 2.0 - PADDING).max(10.0);

        for slice in &geometry {
            self.context.begin_path();
            self.context.move_to(cx, cy);
            self.context.arc(cx, cy, radius, slice.start_angle, slice.end_angle)?;
            self.context.close_path();
            self.context.set_fill_style(&JsValue::from(Self::color(slice.index)));
            self.context.fill();
        }

        self.context.set_fill_style(&JsValue::from(TEXT_COLOR));
        self.context.set_font("11px sans-serif");
        self.context.set_text_align("center");
        for slice in &geometry {
            let label_radius = radius + 14.0;
            let angle = slice.mid_angle();
            let label = format!("{}: {:.0}%", slices[slice.index].name, slice.fraction * 100.0);
            self.context
                .fill_text(&label, cx + label_radius * angle.cos(), cy + label_radius * angle.sin())?;
        }

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("🥧 Rendered pie with {} slices", geometry.len()),
        );
        Ok(())
    }

    /// Vertical bars around a zero line, names under each bar.
    pub fn render_bars(&self, bars: &[PerformanceBar]) -> Result<(), JsValue> {
        self.clear();
        let values: Vec<f64> = bars.iter().map(|bar| bar.performance).collect();
        let area = PlotArea::new(self.width, self.height, PADDING);
        let layout = bar_layout(&values, area);
        if layout.bars.is_empty() {
            return self.render_no_data_message();
        }

        self.context.set_stroke_style(&JsValue::from(AXIS_COLOR));
        self.context.begin_path();
        self.context.move_to(area.left, layout.baseline_y);
        self.context.line_to(area.right(), layout.baseline_y);
        self.context.stroke();

        self.context.set_font("10px sans-serif");
        self.context.set_text_align("center");
        for (rect, bar) in layout.bars.iter().zip(bars) {
            self.context.set_fill_style(&JsValue::from(COLORS[0]));
            self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);

            self.context.set_fill_style(&JsValue::from(TEXT_COLOR));
            let center = rect.x + rect.width / 2.0;
            self.context.fill_text(&bar.name, center, area.bottom() + 14.0)?;
            let value_y = if rect.value >= 0.0 { rect.y - 4.0 } else { rect.y + rect.height + 12.0 };
            self.context.fill_text(&format!("{:.1}%", rect.value), center, value_y)?;
        }
        Ok(())
    }

    /// Price line with min/max labels on the left and first/last dates below.
    pub fn render_line(&self, points: &[ChartPoint]) -> Result<(), JsValue> {
        self.clear();
        let prices: Vec<f64> = points.iter().map(|point| point.price).collect();
        let area = PlotArea::new(self.width, self.height, PADDING);
        let path = line_path(&prices, area);
        let (Some(range), Some((first_x, first_y))) = (ValueRange::of(prices.iter().copied()), path.first().copied())
        else {
            return self.render_no_data_message();
        };

        self.context.set_stroke_style(&JsValue::from(COLORS[0]));
        self.context.set_line_width(2.0);
        self.context.begin_path();
        self.context.move_to(first_x, first_y);
        for (x, y) in path.iter().skip(1) {
            self.context.line_to(*x, *y);
        }
        self.context.stroke();

        if path.len() == 1 {
            self.context.begin_path();
            self.context.arc(first_x, first_y, 3.0, 0.0, TAU)?;
            self.context.set_fill_style(&JsValue::from(COLORS[0]));
            self.context.fill();
        }

        self.context.set_fill_style(&JsValue::from(TEXT_COLOR));
        self.context.set_font("11px sans-serif");
        self.context.set_text_align("left");
        self.context.fill_text(&format!("{:.2}", range.max), 4.0, area.top)?;
        self.context.fill_text(&format!("{:.2}", range.min), 4.0, area.bottom())?;

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            self.context.fill_text(&first.display_date, area.left, area.bottom() + 16.0)?;
            self.context.set_text_align("right");
            self.context.fill_text(&last.display_date, area.right(), area.bottom() + 16.0)?;
        }
        Ok(())
    }
}
