//! Pixel geometry for the 2D charts, kept free of any canvas calls so it can
//! be tested natively.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Drawable region inside a canvas of `width` x `height` pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(canvas_width: f64, canvas_height: f64, padding: f64) -> Self {
        Self {
            left: padding,
            top: padding,
            width: (canvas_width - padding * 2.0).max(0.0),
            height: (canvas_height - padding * 2.0).max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Min/max of the finite values in a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some(Self { min: v, max: v }),
                Some(Self { min, max }) => Some(Self { min: min.min(v), max: max.max(v) }),
            })
    }

    /// Widened so that zero is inside.
    pub fn including_zero(self) -> Self {
        Self { min: self.min.min(0.0), max: self.max.max(0.0) }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    /// Position in the input, used to pick the palette color.
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fraction: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Slices clockwise from twelve o'clock. Non-positive values get no slice;
/// an all-zero input yields no slices.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = -FRAC_PI_2;
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite() && **v > 0.0)
        .map(|(index, value)| {
            let fraction = value / total;
            let start_angle = angle;
            angle += fraction * TAU;
            PieSlice { index, start_angle, end_angle: angle, fraction }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Y of the zero line. Positive bars grow up from it, negative ones down.
    pub baseline_y: f64,
    pub bars: Vec<BarRect>,
}

/// Fraction of each slot left empty between bars
pub const BAR_GAP_RATIO: f64 = 0.25;

pub fn bar_layout(values: &[f64], area: PlotArea) -> BarLayout {
    let Some(range) = ValueRange::of(values.iter().copied()).map(ValueRange::including_zero) else {
        return BarLayout { baseline_y: area.bottom(), bars: Vec::new() };
    };

    let span = range.span();
    let scale = if span > 0.0 { area.height / span } else { 0.0 };
    let baseline_y = area.top + range.max * scale;
    let slot = area.width / values.len() as f64;
    let width = slot * (1.0 - BAR_GAP_RATIO);

    let bars = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let value = if value.is_finite() { *value } else { 0.0 };
            let height = value.abs() * scale;
            let y = if value >= 0.0 { baseline_y - height } else { baseline_y };
            BarRect {
                x: area.left + slot * i as f64 + (slot - width) / 2.0,
                y,
                width,
                height,
                value,
            }
        })
        .collect();

    BarLayout { baseline_y, bars }
}

/// Polyline through `values`, left to right. A flat series sits mid-height;
/// a single point is centered horizontally.
pub fn line_path(values: &[f64], area: PlotArea) -> Vec<(f64, f64)> {
    let Some(range) = ValueRange::of(values.iter().copied()) else {
        return Vec::new();
    };
    let span = range.span();
    let step = if values.len() > 1 { area.width / (values.len() - 1) as f64 } else { 0.0 };

    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, value)| {
            let x = if values.len() > 1 { area.left + step * i as f64 } else { area.left + area.width / 2.0 };
            let y = if span > 0.0 {
                area.bottom() - (value - range.min) / span * area.height
            } else {
                area.top + area.height / 2.0
            };
            (x, y)
        })
        .collect()
}
