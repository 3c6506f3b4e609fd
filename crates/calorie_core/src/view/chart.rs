//! Chart series projection and plain-text rendering.

use crate::model::calorie::CalorieEntry;
use serde::Serialize;

/// 24-bit color used to tint chart areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GREEN: Rgb = Rgb(0x4c, 0xd9, 0x64);
pub const DARK_RED: Rgb = Rgb(0x8b, 0x1a, 0x1a);

/// Tinting of the area above and below `zero_level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesColors {
    pub above: Rgb,
    pub below: Rgb,
    pub zero_level: f64,
}

impl Default for SeriesColors {
    fn default() -> Self {
        // Zero-calorie entries still render as "above".
        Self {
            above: GREEN,
            below: DARK_RED,
            zero_level: -1.0,
        }
    }
}

/// Ordered amounts plotted by the chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartSeries {
    pub values: Vec<f64>,
    pub colors: SeriesColors,
}

impl ChartSeries {
    /// Builds the series from entries that are already in display order.
    pub fn from_entries(entries: &[CalorieEntry]) -> Self {
        Self {
            values: entries.iter().map(|entry| f64::from(entry.amount)).collect(),
            colors: SeriesColors::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }
}

/// Renders the series as a column chart, one column per value.
///
/// Columns above `zero_level` are drawn with `#`, columns at or below it
/// with `-`. The vertical scale spans `min(0, min)..=max`. Returns an empty
/// string for an empty series or a zero height.
pub fn render_text_chart(series: &ChartSeries, height: usize) -> String {
    let (Some(max), Some(min)) = (series.max(), series.min()) else {
        return String::new();
    };
    if height == 0 {
        return String::new();
    }

    let floor = min.min(0.0);
    let span = (max - floor).max(1.0);
    let levels: Vec<usize> = series
        .values
        .iter()
        .map(|value| (((value - floor) / span) * height as f64).round() as usize)
        .collect();

    let mut out = String::new();
    for row in (1..=height).rev() {
        let line: String = series
            .values
            .iter()
            .zip(&levels)
            .map(|(value, level)| {
                if *level < row {
                    ' '
                } else if *value > series.colors.zero_level {
                    '#'
                } else {
                    '-'
                }
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(&"=".repeat(series.len()));
    out.push('\n');
    out
}
