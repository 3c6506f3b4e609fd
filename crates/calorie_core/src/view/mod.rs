//! Presentation projections for the calorie screen.
//!
//! # Responsibility
//! - Project the ordered entry snapshot into list rows and a chart series.
//! - Keep both projections derived from the same snapshot.
//!
//! # Invariants
//! - `chart.values[i]` is the amount shown by `rows[i]`.

mod chart;
mod screen;

pub use chart::{render_text_chart, ChartSeries, Rgb, SeriesColors, DARK_RED, GREEN};
pub use screen::{format_entry_time, CalorieScreen, EntryRow};
