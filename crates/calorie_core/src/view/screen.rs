//! List rows and the screen state that keeps rows and chart in step.

use crate::model::calorie::CalorieEntry;
use crate::service::observer::{EntriesChanged, EntryChange, EntryObserver};
use crate::view::chart::ChartSeries;
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fmt::Display;

/// Short date followed by short time, e.g. `2/22/20, 3:04 PM`.
const ENTRY_TIME_FORMAT: &str = "%-m/%-d/%y, %-I:%M %p";

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    /// `Calorie: <amount>`.
    pub title: String,
    /// Local date/time of the entry; `None` when the instant is out of range.
    pub detail: Option<String>,
    pub amount: i32,
}

impl EntryRow {
    pub fn from_entry<Tz: TimeZone>(entry: &CalorieEntry, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            title: format!("Calorie: {}", entry.amount),
            detail: format_entry_time(entry.timestamp_ms, tz),
            amount: entry.amount,
        }
    }
}

/// Formats an epoch-milliseconds instant as short date + short time in `tz`.
pub fn format_entry_time<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: Display,
{
    tz.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|at| at.format(ENTRY_TIME_FORMAT).to_string())
}

/// Presentation state of the calorie screen.
///
/// Rows and chart are always projected from the same snapshot, so the chart
/// has exactly one value per row, in row order.
#[derive(Debug, Clone)]
pub struct CalorieScreen<Tz: TimeZone = Local> {
    rows: Vec<EntryRow>,
    chart: ChartSeries,
    tz: Tz,
}

impl CalorieScreen<Local> {
    /// Builds the screen in the machine's local time zone.
    pub fn from_entries(entries: &[CalorieEntry]) -> Self {
        Self::with_time_zone(entries, Local)
    }
}

impl<Tz: TimeZone> CalorieScreen<Tz>
where
    Tz::Offset: Display,
{
    pub fn with_time_zone(entries: &[CalorieEntry], tz: Tz) -> Self {
        let mut screen = Self {
            rows: Vec::new(),
            chart: ChartSeries::default(),
            tz,
        };
        screen.reload(entries);
        screen
    }

    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    pub fn chart(&self) -> &ChartSeries {
        &self.chart
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies a change event.
    ///
    /// Inserts are applied in place; anything else, or a projection that
    /// drifted from the snapshot, triggers a full reload.
    pub fn apply(&mut self, event: &EntriesChanged) {
        for change in &event.changes {
            match *change {
                EntryChange::Inserted { index }
                    if index <= self.rows.len() && index < event.entries.len() =>
                {
                    let entry = &event.entries[index];
                    self.rows.insert(index, EntryRow::from_entry(entry, &self.tz));
                    self.chart.values.insert(index, f64::from(entry.amount));
                }
                _ => {
                    self.reload(&event.entries);
                    return;
                }
            }
        }

        let in_step = self.rows.len() == event.entries.len()
            && self
                .rows
                .iter()
                .zip(&event.entries)
                .all(|(row, entry)| row.amount == entry.amount);
        if !in_step {
            self.reload(&event.entries);
        }
    }

    fn reload(&mut self, entries: &[CalorieEntry]) {
        self.rows = entries
            .iter()
            .map(|entry| EntryRow::from_entry(entry, &self.tz))
            .collect();
        self.chart = ChartSeries::from_entries(entries);
    }
}

impl<Tz: TimeZone> EntryObserver for CalorieScreen<Tz>
where
    Tz::Offset: Display,
{
    fn entries_changed(&mut self, event: &EntriesChanged) {
        self.apply(event);
    }
}
