//! Calorie entry domain model.
//!
//! # Responsibility
//! - Define the single persisted record: an instant plus an intake amount.
//! - Own the lenient text-to-amount coercion used by every input surface.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `timestamp_ms` is Unix epoch milliseconds in UTC.
//! - Entries are append-only; there is no update path.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one calorie entry.
pub type EntryId = Uuid;

/// One recorded calorie intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalorieEntry {
    pub id: EntryId,
    /// Unix epoch milliseconds of the moment the intake was recorded.
    pub timestamp_ms: i64,
    /// Kept within `i32` so chart values (`f64`) represent it exactly.
    pub amount: i32,
}

impl CalorieEntry {
    /// Creates an entry stamped with the current instant.
    pub fn new(amount: i32) -> Self {
        Self::at(amount, now_epoch_ms())
    }

    /// Creates an entry with a caller-provided instant.
    pub fn at(amount: i32, timestamp_ms: i64) -> Self {
        Self::with_id(Uuid::new_v4(), amount, timestamp_ms)
    }

    /// Creates an entry with caller-provided identity.
    ///
    /// Used by import paths and tests where the ID already exists.
    pub fn with_id(id: EntryId, amount: i32, timestamp_ms: i64) -> Self {
        Self {
            id,
            timestamp_ms,
            amount,
        }
    }
}

/// Coerces free-form user text into an amount.
///
/// A well-formed integer (optional `+`/`-` sign followed by ASCII digits,
/// within `i32` range) maps to exactly its value. Anything else, including
/// surrounding whitespace and out-of-range numbers, maps to `0`.
pub fn parse_amount(text: &str) -> i32 {
    text.parse::<i32>().unwrap_or(0)
}

/// Returns the current instant as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
