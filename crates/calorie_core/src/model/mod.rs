//! Domain model for calorie tracking.
//!
//! # Responsibility
//! - Define the data structures shared by storage, services and views.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.

pub mod calorie;
