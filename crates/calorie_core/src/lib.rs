//! Core domain logic for the calorie tracker.
//! This crate is the single source of truth for entry persistence, ordering,
//! change notification and the list/chart projections.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::calorie::{parse_amount, CalorieEntry, EntryId};
pub use repo::calorie_repo::{CalorieRepository, RepoError, RepoResult, SqliteCalorieRepository};
pub use service::calorie_service::CalorieService;
pub use service::observer::{
    EntriesChanged, EntryChange, EntryObserver, ObserverRegistry, SubscriptionId,
};
pub use view::{
    format_entry_time, render_text_chart, CalorieScreen, ChartSeries, EntryRow, SeriesColors,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
