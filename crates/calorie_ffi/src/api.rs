//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with a message, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - List responses are ordered by entry timestamp ascending and carry one
//!   chart value per row.

use calorie_core::db::open_db;
use calorie_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CalorieEntry, CalorieScreen, CalorieService, RepoResult, SqliteCalorieRepository,
    TrackerConfig,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the calorie list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalorieRowItem {
    /// Stable entry ID in string form.
    pub entry_id: String,
    /// `Calorie: <amount>`.
    pub title: String,
    /// Short local date/time; empty when the instant cannot be represented.
    pub detail: String,
    pub amount: i64,
    pub timestamp_ms: i64,
}

/// List + chart snapshot for the calorie screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CalorieListResponse {
    /// Rows in chronological order.
    pub items: Vec<CalorieRowItem>,
    /// Chart values, same order as `items`.
    pub chart_values: Vec<f64>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Result envelope for mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalorieActionResponse {
    pub ok: bool,
    /// Created entry ID, set by `calorie_add` on success.
    pub entry_id: Option<String>,
    /// Stored amount for `calorie_add`, removed row count for `calorie_reset`.
    pub value: Option<i64>,
    pub message: String,
}

impl CalorieActionResponse {
    fn success(message: impl Into<String>, entry_id: Option<String>, value: i64) -> Self {
        Self {
            ok: true,
            entry_id,
            value: Some(value),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            value: None,
            message: message.into(),
        }
    }
}

/// Records a calorie entry from the add prompt's raw text.
///
/// # FFI contract
/// - Text that is not an integer is stored as `0`; that is not a failure.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn calorie_add(text: String) -> CalorieActionResponse {
    match with_service(|service| service.create_entry(text.as_str())) {
        Ok(entry) => CalorieActionResponse::success(
            "Calorie entry added.",
            Some(entry.id.to_string()),
            i64::from(entry.amount),
        ),
        Err(err) => CalorieActionResponse::failure(format!("calorie_add failed: {err}")),
    }
}

/// Returns the ordered list rows and chart values.
///
/// # FFI contract
/// - Storage failures yield an empty list; `message` carries the reason.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn calorie_list() -> CalorieListResponse {
    match with_service(|service| service.try_entries()) {
        Ok(entries) => to_list_response(&entries),
        Err(err) => {
            warn!("event=calorie_list module=ffi status=error error={err}");
            CalorieListResponse {
                items: Vec::new(),
                chart_values: Vec::new(),
                message: format!("calorie_list failed: {err}"),
            }
        }
    }
}

/// Removes every stored entry.
#[flutter_rust_bridge::frb(sync)]
pub fn calorie_reset() -> CalorieActionResponse {
    match with_service(|service| service.reset()) {
        Ok(removed) => CalorieActionResponse::success(
            format!("Removed {removed} entr{}.", if removed == 1 { "y" } else { "ies" }),
            None,
            i64::try_from(removed).unwrap_or(i64::MAX),
        ),
        Err(err) => CalorieActionResponse::failure(format!("calorie_reset failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| TrackerConfig::from_env().db_path)
        .clone()
}

fn with_service<T>(
    f: impl FnOnce(&mut CalorieService<SqliteCalorieRepository<'_>>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("calorie DB open failed: {err}"))?;
    let repo = SqliteCalorieRepository::try_new(&conn)
        .map_err(|err| format!("calorie repo init failed: {err}"))?;
    let mut service = CalorieService::new(repo);
    f(&mut service).map_err(|err| err.to_string())
}

fn to_list_response(entries: &[CalorieEntry]) -> CalorieListResponse {
    let screen = CalorieScreen::from_entries(entries);
    let items = entries
        .iter()
        .zip(screen.rows())
        .map(|(entry, row)| CalorieRowItem {
            entry_id: entry.id.to_string(),
            title: row.title.clone(),
            detail: row.detail.clone().unwrap_or_default(),
            amount: i64::from(entry.amount),
            timestamp_ms: entry.timestamp_ms,
        })
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No entries.".to_string()
    } else {
        format!("Loaded {} entr{}.", items.len(), if items.len() == 1 { "y" } else { "ies" })
    };

    CalorieListResponse {
        items,
        chart_values: screen.chart().values.clone(),
        message,
    }
}
