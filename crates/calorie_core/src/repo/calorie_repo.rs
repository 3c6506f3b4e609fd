//! Calorie entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide append-only persistence over `calorie_entries`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `list_entries` is ordered by `timestamp_ms ASC`, ties broken by
//!   insertion order (`rowid ASC`).
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::calorie::{CalorieEntry, EntryId};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT
    uuid,
    amount,
    timestamp_ms
FROM calorie_entries";

const REQUIRED_COLUMNS: [&str; 4] = ["uuid", "amount", "timestamp_ms", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for calorie persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection was not bootstrapped through `open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// An entry with the same ID is already stored.
    DuplicateEntry(EntryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "calorie repository requires schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "calorie repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "calorie repository requires column `{column}` in table `{table}`"
            ),
            Self::DuplicateEntry(id) => write!(f, "calorie entry already exists: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted calorie entry data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::DuplicateEntry(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for calorie entries.
pub trait CalorieRepository {
    /// Appends one entry. Existing entries are never overwritten.
    fn insert_entry(&self, entry: &CalorieEntry) -> RepoResult<EntryId>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<CalorieEntry>>;
    /// Returns all entries in chronological order.
    fn list_entries(&self) -> RepoResult<Vec<CalorieEntry>>;
    fn count_entries(&self) -> RepoResult<u64>;
    /// Removes every entry and returns how many rows were dropped.
    fn clear_entries(&self) -> RepoResult<u64>;
}

/// SQLite-backed calorie repository.
pub struct SqliteCalorieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCalorieRepository<'conn> {
    /// Wraps a connection after verifying it was bootstrapped.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this build expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CalorieRepository for SqliteCalorieRepository<'_> {
    fn insert_entry(&self, entry: &CalorieEntry) -> RepoResult<EntryId> {
        let result = self.conn.execute(
            "INSERT INTO calorie_entries (uuid, amount, timestamp_ms)
             VALUES (?1, ?2, ?3);",
            params![entry.id.to_string(), entry.amount, entry.timestamp_ms],
        );

        match result {
            Ok(_) => Ok(entry.id),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::DuplicateEntry(entry.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<CalorieEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn list_entries(&self) -> RepoResult<Vec<CalorieEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL} ORDER BY timestamp_ms ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn count_entries(&self) -> RepoResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM calorie_entries;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn clear_entries(&self) -> RepoResult<u64> {
        let removed = self.conn.execute("DELETE FROM calorie_entries;", [])?;
        Ok(removed as u64)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<CalorieEntry> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in calorie_entries.uuid"
        ))
    })?;

    Ok(CalorieEntry {
        id,
        timestamp_ms: row.get("timestamp_ms")?,
        amount: row.get("amount")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "calorie_entries")? {
        return Err(RepoError::MissingRequiredTable("calorie_entries"));
    }

    for column in REQUIRED_COLUMNS {
        if !column_exists(conn, "calorie_entries", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "calorie_entries",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
