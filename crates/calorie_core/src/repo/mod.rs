//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories only accept connections opened through `db::open_db*`.

pub mod calorie_repo;
