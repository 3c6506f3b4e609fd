//! Calorie entry use-case service.
//!
//! # Responsibility
//! - Turn user input into persisted entries.
//! - Re-fetch the ordered snapshot after each mutation and notify observers.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Observers only hear about mutations that were committed.
//! - A failed snapshot re-fetch never turns a successful write into an error.

use crate::model::calorie::{parse_amount, CalorieEntry};
use crate::repo::calorie_repo::{CalorieRepository, RepoResult};
use crate::service::observer::{
    EntriesChanged, EntryChange, EntryObserver, ObserverRegistry, SubscriptionId,
};
use log::{info, warn};

/// Use-case service for recording and reading calorie entries.
pub struct CalorieService<R: CalorieRepository> {
    repo: R,
    observers: ObserverRegistry,
}

impl<R: CalorieRepository> CalorieService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            observers: ObserverRegistry::new(),
        }
    }

    /// Records an entry from free-form user text.
    ///
    /// # Contract
    /// - Text that is not a well-formed integer is recorded as `0`.
    /// - The entry is stamped with the current instant.
    /// - Returns the persisted entry.
    pub fn create_entry(&mut self, text: &str) -> RepoResult<CalorieEntry> {
        self.record(CalorieEntry::new(parse_amount(text)))
    }

    /// Records an already-parsed amount at the current instant.
    pub fn record_amount(&mut self, amount: i32) -> RepoResult<CalorieEntry> {
        self.record(CalorieEntry::new(amount))
    }

    /// Records an amount at a caller-provided instant (epoch milliseconds).
    pub fn record_amount_at(&mut self, amount: i32, timestamp_ms: i64) -> RepoResult<CalorieEntry> {
        self.record(CalorieEntry::at(amount, timestamp_ms))
    }

    /// Persists a prepared entry and notifies observers.
    pub fn record(&mut self, entry: CalorieEntry) -> RepoResult<CalorieEntry> {
        self.repo.insert_entry(&entry)?;
        info!(
            "event=entry_create module=service status=ok entry_id={} amount={}",
            entry.id, entry.amount
        );

        if let Some(entries) = self.refetch("entry_create") {
            if let Some(index) = entries.iter().position(|item| item.id == entry.id) {
                let changes = vec![EntryChange::Inserted { index }];
                self.observers.notify(&EntriesChanged { entries, changes });
            }
        }

        Ok(entry)
    }

    /// Returns all entries in chronological order.
    ///
    /// Storage errors are logged and reported as an empty list.
    pub fn entries(&self) -> Vec<CalorieEntry> {
        self.refetch("entries_fetch").unwrap_or_default()
    }

    /// Returns all entries in chronological order, surfacing storage errors.
    pub fn try_entries(&self) -> RepoResult<Vec<CalorieEntry>> {
        self.repo.list_entries()
    }

    /// Returns the number of stored entries.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_entries()
    }

    /// Removes every entry and notifies observers with a `Reset` change.
    pub fn reset(&mut self) -> RepoResult<u64> {
        let removed = self.repo.clear_entries()?;
        info!("event=entries_reset module=service status=ok removed={removed}");

        if let Some(entries) = self.refetch("entries_reset") {
            let changes = vec![EntryChange::Reset { removed }];
            self.observers.notify(&EntriesChanged { entries, changes });
        }

        Ok(removed)
    }

    /// Attaches an observer that hears every committed mutation.
    pub fn subscribe(&mut self, observer: impl EntryObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Detaches an observer. Returns `false` when the ID is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn refetch(&self, event: &'static str) -> Option<Vec<CalorieEntry>> {
        match self.repo.list_entries() {
            Ok(entries) => Some(entries),
            Err(err) => {
                warn!(
                    "event={event} module=service status=error error_code=fetch_failed error={err}"
                );
                None
            }
        }
    }
}
