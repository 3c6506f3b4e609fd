//! Change notification for calorie entry snapshots.
//!
//! # Responsibility
//! - Deliver the ordered entry snapshot to subscribers after each mutation.
//! - Describe what changed so views can update incrementally.
//!
//! # Invariants
//! - Subscribers are notified in subscription order.
//! - An unsubscribed observer is never called again.

use crate::model::calorie::CalorieEntry;

/// One change applied to the ordered entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryChange {
    /// A new entry now sits at `index` in the ordered snapshot.
    Inserted { index: usize },
    /// Every entry was removed.
    Reset { removed: u64 },
}

/// Event delivered to observers after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntriesChanged {
    /// Full snapshot, ordered by timestamp ascending.
    pub entries: Vec<CalorieEntry>,
    pub changes: Vec<EntryChange>,
}

/// Receiver of entry change events.
pub trait EntryObserver {
    fn entries_changed(&mut self, event: &EntriesChanged);
}

impl<F: FnMut(&EntriesChanged)> EntryObserver for F {
    fn entries_changed(&mut self, event: &EntriesChanged) {
        self(event);
    }
}

/// Handle returned by `subscribe`, used to detach an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered set of active observers.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Box<dyn EntryObserver>)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn EntryObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detaches an observer. Returns `false` when the ID is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(current, _)| *current != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&mut self, event: &EntriesChanged) {
        for (_, observer) in &mut self.observers {
            observer.entries_changed(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntriesChanged, EntryChange, ObserverRegistry};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn reset_event() -> EntriesChanged {
        EntriesChanged {
            entries: Vec::new(),
            changes: vec![EntryChange::Reset { removed: 0 }],
        }
    }

    #[test]
    fn notify_runs_observers_in_subscription_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        let first = Rc::clone(&calls);
        registry.subscribe(Box::new(move |_: &EntriesChanged| first.borrow_mut().push("first")));
        let second = Rc::clone(&calls);
        registry.subscribe(Box::new(move |_: &EntriesChanged| {
            second.borrow_mut().push("second")
        }));

        registry.notify(&reset_event());
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_detaches_only_the_given_observer() {
        let calls = Rc::new(RefCell::new(0_u32));
        let mut registry = ObserverRegistry::new();
        assert!(registry.is_empty());

        let counter = Rc::clone(&calls);
        let id = registry.subscribe(Box::new(move |_: &EntriesChanged| {
            *counter.borrow_mut() += 1
        }));
        let counter = Rc::clone(&calls);
        registry.subscribe(Box::new(move |_: &EntriesChanged| {
            *counter.borrow_mut() += 10
        }));

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());

        registry.notify(&reset_event());
        assert_eq!(*calls.borrow(), 10);
    }
}
