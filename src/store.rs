//! The record store and its factory.

use crate::channel::{Channel, SubscriptionHandle};
use crate::error::{Result, StoreError};
use crate::types::{AfterWrite, BeforeWrite, Record};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::marker::PhantomData;

/// An in-memory table of records of one shape, keyed by identifier, with
/// before/after write notification.
///
/// Construct through [`StoreFactory::create`]; there is no public
/// constructor. Each instance owns its mapping and channels exclusively.
///
/// Writes serialize on a per-instance lock held across the whole
/// publish/mutate/publish sequence, so listeners observe a consistent
/// ordering. Listeners may read from the store, but must not call [`set`]
/// on the same store (the write lock is not re-entrant).
///
/// [`set`]: Store::set
pub struct Store<T: Record> {
    /// id -> record, in insertion order.
    records: RwLock<IndexMap<String, T>>,

    /// Fires strictly before a write is applied.
    before_write: Channel<BeforeWrite<T>>,

    /// Fires strictly after a write is applied.
    after_write: Channel<AfterWrite<T>>,

    /// Lock for write operations to ensure atomicity.
    write_lock: Mutex<()>,
}

impl<T: Record> Store<T> {
    fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
            before_write: Channel::new(),
            after_write: Channel::new(),
            write_lock: Mutex::new(()),
        }
    }

    // --- Write Path ---

    /// Insert or overwrite the record stored under `new_value.id()`.
    ///
    /// Publishes a [`BeforeWrite`] event (carrying the previous value, if
    /// any) before mutating the mapping, then an [`AfterWrite`] event with
    /// the value just written. Overwrites silently; last write wins.
    ///
    /// Rejects records whose identifier is empty.
    pub fn set(&self, new_value: T) -> Result<()> {
        if new_value.id().is_empty() {
            return Err(StoreError::MissingId);
        }

        let _lock = self.write_lock.lock();

        let previous = self.records.read().get(new_value.id()).cloned();
        tracing::debug!(id = new_value.id(), overwrite = previous.is_some(), "set");

        self.before_write.publish(&BeforeWrite {
            previous,
            new_value: new_value.clone(),
        });

        self.records
            .write()
            .insert(new_value.id().to_owned(), new_value.clone());

        self.after_write.publish(&AfterWrite { value: new_value });

        Ok(())
    }

    // --- Read Path ---

    /// Get the record stored under `id`, or `None`. A miss is not an error.
    pub fn get(&self, id: &str) -> Option<T> {
        self.records.read().get(id).cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Invoke `visitor` once per currently stored record, in insertion
    /// order.
    ///
    /// The visitor runs against a snapshot of the table, so it may read
    /// from or write to the store.
    pub fn visit(&self, mut visitor: impl FnMut(&T)) {
        let snapshot: Vec<T> = self.records.read().values().cloned().collect();
        for record in &snapshot {
            visitor(record);
        }
    }

    /// Return the record maximizing `score`, or `None` if the store is
    /// empty.
    ///
    /// A true maximum: scores may be negative or zero. Ties keep the first
    /// record encountered in insertion order.
    pub fn select_best<S: PartialOrd>(&self, score: impl Fn(&T) -> S) -> Option<T> {
        let records = self.records.read();

        let mut best: Option<(S, &T)> = None;
        for record in records.values() {
            let s = score(record);
            let beats = match &best {
                Some((best_score, _)) => s > *best_score,
                None => true,
            };
            if beats {
                best = Some((s, record));
            }
        }

        best.map(|(_, record)| record.clone())
    }

    // --- Notification ---

    /// Subscribe to events fired before each write. Returns an unsubscribe
    /// handle.
    pub fn on_before_write(
        &self,
        listener: impl Fn(&BeforeWrite<T>) + Send + Sync + 'static,
    ) -> SubscriptionHandle<BeforeWrite<T>> {
        self.before_write.subscribe(listener)
    }

    /// Subscribe to events fired after each write. Returns an unsubscribe
    /// handle.
    pub fn on_after_write(
        &self,
        listener: impl Fn(&AfterWrite<T>) + Send + Sync + 'static,
    ) -> SubscriptionHandle<AfterWrite<T>> {
        self.after_write.subscribe(listener)
    }
}

/// The sole construction path for [`Store`] instances of one record shape.
///
/// Every [`create`] call yields a fresh, independent store with an empty
/// mapping and fresh channels; nothing is shared between instances. This
/// is access control, not a process-wide singleton.
///
/// [`create`]: StoreFactory::create
pub struct StoreFactory<T: Record> {
    _shape: PhantomData<fn() -> T>,
}

impl<T: Record> StoreFactory<T> {
    pub fn new() -> Self {
        Self {
            _shape: PhantomData,
        }
    }

    /// Produce a new, independent store.
    pub fn create(&self) -> Store<T> {
        Store::new()
    }
}

impl<T: Record> Default for StoreFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Creature {
        id: String,
        attack: i64,
        defence: i64,
    }

    impl Record for Creature {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn creature(id: &str, attack: i64, defence: i64) -> Creature {
        Creature {
            id: id.into(),
            attack,
            defence,
        }
    }

    fn test_store() -> Store<Creature> {
        StoreFactory::new().create()
    }

    #[test]
    fn test_set_then_get() {
        let store = test_store();
        store.set(creature("1", 10, 5)).unwrap();

        assert_eq!(store.get("1"), Some(creature("1", 10, 5)));
        assert_eq!(store.get("2"), None);
    }

    #[test]
    fn test_set_rejects_empty_id() {
        let store = test_store();
        let err = store.set(creature("", 10, 5)).unwrap_err();

        assert!(matches!(err, StoreError::MissingId));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_is_upsert_not_append() {
        let store = test_store();
        store.set(creature("1", 10, 5)).unwrap();
        store.set(creature("1", 20, 5)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1"), Some(creature("1", 20, 5)));
    }

    #[test]
    fn test_select_best_empty_store() {
        let store = test_store();
        assert_eq!(store.select_best(|c| c.attack), None);
    }

    #[test]
    fn test_select_best_tie_keeps_first_inserted() {
        let store = test_store();
        store.set(creature("a", 50, 1)).unwrap();
        store.set(creature("b", 50, 2)).unwrap();

        let best = store.select_best(|c| c.attack).unwrap();
        assert_eq!(best.id, "a");
    }

    #[test]
    fn test_select_best_all_non_positive_scores_still_wins() {
        let store = test_store();
        store.set(creature("a", -30, 0)).unwrap();
        store.set(creature("b", -10, 0)).unwrap();
        store.set(creature("c", -20, 0)).unwrap();

        let best = store.select_best(|c| c.attack).unwrap();
        assert_eq!(best.id, "b");
    }
}
