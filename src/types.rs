//! Core types for the record store.

use std::fmt;

/// Bound for anything the store can hold: a record with a unique string
/// identifier. Two records with the same id occupy the same store slot.
///
/// `Clone` is required because events carry owned copies of records, and
/// `Send + Sync` because listeners may be invoked from any thread that
/// writes to the store.
pub trait Record: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    fn id(&self) -> &str;
}

/// Event published strictly before a write is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct BeforeWrite<T> {
    /// The value previously stored under this id, if any.
    pub previous: Option<T>,

    /// The value about to be written.
    pub new_value: T,
}

/// Event published strictly after a write is applied, carrying the
/// post-write value.
#[derive(Clone, Debug, PartialEq)]
pub struct AfterWrite<T> {
    pub value: T,
}

/// Identifies a listener within one channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Debug for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerId({})", self.0)
    }
}
