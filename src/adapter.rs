//! Adapter bridging an external record feed into store writes.

use crate::error::Result;
use crate::store::Store;
use crate::types::Record;

/// Capability to accept a single record. The seam between record
/// producers (such as the bulk loader) and whatever consumes them.
pub trait RecordSink<T> {
    fn accept(&self, record: T) -> Result<()>;
}

/// Forwards accepted records unchanged to [`Store::set`].
///
/// No transformation or validation happens here; anything `set` rejects
/// propagates to the feeder.
pub struct StoreAdapter<'a, T: Record> {
    store: &'a Store<T>,
}

impl<'a, T: Record> StoreAdapter<'a, T> {
    pub fn new(store: &'a Store<T>) -> Self {
        Self { store }
    }
}

impl<T: Record> RecordSink<T> for StoreAdapter<'_, T> {
    fn accept(&self, record: T) -> Result<()> {
        self.store.set(record)
    }
}
