//! Bulk loader: reads a JSON array of records from a file and feeds each
//! one to a [`RecordSink`] in file order.

use crate::adapter::RecordSink;
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load every record in `path` into `sink`, synchronously and in file
/// order. Returns the number of records fed.
///
/// The whole file is parsed before the first record reaches the sink, so
/// a missing file or malformed content loads nothing. A sink error
/// mid-feed propagates; records already accepted stand.
pub fn load_records<T, P>(path: P, sink: &dyn RecordSink<T>) -> Result<usize>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let data = fs::read(path.as_ref())?;
    let records: Vec<T> = serde_json::from_slice(&data)?;
    let count = records.len();

    for record in records {
        sink.accept(record)?;
    }

    tracing::debug!(count, path = %path.as_ref().display(), "bulk load complete");
    Ok(count)
}
