//! The sink capability and the chunked upsert driver.

use std::collections::HashMap;
use std::future::Future;

use moto_core::ShopRecord;
use thiserror::Error;

use crate::StoreError;

/// Records per upsert call.
pub const BATCH_SIZE: usize = 100;

/// A destination that accepts batched upserts keyed by `ShopRecord::id`.
///
/// One call to [`ShopSink::upsert`] is one round-trip to the destination.
/// Implementations must replace, not duplicate, a record whose `id` already
/// exists.
pub trait ShopSink {
    fn upsert(
        &self,
        records: &[ShopRecord],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// A chunk failed after `written` records had already been persisted.
#[derive(Debug, Error)]
#[error("batch {chunk} failed after {written} records were written: {source}")]
pub struct BatchError {
    /// Zero-based index of the failing chunk.
    pub chunk: usize,
    /// Records persisted by earlier chunks. These are not rolled back.
    pub written: usize,
    #[source]
    pub source: StoreError,
}

/// Upserts `records` in order, `batch_size` at a time (the last chunk may be
/// smaller).
///
/// Stops at the first failing chunk; later chunks are not attempted. Returns
/// the number of records written.
///
/// # Errors
///
/// Returns [`BatchError`] carrying the failing chunk index, the count already
/// written, and the sink's error.
///
/// # Panics
///
/// Panics if `batch_size` is zero.
pub async fn upsert_in_batches<S: ShopSink>(
    sink: &S,
    records: &[ShopRecord],
    batch_size: usize,
) -> Result<usize, BatchError> {
    assert!(batch_size > 0, "batch_size must be at least 1");

    let mut written = 0usize;
    for (chunk, batch) in records.chunks(batch_size).enumerate() {
        if let Err(source) = sink.upsert(batch).await {
            return Err(BatchError {
                chunk,
                written,
                source,
            });
        }
        written += batch.len();
        tracing::debug!(chunk, size = batch.len(), written, "batch upserted");
    }
    Ok(written)
}

/// Collapses duplicate ids within one batch, keeping the last occurrence at
/// the position of the first.
///
/// Postgres rejects an `ON CONFLICT DO UPDATE` statement that touches the same
/// row twice, and `PostgREST` forwards that error.
pub(crate) fn dedupe_last_wins(records: &[ShopRecord]) -> Vec<&ShopRecord> {
    let mut slot_by_id: HashMap<i64, usize> = HashMap::with_capacity(records.len());
    let mut out: Vec<&ShopRecord> = Vec::with_capacity(records.len());
    for record in records {
        if let Some(&slot) = slot_by_id.get(&record.id) {
            out[slot] = record;
        } else {
            slot_by_id.insert(record.id, out.len());
            out.push(record);
        }
    }
    out
}
