//! Append-only store for invocation records.

use std::cmp::Reverse;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TelemetryResult;
use crate::record::{InvocationRecord, RecordId};

struct StoreInner {
    next_id: u64,
    records: Vec<InvocationRecord>,
}

/// In-process append-only log of invocation records.
///
/// Writers are serialized under one lock, which also assigns ids, so
/// appends are atomic and totally ordered. Readers take a snapshot under
/// the read lock and never observe a partially appended record. There is
/// deliberately no update or delete operation: cost and telemetry history
/// is immutable once written.
///
/// Pass the store by handle (`Arc<InvocationStore>`) to whoever needs it;
/// there is no process-global instance.
pub struct InvocationStore {
    inner: RwLock<StoreInner>,
}

impl InvocationStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }

    /// Validate and append a record, returning its assigned id.
    ///
    /// A record that already carries an id keeps it (replaying from a
    /// durable upstream); otherwise the store's sequence assigns one.
    pub fn append(&self, mut record: InvocationRecord) -> TelemetryResult<RecordId> {
        record.validate()?;

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let id = match record.id {
            Some(id) => {
                inner.next_id = inner.next_id.max(id.0 + 1);
                id
            }
            None => {
                let id = RecordId(inner.next_id);
                inner.next_id += 1;
                record.id = Some(id);
                id
            }
        };
        debug!(record_id = id.0, agent = %record.agent_name, "invocation appended");
        inner.records.push(record);
        Ok(id)
    }

    /// Snapshot of the most recent `limit` records, ordered by
    /// `created_at` descending, ties broken by id descending.
    pub fn query_recent(&self, limit: usize) -> Vec<InvocationRecord> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut records = inner.records.clone();
        drop(inner);

        records.sort_by_key(|r| Reverse((r.created_at, r.id)));
        records.truncate(limit);
        records
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InvocationStore {
    fn default() -> Self {
        Self::new()
    }
}
