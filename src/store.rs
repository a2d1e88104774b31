//! In-memory record store with monotonic ids.
//!
//! Ids start at 1 and increase by one per inserted record, across any number
//! of [`load`](RecordStore::load) calls. Only [`clear`](RecordStore::clear)
//! resets the counter. There is no per-record deletion.
//!
//! Reads hand out owned copies or shared borrows, so callers cannot change
//! stored data after the fact. The store has no internal locking; mutation
//! needs `&mut self`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::record::{Record, RecordSet, StoredRecord};
use crate::sink::Sink;

#[derive(Debug)]
pub struct RecordStore {
    records: BTreeMap<u64, Record>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Insert copies of `records` in order, assigning sequential ids.
    ///
    /// Returns the number inserted, which always equals `records.len()`.
    pub fn load(&mut self, records: &[Record]) -> usize {
        let first_id = self.next_id;
        for record in records {
            self.records.insert(self.next_id, record.clone());
            self.next_id += 1;
        }
        let inserted = records.len();
        debug!(inserted, first_id, next_id = self.next_id, "loaded records into store");
        inserted
    }

    /// A copy of the record stored under `id`.
    pub fn get(&self, id: u64) -> Option<Record> {
        self.records.get(&id).cloned()
    }

    /// A borrowed view of the record stored under `id`.
    pub fn get_ref(&self, id: u64) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Snapshot of all records in ascending id order.
    pub fn get_all(&self) -> RecordSet {
        self.records.values().cloned().collect()
    }

    /// Snapshot of all records with their ids, ascending.
    pub fn get_all_stored(&self) -> Vec<StoredRecord> {
        self.records
            .iter()
            .map(|(&id, record)| StoredRecord {
                id,
                record: record.clone(),
            })
            .collect()
    }

    /// Drop every record and restart ids at 1. No-op on an empty store.
    pub fn clear(&mut self) {
        self.records.clear();
        self.next_id = 1;
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next inserted record will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

impl Sink for RecordStore {
    fn load(&mut self, records: &[Record]) -> usize {
        RecordStore::load(self, records)
    }

    fn name(&self) -> &str {
        "STORE"
    }
}
