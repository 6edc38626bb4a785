use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Immutable, request-scoped copy of a record collection.
///
/// Snapshots are never edited; a newer fetch produces a snapshot with a higher
/// generation that replaces the previous one wholesale.
#[derive(Debug, Clone)]
pub struct RecordSnapshot<R> {
    generation: u64,
    fetched_at: DateTime<Utc>,
    records: Arc<[R]>,
}

impl<R> RecordSnapshot<R> {
    pub fn new(generation: u64, records: Vec<R>) -> Self {
        Self {
            generation,
            fetched_at: Utc::now(),
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn supersedes(&self, other: &Self) -> bool {
        self.generation > other.generation
    }
}

/// Shadow copy of one record while it is being edited.
///
/// The snapshot the record came from is untouched until the draft is saved
/// through the store.
#[derive(Debug, Clone)]
pub struct Draft<R> {
    original: R,
    current: R,
}

impl<R: Clone + PartialEq> Draft<R> {
    pub fn from_record(record: &R) -> Self {
        Self {
            original: record.clone(),
            current: record.clone(),
        }
    }

    pub fn edit<F>(&mut self, change: F)
    where
        F: FnOnce(&mut R),
    {
        change(&mut self.current);
    }

    pub fn is_dirty(&self) -> bool {
        self.original != self.current
    }

    pub fn original(&self) -> &R {
        &self.original
    }

    pub fn current(&self) -> &R {
        &self.current
    }

    pub fn discard(&mut self) {
        self.current = self.original.clone();
    }

    pub fn into_record(self) -> R {
        self.current
    }
}
