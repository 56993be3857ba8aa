//! Append-only record store.
//!
//! Records live behind an [`Arc`] so a [`StoreSnapshot`] is a pointer copy.
//! `append` clones the backing vector only while a snapshot is still
//! outstanding; a snapshot never observes later appends.
//!
//! Store order is most-recent-first: appends insert at the front.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::model::record::{Record, RecordDraft};

/// Base of generated sequence numbers: the first generated id in an empty
/// store is `#CMP801`.
const ID_SEQUENCE_BASE: usize = 800;
const ID_PREFIX: &str = "#CMP";

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<Vec<Record>>,
    ids: HashSet<String>,
}

/// An immutable view of the store at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    records: Arc<Vec<Record>>,
}

impl StoreSnapshot {
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AsRef<[Record]> for StoreSnapshot {
    fn as_ref(&self) -> &[Record] {
        &self.records
    }
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records already in store order (front = newest).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] for the first repeated id.
    pub fn from_records(records: Vec<Record>) -> Result<Self, StoreError> {
        let mut ids = HashSet::with_capacity(records.len());
        for record in &records {
            if !ids.insert(record.id.clone()) {
                return Err(StoreError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }
        debug!(count = records.len(), "seeded record store");
        Ok(Self {
            records: Arc::new(records),
            ids,
        })
    }

    /// Validate a draft and insert it at the front of the store.
    ///
    /// String fields are trimmed. A missing or blank id is generated as
    /// `#CMP{800 + len + 1}`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::EmptyField`] if `user`, `project` or `address` is blank.
    /// - [`StoreError::DuplicateId`] if the resulting id is already taken,
    ///   whether it was supplied or generated.
    pub fn append(&mut self, draft: RecordDraft) -> Result<Record, StoreError> {
        let user = required(&draft.user, "user")?;
        let project = required(&draft.project, "project")?;
        let address = required(&draft.address, "address")?;

        let id = match draft.id.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => self.next_generated_id(),
        };
        if self.ids.contains(&id) {
            return Err(StoreError::DuplicateId { id });
        }

        let record = Record {
            id,
            user,
            project,
            address,
            timestamp: draft.date.to_timestamp(),
            status: draft.status,
        };

        self.ids.insert(record.id.clone());
        Arc::make_mut(&mut self.records).insert(0, record.clone());
        info!(id = %record.id, status = %record.status, total = self.len(), "appended record");
        Ok(record)
    }

    fn next_generated_id(&self) -> String {
        format!("{ID_PREFIX}{}", ID_SEQUENCE_BASE + self.records.len() + 1)
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct project names in store order, first occurrence wins.
    #[must_use]
    pub fn projects(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|record| record.project.as_str())
            .filter(|project| seen.insert(*project))
            .collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            records: Arc::clone(&self.records),
        }
    }
}

impl AsRef<[Record]> for RecordStore {
    fn as_ref(&self) -> &[Record] {
        &self.records
    }
}

fn required(value: &str, field: &'static str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
