use chrono::{DateTime, Utc};

use super::domain::{AuditAction, AuditEntity, AuditEntry, AuditEntryId};
use crate::clock::next_timestamp_id;

/// Append-only history of mutations, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new(entries: Vec<AuditEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(
        &mut self,
        action: AuditAction,
        entity: AuditEntity,
        entity_id: Option<u64>,
        detail: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &AuditEntry {
        let current_max = self.entries.iter().map(|entry| entry.id.0).max();
        let entry = AuditEntry {
            id: AuditEntryId(next_timestamp_id(now, current_max)),
            timestamp: now,
            action,
            entity,
            entity_id,
            detail: detail.into(),
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    pub fn for_entity(&self, entity_id: u64) -> impl Iterator<Item = &AuditEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.entity_id == Some(entity_id))
    }

    pub fn into_entries(self) -> Vec<AuditEntry> {
        self.entries
    }
}
