//! Activity log types
//!
//! Every job carries an append-only activity log. Entries are only ever
//! added, never edited or removed, and each mutation batches its entries
//! into a single append.

use serde::{Deserialize, Serialize};

/// One entry in a job's activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub actor: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ActivityEntry {
    /// Entry with no field diff (creation, status changes)
    pub fn event(
        kind: ActivityKind,
        actor: impl Into<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            kind,
            field: None,
            old_value: None,
            new_value: None,
            actor: actor.into(),
            timestamp,
        }
    }

    /// Entry recording a single field change
    pub fn diff(
        kind: ActivityKind,
        field: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
        actor: impl Into<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            kind,
            field: Some(field.into()),
            old_value,
            new_value,
            actor: actor.into(),
            timestamp,
        }
    }
}

/// What an activity entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Created,
    StatusChanged,
    Assigned,
    NoteAdded,
    Updated,
}
