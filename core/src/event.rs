//! The event log: the simulation's structured, loss-free output.
//!
//! RULE: Records are append-only and immutable once appended.
//! Timestamps never decrease; within one timestamp, records keep the
//! order in which entities reported them. An external reporter consumes
//! the log as-is; the core never aggregates or reorders it.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One structured record: who reported what, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(with = "crate::types::duration_secs")]
    pub timestamp: Duration,
    pub id: EntityId,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Append-only, time-ordered sequence of [`EventRecord`]s.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn append(
        &mut self,
        timestamp: Duration,
        id: impl Into<EntityId>,
        event: impl Into<String>,
        data: Option<Value>,
    ) {
        self.records.push(EventRecord {
            timestamp,
            id: id.into(),
            event: event.into(),
            data,
        });
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
