// src/record.rs
//
// What one fetch of one product page boils down to. Built fresh every cycle
// and never mutated afterwards; the snapshot keeps the last one per URL.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Labelled description values, in first-seen order.
pub type Description = IndexMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub phase: Option<String>,
    pub released_time: Option<String>,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub unlabeled_notes: Vec<String>,
    pub checked_at: NaiveDateTime,
}

impl ProductRecord {
    /// Empty record checked at `checked_at`.
    pub fn at(checked_at: NaiveDateTime) -> Self {
        Self {
            phase: None,
            released_time: None,
            description: Description::new(),
            unlabeled_notes: Vec::new(),
            checked_at,
        }
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn with_released_time(mut self, time: impl Into<String>) -> Self {
        self.released_time = Some(time.into());
        self
    }

    pub fn with_field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.description.insert(label.into(), value.into());
        self
    }
}
