// src/diff.rs
//
// Compare a fresh record against the last stored one.
//
// Order of reported fields is fixed: phase, released_time, then description
// labels in the order the *current* record lists them. Labels that vanished
// from the current description are not reported.

use crate::config::consts::UNKNOWN;
use crate::record::ProductRecord;

pub const PHASE: &str = "phase";
pub const RELEASED_TIME: &str = "released_time";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDiff {
    pub field_name: String,
    /// `None` when the previous record had no value for this field.
    pub old_value: Option<String>,
    /// `"unknown"` when the current record has no value.
    pub new_value: String,
}

impl FieldDiff {
    fn new(field: &str, old: Option<&str>, new: Option<&str>) -> Self {
        Self {
            field_name: s!(field),
            old_value: old.map(String::from),
            new_value: s!(new.unwrap_or(UNKNOWN)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Change {
    /// Store must be updated.
    pub changed: bool,
    /// No previous record existed; the caller stays silent.
    pub first_sighting: bool,
    pub diffs: Vec<FieldDiff>,
}

impl Change {
    /// Whether anyone should hear about this change.
    pub fn should_notify(&self) -> bool {
        self.changed && !self.first_sighting && !self.diffs.is_empty()
    }
}

pub fn detect(current: &ProductRecord, previous: Option<&ProductRecord>) -> Change {
    let Some(prev) = previous else {
        return Change {
            changed: true,
            first_sighting: true,
            diffs: against_nothing(current),
        };
    };

    let mut diffs = Vec::new();

    if current.phase != prev.phase {
        diffs.push(FieldDiff::new(PHASE, prev.phase.as_deref(), current.phase.as_deref()));
    }
    if current.released_time != prev.released_time {
        diffs.push(FieldDiff::new(
            RELEASED_TIME,
            prev.released_time.as_deref(),
            current.released_time.as_deref(),
        ));
    }
    for (label, value) in &current.description {
        let old = prev.description.get(label);
        if old != Some(value) {
            diffs.push(FieldDiff::new(label, old.map(String::as_str), Some(value.as_str())));
        }
    }

    Change { changed: !diffs.is_empty(), first_sighting: false, diffs }
}

/// Diffs of a first sighting: everything the record knows, old side unknown.
fn against_nothing(current: &ProductRecord) -> Vec<FieldDiff> {
    let mut diffs = Vec::new();
    if let Some(phase) = &current.phase {
        diffs.push(FieldDiff::new(PHASE, None, Some(phase.as_str())));
    }
    if let Some(time) = &current.released_time {
        diffs.push(FieldDiff::new(RELEASED_TIME, None, Some(time.as_str())));
    }
    for (label, value) in &current.description {
        diffs.push(FieldDiff::new(label, None, Some(value.as_str())));
    }
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn rec() -> ProductRecord {
        ProductRecord::at(NaiveDateTime::default())
    }

    #[test]
    fn first_sighting_of_empty_record_still_changes() {
        let change = detect(&rec(), None);
        assert!(change.changed);
        assert!(change.first_sighting);
        assert!(change.diffs.is_empty());
        assert!(!change.should_notify());
    }

    #[test]
    fn none_is_not_empty_string() {
        let prev = rec();
        let cur = rec().with_phase("");
        let change = detect(&cur, Some(&prev));
        assert!(change.changed);
        assert_eq!(change.diffs[0].old_value, None);
        assert_eq!(change.diffs[0].new_value, "");
    }

    #[test]
    fn lost_value_renders_unknown() {
        let prev = rec().with_released_time("2025-04");
        let cur = rec();
        let change = detect(&cur, Some(&prev));
        assert_eq!(change.diffs, vec![FieldDiff {
            field_name: s!(RELEASED_TIME),
            old_value: Some(s!("2025-04")),
            new_value: s!(UNKNOWN),
        }]);
    }

    #[test]
    fn checked_at_alone_is_not_a_change() {
        let prev = rec().with_phase("Released");
        let mut cur = prev.clone();
        cur.checked_at = NaiveDateTime::MAX;
        assert!(!detect(&cur, Some(&prev)).changed);
    }
}
