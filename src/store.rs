// src/store.rs
//
// Snapshot store: last successfully fetched record per tracked URL.
//
// - `put` only touches memory.
// - `flush` writes the whole mapping at once (temp file + rename), so the
//   file on disk is always some complete earlier flush.
// - A failed flush keeps everything in memory; the next flush writes it all.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::file::write_atomic;
use crate::record::ProductRecord;

pub type Snapshot = BTreeMap<String, ProductRecord>;

#[derive(Debug, Default)]
pub struct SnapshotStore {
    path: Option<PathBuf>,
    records: Snapshot,
    dirty: bool,
}

impl SnapshotStore {
    /// Store with no backing file; `flush` is a no-op.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the last flush from `path`. A missing file is an empty store;
    /// an unreadable or malformed one is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Snapshot::new(),
            Ok(text) => serde_json::from_str(&text)
                .map_err(|source| StoreError::Parse { path: path.clone(), source })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Snapshot::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        Ok(Self { path: Some(path), records, dirty: false })
    }

    pub fn get(&self, key: &str) -> Option<&ProductRecord> {
        self.records.get(key)
    }

    pub fn put(&mut self, key: impl Into<String>, record: ProductRecord) {
        self.records.insert(key.into(), record);
        self.dirty = true;
    }

    /// Unflushed changes exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.records
    }

    /// Durable write of the entire mapping.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            self.dirty = false;
            return Ok(());
        };
        let mut json = serde_json::to_vec_pretty(&self.records)?;
        json.push(b'\n');
        write_atomic(path, &json)
            .map_err(|source| StoreError::Write { path: path.clone(), source })?;
        self.dirty = false;
        Ok(())
    }
}
