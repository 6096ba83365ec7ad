//! In-memory source and sink

use log::debug;
use rustc_hash::FxHashMap;

use crate::common::traits::{Sink, Source, WriteMode};
use crate::error::{MasterWellsError, Result};
use crate::record_set::RecordSet;

/// A source and sink holding record sets in a map keyed by table name
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: FxHashMap<String, RecordSet>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `record_set` under `name`, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, record_set: RecordSet) -> &mut Self {
        self.tables.insert(name.into(), record_set);
        self
    }

    /// Look up a stored table
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RecordSet> {
        self.tables.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}

impl Source for MemoryStore {
    fn load(&self, logical_name: &str) -> Result<RecordSet> {
        self.tables
            .get(logical_name)
            .cloned()
            .ok_or_else(|| MasterWellsError::TableNotFound(logical_name.to_string()))
    }
}

impl Sink for MemoryStore {
    fn materialize(
        &mut self,
        record_set: &RecordSet,
        qualified_name: &str,
        mode: WriteMode,
    ) -> Result<()> {
        debug!("Materializing {qualified_name} in memory ({mode})");
        match mode {
            WriteMode::Overwrite => {
                self.tables
                    .insert(qualified_name.to_string(), record_set.clone());
            }
        }
        Ok(())
    }
}
