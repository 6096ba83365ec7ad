//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use master_wells::config::{
    DEFAULT_ENVIRONMENTAL_SOURCE, DEFAULT_OVERRIDE_SOURCE, DEFAULT_REGISTRY_SOURCE,
};
use master_wells::{MemoryStore, RecordSet};

/// A nullable string column
#[must_use]
pub fn utf8(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

/// Internal registry wells, identified by a raw `API` column
#[must_use]
pub fn registry_wells() -> RecordSet {
    RecordSet::from_columns(vec![
        ("API", utf8(&[Some("4250120123"), Some("42501201240000"), Some("123")])),
        ("WELL_NAME", utf8(&[Some("Smith 1-H"), Some("Jones 2"), Some("Brown 3")])),
        ("OPERATOR", utf8(&[Some("Acme"), Some("Acme"), None])),
    ])
    .expect("registry fixture")
}

/// Environmental wells; the first row shares its identifier with the registry
#[must_use]
pub fn environmental_wells() -> RecordSet {
    RecordSet::from_columns(vec![
        ("API", utf8(&[Some("4250120123"), Some("999")])),
        ("WELL_NAME", utf8(&[Some("SMITH 1H"), Some("Prism 9")])),
        ("ENV_STATUS", utf8(&[Some("producing"), Some("shut-in")])),
    ])
    .expect("environmental fixture")
}

/// Manual overrides keyed directly by `API14`
#[must_use]
pub fn well_overrides() -> RecordSet {
    RecordSet::from_columns(vec![
        ("API14", utf8(&[Some("42501201240000")])),
        ("WELL_NAME", utf8(&[Some("Jones 2 (corrected)")])),
        ("OVERRIDE_NAME", utf8(&[Some("Fixed Name")])),
    ])
    .expect("override fixture")
}

/// A memory store holding all three sources under their default names
#[must_use]
pub fn default_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .insert(DEFAULT_REGISTRY_SOURCE, registry_wells())
        .insert(DEFAULT_ENVIRONMENTAL_SOURCE, environmental_wells())
        .insert(DEFAULT_OVERRIDE_SOURCE, well_overrides());
    store
}

/// String values of a column, rendering nulls as `None`
#[must_use]
pub fn string_values(set: &RecordSet, column: &str) -> Vec<Option<String>> {
    let array = set
        .column(column)
        .unwrap_or_else(|| panic!("column {column} missing"));
    let strings = array
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap_or_else(|| panic!("column {column} is {:?}", array.data_type()));
    strings.iter().map(|v| v.map(str::to_string)).collect()
}

/// Write a CSV file under `dir`
pub fn write_csv_fixture(dir: &Path, file_name: &str, content: &str) {
    std::fs::write(dir.join(file_name), content).expect("write csv fixture");
}
