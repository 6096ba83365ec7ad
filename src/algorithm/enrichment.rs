//! Left-join enrichment of a base record set against secondary sources
//!
//! Secondary columns are suffixed per source before the join so they never
//! overwrite base columns. The join key is `API14`, compared as strings.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::{Field, Schema};
use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::algorithm::identifier::{API14, ensure_join_key, key_strings};
use crate::error::{MasterWellsError, Result};
use crate::record_set::RecordSet;

/// A secondary source and the suffix its columns receive
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// Human-readable source name used in logs
    pub name: String,
    /// Suffix appended as `<column>_<suffix>`
    pub suffix: String,
    /// The secondary record set
    pub records: RecordSet,
}

impl Enrichment {
    /// Create a new enrichment from a named source
    pub fn new(name: impl Into<String>, suffix: impl Into<String>, records: RecordSet) -> Self {
        Self {
            name: name.into(),
            suffix: suffix.into(),
            records,
        }
    }
}

/// Rename every column of `secondary` except `API14` to `<name>_<suffix>`
pub fn suffix_columns(secondary: &RecordSet, suffix: &str) -> Result<RecordSet> {
    secondary.rename_columns(API14, |name| format!("{name}_{suffix}"))
}

/// Left outer join `base` with `secondary` on `API14`
///
/// Every base row appears once per matching secondary row, or once with null
/// secondary columns when nothing matches. Null keys never match. Base row
/// order is preserved and multiple matches follow secondary row order.
pub fn left_join(base: &RecordSet, secondary: &RecordSet, suffix: &str) -> Result<RecordSet> {
    let secondary = suffix_columns(&ensure_join_key(secondary)?, suffix)?;
    let base_keys = key_strings(base)?;
    let secondary_keys = key_strings(&secondary)?;

    let mut index: FxHashMap<&str, Vec<u32>> = FxHashMap::default();
    for (row, key) in secondary_keys.iter().enumerate() {
        if let Some(key) = key {
            index.entry(key).or_default().push(row_index(row)?);
        }
    }

    let mut left_rows: Vec<u32> = Vec::with_capacity(base.num_rows());
    let mut right_rows: Vec<Option<u32>> = Vec::with_capacity(base.num_rows());
    let mut duplicated = 0usize;
    for (row, key) in base_keys.iter().enumerate() {
        let matches = key.and_then(|k| index.get(k)).map_or(&[][..], Vec::as_slice);
        if matches.is_empty() {
            left_rows.push(row_index(row)?);
            right_rows.push(None);
            continue;
        }
        if matches.len() > 1 {
            duplicated += 1;
        }
        for &matched in matches {
            left_rows.push(row_index(row)?);
            right_rows.push(Some(matched));
        }
    }

    if duplicated > 0 {
        warn!(
            "{duplicated} base row(s) matched more than one '{suffix}' row on {API14} and were duplicated"
        );
    }

    let left_indices = UInt32Array::from(left_rows);
    let right_indices = UInt32Array::from(right_rows);
    debug!(
        "Joining '{suffix}': {} base rows -> {} rows, {} matched",
        base.num_rows(),
        left_indices.len(),
        right_indices.len() - right_indices.null_count()
    );

    let base_schema = base.schema();
    let secondary_schema = secondary.schema();
    let mut fields: Vec<Field> = base_schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns: Vec<ArrayRef> = base
        .batch()
        .columns()
        .iter()
        .map(|column| take(column.as_ref(), &left_indices, None))
        .collect::<std::result::Result<_, _>>()?;

    for (field, column) in secondary_schema
        .fields()
        .iter()
        .zip(secondary.batch().columns())
        .filter(|(field, _)| field.name() != API14)
    {
        if base.has_column(field.name()) {
            return Err(MasterWellsError::DuplicateColumn(field.name().clone()));
        }
        fields.push(field.as_ref().clone().with_nullable(true));
        columns.push(take(column.as_ref(), &right_indices, None)?);
    }

    RecordSet::try_from_parts(
        Arc::new(Schema::new(fields)),
        columns,
        left_indices.len(),
    )
}

/// Apply each enrichment in order, returning the final record set
pub fn enrich(base: &RecordSet, enrichments: &[Enrichment]) -> Result<RecordSet> {
    enrichments.iter().try_fold(base.clone(), |current, enrichment| {
        let joined = left_join(&current, &enrichment.records, &enrichment.suffix)?;
        info!(
            "Enriched with '{}' (suffix '{}'): {} rows, {} columns",
            enrichment.name,
            enrichment.suffix,
            joined.num_rows(),
            joined.num_columns()
        );
        Ok(joined)
    })
}

fn row_index(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| {
        MasterWellsError::Arrow(arrow::error::ArrowError::ComputeError(format!(
            "row {row} exceeds the join index range"
        )))
    })
}
