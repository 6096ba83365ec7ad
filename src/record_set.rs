//! Name-indexed record sets
//!
//! A [`RecordSet`] is an Arrow [`RecordBatch`] whose column names are unique.
//! Columns are looked up by name rather than position, which is what the
//! union-by-name and enrichment steps rely on. Every operation returns a new
//! record set; the input is never modified.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::compute::concat_batches;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use rustc_hash::FxHashSet;

use crate::error::{MasterWellsError, Result};

/// An ordered collection of uniquely named columns of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    batch: RecordBatch,
}

impl RecordSet {
    /// Wrap a record batch, rejecting duplicate column names
    pub fn new(batch: RecordBatch) -> Result<Self> {
        check_unique_names(batch.schema_ref())?;
        Ok(Self { batch })
    }

    /// Concatenate batches sharing `schema` into a single record set
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        check_unique_names(&schema)?;
        let batch = concat_batches(&schema, batches)?;
        Ok(Self { batch })
    }

    /// Build a record set from `(name, array)` pairs in output order
    ///
    /// Every column becomes a nullable field.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, ArrayRef)>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, |(_, array)| array.len());
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns
            .into_iter()
            .map(|(name, array)| (Field::new(name, array.data_type().clone(), true), array))
            .unzip();
        Self::try_from_parts(Arc::new(Schema::new(fields)), arrays, num_rows)
    }

    /// An empty record set with no columns and `num_rows` rows
    pub fn empty(num_rows: usize) -> Self {
        let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
        let batch =
            RecordBatch::try_new_with_options(Arc::new(Schema::empty()), Vec::new(), &options)
                .unwrap_or_else(|_| RecordBatch::new_empty(Arc::new(Schema::empty())));
        Self { batch }
    }

    /// Build from a schema and matching columns, keeping `num_rows` for zero-column sets
    pub(crate) fn try_from_parts(
        schema: SchemaRef,
        columns: Vec<ArrayRef>,
        num_rows: usize,
    ) -> Result<Self> {
        check_unique_names(&schema)?;
        let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
        let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;
        Ok(Self { batch })
    }

    /// The underlying Arrow schema
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// The underlying record batch
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Consume the record set, returning the underlying batch
    #[must_use]
    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in output order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema_ref().index_of(name).is_ok()
    }

    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Look up a column that `stage` cannot do without
    pub fn require_column(&self, name: &str, stage: &str) -> Result<&ArrayRef> {
        self.column(name)
            .ok_or_else(|| MasterWellsError::missing_column(name, stage))
    }

    /// Return a new record set with `name` set to `array`
    ///
    /// An existing column keeps its position and is replaced; otherwise the
    /// column is appended.
    pub fn with_column(&self, name: &str, array: ArrayRef) -> Result<Self> {
        let schema = self.batch.schema_ref();
        let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
        let mut columns = self.batch.columns().to_vec();
        let field = Field::new(name, array.data_type().clone(), true);

        match schema.index_of(name) {
            Ok(idx) => {
                fields[idx] = field;
                columns[idx] = array;
            }
            Err(_) => {
                fields.push(field);
                columns.push(array);
            }
        }

        Self::try_from_parts(Arc::new(Schema::new(fields)), columns, self.num_rows())
    }

    /// Return a new record set with every column except `keep` renamed by `rename`
    pub fn rename_columns<F>(&self, keep: &str, rename: F) -> Result<Self>
    where
        F: Fn(&str) -> String,
    {
        let fields: Vec<Field> = self
            .batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| {
                if f.name() == keep {
                    f.as_ref().clone()
                } else {
                    f.as_ref().clone().with_name(rename(f.name()))
                }
            })
            .collect();
        Self::try_from_parts(
            Arc::new(Schema::new(fields)),
            self.batch.columns().to_vec(),
            self.num_rows(),
        )
    }
}

impl From<RecordSet> for RecordBatch {
    fn from(record_set: RecordSet) -> Self {
        record_set.batch
    }
}

fn check_unique_names(schema: &Schema) -> Result<()> {
    let mut seen = FxHashSet::default();
    for field in schema.fields() {
        if !seen.insert(field.name().as_str()) {
            return Err(MasterWellsError::DuplicateColumn(field.name().clone()));
        }
    }
    Ok(())
}
