//! Module for aligning record batches to a shared schema.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{MasterWellsError, Result};
use crate::schema::adapt::compatibility::{check_type_compatibility, determine_adaptation_strategy};
use crate::schema::adapt::conversions::{convert_array, create_null_array};
use crate::schema::adapt::types::{AdaptationStrategy, TypeCompatibility};

/// A per-column adaptation to be performed on one side of a union
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAdaptation {
    /// The field name to adapt
    pub field_name: String,
    /// The source data type (`Null` when the column is absent)
    pub source_type: DataType,
    /// The target data type
    pub target_type: DataType,
    /// The strategy for adaptation
    pub adaptation_strategy: AdaptationStrategy,
}

/// Build the union schema of `first` and `second`
///
/// The first schema's column order is kept and columns unique to the second
/// are appended. Shared columns get their common type; every field is
/// nullable since absent columns are null-filled.
pub fn unify_schemas(first: &Schema, second: &Schema) -> Result<SchemaRef> {
    let mut fields = Vec::with_capacity(first.fields().len() + second.fields().len());

    for field in first.fields() {
        let data_type = match second.field_with_name(field.name()) {
            Ok(other) => match check_type_compatibility(field.data_type(), other.data_type()) {
                TypeCompatibility::Exact => field.data_type().clone(),
                TypeCompatibility::Compatible(common) => {
                    debug!(
                        "Reconciling column '{}': {:?} + {:?} -> {common:?}",
                        field.name(),
                        field.data_type(),
                        other.data_type()
                    );
                    common
                }
                TypeCompatibility::Incompatible => {
                    return Err(MasterWellsError::SchemaUnion {
                        column: field.name().clone(),
                        left: field.data_type().clone(),
                        right: other.data_type().clone(),
                    });
                }
            },
            Err(_) => field.data_type().clone(),
        };
        fields.push(Field::new(field.name(), data_type, true));
    }

    for field in second.fields() {
        if first.field_with_name(field.name()).is_err() {
            fields.push(Field::new(field.name(), field.data_type().clone(), true));
        }
    }

    Ok(Arc::new(Schema::new(fields)))
}

/// List the adaptations needed to bring `source` to `target`
#[must_use]
pub fn plan_adaptations(source: &Schema, target: &Schema) -> Vec<SchemaAdaptation> {
    target
        .fields()
        .iter()
        .filter_map(|target_field| {
            let source_type = source
                .field_with_name(target_field.name())
                .map_or(DataType::Null, |f| f.data_type().clone());
            if source_type == *target_field.data_type() {
                return None;
            }
            let strategy = determine_adaptation_strategy(&source_type, target_field.data_type());
            Some(SchemaAdaptation {
                field_name: target_field.name().clone(),
                source_type,
                target_type: target_field.data_type().clone(),
                adaptation_strategy: strategy,
            })
        })
        .collect()
}

/// Convert a record batch to match the target schema
///
/// Columns are matched by name and brought to the target type following
/// [`plan_adaptations`]: absent columns become null columns, mismatched ones
/// are cast, and matching ones are reused as they are.
pub fn align_record_batch(batch: &RecordBatch, target_schema: &SchemaRef) -> Result<RecordBatch> {
    let source_schema = batch.schema();
    let plan: FxHashMap<String, SchemaAdaptation> = plan_adaptations(&source_schema, target_schema)
        .into_iter()
        .map(|adaptation| (adaptation.field_name.clone(), adaptation))
        .collect();

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(target_schema.fields().len());
    for target_field in target_schema.fields() {
        let name = target_field.name();
        let source = batch.column_by_name(name);
        let column = match (plan.get(name), source) {
            (None, Some(column)) => Arc::clone(column),
            (Some(adaptation), Some(column))
                if adaptation.adaptation_strategy != AdaptationStrategy::NullFill =>
            {
                debug!(
                    "Adapting '{name}' {:?} -> {:?} via {:?}",
                    adaptation.source_type, adaptation.target_type, adaptation.adaptation_strategy
                );
                convert_array(column, &adaptation.target_type)?
            }
            _ => {
                debug!("Adapting '{name}' via {:?}", AdaptationStrategy::NullFill);
                create_null_array(target_field.data_type(), batch.num_rows())
            }
        };
        columns.push(column);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    RecordBatch::try_new_with_options(Arc::clone(target_schema), columns, &options)
        .map_err(MasterWellsError::from)
}
