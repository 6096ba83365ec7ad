//! Union of two record sets by column name

use arrow::compute::concat_batches;

use crate::error::Result;
use crate::record_set::RecordSet;
use crate::schema::adapt::{align_record_batch, unify_schemas};

/// Combine all rows of `first` and `second`, aligning columns by name
///
/// The output keeps `first`'s column order and appends columns only found in
/// `second`. Rows of `first` come before rows of `second`, each in original
/// order; columns a row's originating set lacks are null.
pub fn union_by_name(first: &RecordSet, second: &RecordSet) -> Result<RecordSet> {
    let target = unify_schemas(&first.schema(), &second.schema())?;

    let aligned = [
        align_record_batch(first.batch(), &target)?,
        align_record_batch(second.batch(), &target)?,
    ];
    let num_rows = first.num_rows() + second.num_rows();

    if target.fields().is_empty() {
        return Ok(RecordSet::empty(num_rows));
    }

    RecordSet::new(concat_batches(&target, &aligned)?)
}
