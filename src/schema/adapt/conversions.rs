//! Module for converting between different array types.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, new_null_array};
use arrow::compute::kernels::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;

use crate::error::{MasterWellsError, Result};

/// Convert an Arrow array to match the target data type
pub fn convert_array(array: &ArrayRef, target_type: &DataType) -> Result<ArrayRef> {
    if array.data_type() == target_type {
        return Ok(Arc::clone(array));
    }

    cast::cast(array, target_type).map_err(MasterWellsError::from)
}

/// Create a null array of the specified type and length
#[must_use]
pub fn create_null_array(data_type: &DataType, length: usize) -> ArrayRef {
    new_null_array(data_type, length)
}

/// Render any scalar column as strings, keeping nulls
pub fn to_string_array(array: &ArrayRef) -> Result<StringArray> {
    let converted = convert_array(array, &DataType::Utf8)?;
    converted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| {
            MasterWellsError::Arrow(ArrowError::CastError(format!(
                "expected a Utf8 array after conversion from {:?}",
                array.data_type()
            )))
        })
}

/// Apply `f` to every non-null string, keeping nulls in place
pub fn map_strings<F>(array: &StringArray, f: F) -> StringArray
where
    F: Fn(&str) -> String,
{
    array.iter().map(|value| value.map(&f)).collect()
}
