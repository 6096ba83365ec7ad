//! Standard derived columns of the master wells table

use std::sync::Arc;

use arrow::array::Array;
use arrow::datatypes::DataType;
use log::debug;

use crate::error::Result;
use crate::record_set::RecordSet;
use crate::schema::adapt::{convert_array, map_strings, to_string_array};

/// Source column for [`WELL_NAME_UPPER`]
pub const WELL_NAME: &str = "WELL_NAME";
/// Upper-cased well name
pub const WELL_NAME_UPPER: &str = "WELL_NAME_UPPER";
/// Registry well number, stored as a string when present
pub const API_WELL_NUMBER: &str = "API_WELL_NUMBER";

/// Add the standard derived columns
///
/// `WELL_NAME_UPPER` is always added and requires `WELL_NAME`.
/// `API_WELL_NUMBER`, when present, is converted to its string form.
pub fn derive_standard_columns(record_set: &RecordSet) -> Result<RecordSet> {
    let well_names = to_string_array(record_set.require_column(WELL_NAME, "standard derivation")?)?;
    let upper = map_strings(&well_names, str::to_uppercase);
    let derived = record_set.with_column(WELL_NAME_UPPER, Arc::new(upper))?;

    let non_string = derived
        .column(API_WELL_NUMBER)
        .filter(|column| column.data_type() != &DataType::Utf8)
        .cloned();
    match non_string {
        Some(column) => {
            debug!("Casting {API_WELL_NUMBER} from {:?} to Utf8", column.data_type());
            let as_string = convert_array(&column, &DataType::Utf8)?;
            derived.with_column(API_WELL_NUMBER, as_string)
        }
        None => Ok(derived),
    }
}
