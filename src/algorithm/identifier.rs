//! Well identifier normalization
//!
//! Every record set leaving this module carries `API14`, the 14-character
//! canonical join key, plus its `API12` and `API10` prefixes. `API14` is taken
//! from the first identifier column present in [`IDENTIFIER_SOURCES`].

use std::sync::Arc;

use arrow::array::StringArray;
use arrow::compute::kernels::substring::substring_by_char;
use log::{debug, warn};

use crate::error::{MasterWellsError, Result};
use crate::record_set::RecordSet;
use crate::schema::adapt::{map_strings, to_string_array};

/// Canonical 14-character identifier column
pub const API14: &str = "API14";
/// 12-character prefix of `API14`
pub const API12: &str = "API12";
/// 10-character prefix of `API14`
pub const API10: &str = "API10";

/// Width of the canonical identifier
pub const API14_WIDTH: usize = 14;

/// How a raw identifier column becomes `API14`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierTransform {
    /// The column already is `API14` and is kept unchanged
    Keep,
    /// Render as string and left-pad with `'0'` to [`API14_WIDTH`]
    ZeroPad,
}

/// Identifier columns in the order they are tried
pub const IDENTIFIER_SOURCES: [(&str, IdentifierTransform); 3] = [
    (API14, IdentifierTransform::Keep),
    ("API", IdentifierTransform::ZeroPad),
    ("APINumber", IdentifierTransform::ZeroPad),
];

/// Left-pad `value` with `'0'` up to `width` characters
///
/// Values already at least `width` characters long are returned unchanged.
#[must_use]
pub fn zero_pad_left(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let mut padded = String::with_capacity(width);
    padded.extend(std::iter::repeat_n('0', width - len));
    padded.push_str(value);
    padded
}

/// Ensure `record_set` carries `API14`, `API12` and `API10`
///
/// `API12` and `API10` are always recomputed from `API14`, overwriting any
/// values already present.
pub fn normalize_identifiers(record_set: &RecordSet) -> Result<RecordSet> {
    let with_key = ensure_join_key(record_set)?;
    let api14 = key_strings(&with_key)?;

    let api12 = substring_by_char(&api14, 0, Some(12))?;
    let api10 = substring_by_char(&api14, 0, Some(10))?;

    with_key
        .with_column(API12, Arc::new(api12))?
        .with_column(API10, Arc::new(api10))
}

/// Ensure `record_set` carries `API14`, without deriving the shorter forms
pub fn ensure_join_key(record_set: &RecordSet) -> Result<RecordSet> {
    let (column, transform) = IDENTIFIER_SOURCES
        .iter()
        .find(|(name, _)| record_set.has_column(name))
        .ok_or_else(|| MasterWellsError::MissingIdentifierColumn {
            candidates: IDENTIFIER_SOURCES
                .iter()
                .map(|(name, _)| (*name).to_string())
                .collect(),
        })?;

    match transform {
        IdentifierTransform::Keep => Ok(record_set.clone()),
        IdentifierTransform::ZeroPad => {
            debug!("Building {API14} from '{column}'");
            let raw = to_string_array(record_set.require_column(column, "identifier normalization")?)?;
            warn_on_oversized(&raw, column);
            let padded = map_strings(&raw, |value| zero_pad_left(value, API14_WIDTH));
            record_set.with_column(API14, Arc::new(padded))
        }
    }
}

/// The `API14` column rendered as strings, for prefixing and key comparison
pub fn key_strings(record_set: &RecordSet) -> Result<StringArray> {
    to_string_array(record_set.require_column(API14, "identifier lookup")?)
}

fn warn_on_oversized(raw: &StringArray, column: &str) {
    let oversized = raw
        .iter()
        .flatten()
        .filter(|value| value.chars().count() > API14_WIDTH)
        .count();
    if oversized > 0 {
        warn!(
            "{oversized} value(s) in '{column}' exceed {API14_WIDTH} characters and were kept untruncated"
        );
    }
}
