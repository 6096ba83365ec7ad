//! Module for handling data type compatibility checks.
//!
//! Two columns sharing a name are reconciled to a common type: lossless
//! numeric widening where it exists, a string representation for any other
//! mix of scalar types, and a hard failure for binary or nested data.

use arrow::compute::can_cast_types;
use arrow::datatypes::DataType;

use crate::schema::adapt::types::{AdaptationStrategy, TypeCompatibility};

/// Check whether a value of type `from` widens losslessly into `to`
#[must_use]
pub const fn widens_to(from: &DataType, to: &DataType) -> bool {
    matches!(
        (from, to),
        (DataType::Int8, DataType::Int16 | DataType::Int32 | DataType::Int64)
            | (DataType::Int16, DataType::Int32 | DataType::Int64)
            | (DataType::Int32, DataType::Int64)
            | (DataType::UInt8, DataType::UInt16 | DataType::UInt32 | DataType::UInt64)
            | (DataType::UInt16, DataType::UInt32 | DataType::UInt64)
            | (DataType::UInt32, DataType::UInt64)
            | (DataType::UInt8, DataType::Int16 | DataType::Int32 | DataType::Int64)
            | (DataType::UInt16, DataType::Int32 | DataType::Int64)
            | (DataType::UInt32, DataType::Int64)
            | (DataType::Float16, DataType::Float32 | DataType::Float64)
            | (DataType::Float32, DataType::Float64)
            | (
                DataType::Int8 | DataType::Int16 | DataType::UInt8 | DataType::UInt16,
                DataType::Float32
            )
            | (
                DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32,
                DataType::Float64
            )
    )
}

/// Determine the common type two columns of the same name can be brought to
#[must_use]
pub fn check_type_compatibility(left: &DataType, right: &DataType) -> TypeCompatibility {
    if left == right {
        return TypeCompatibility::Exact;
    }

    match (left, right) {
        (DataType::Null, other) | (other, DataType::Null) => {
            TypeCompatibility::Compatible(other.clone())
        }

        (l, r) if widens_to(l, r) => TypeCompatibility::Compatible(r.clone()),
        (l, r) if widens_to(r, l) => TypeCompatibility::Compatible(l.clone()),

        // Remaining numeric mixes (e.g. Int64 with Float32, Int64 with UInt64)
        (l, r) if is_numeric(l) && is_numeric(r) => {
            TypeCompatibility::Compatible(DataType::Float64)
        }

        (DataType::LargeUtf8, r) if is_string_representable(r) => {
            TypeCompatibility::Compatible(DataType::LargeUtf8)
        }
        (l, DataType::LargeUtf8) if is_string_representable(l) => {
            TypeCompatibility::Compatible(DataType::LargeUtf8)
        }
        (l, r) if is_string_representable(l) && is_string_representable(r) => {
            TypeCompatibility::Compatible(DataType::Utf8)
        }

        _ => TypeCompatibility::Incompatible,
    }
}

/// Identifies whether a data type is numeric
#[must_use]
pub const fn is_numeric(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
    )
}

/// Identifies whether a data type is a string type
#[must_use]
pub const fn is_string(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8)
}

/// Identifies binary and nested types, which have no faithful string rendering
#[must_use]
pub const fn is_binary_or_nested(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Binary
            | DataType::LargeBinary
            | DataType::BinaryView
            | DataType::FixedSizeBinary(_)
            | DataType::List(_)
            | DataType::LargeList(_)
            | DataType::ListView(_)
            | DataType::LargeListView(_)
            | DataType::FixedSizeList(_, _)
            | DataType::Struct(_)
            | DataType::Map(_, _)
            | DataType::Union(_, _)
    )
}

/// Scalar types Arrow can render as strings
///
/// Dictionary columns are judged by their value type.
#[must_use]
pub fn is_string_representable(data_type: &DataType) -> bool {
    match data_type {
        DataType::Dictionary(_, values) => is_string_representable(values),
        other => !is_binary_or_nested(other) && can_cast_types(other, &DataType::Utf8),
    }
}

/// Determine the appropriate adaptation strategy for a given source and target type
#[must_use]
pub const fn determine_adaptation_strategy(
    source_type: &DataType,
    target_type: &DataType,
) -> AdaptationStrategy {
    match (source_type, target_type) {
        (DataType::Null, _) => AdaptationStrategy::NullFill,
        (s, t) if is_numeric(s) && is_numeric(t) => AdaptationStrategy::NumericConversion,
        (_, DataType::Utf8 | DataType::LargeUtf8) => AdaptationStrategy::StringConversion,
        _ => AdaptationStrategy::AutoCast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::TimeUnit;

    #[test]
    fn test_exact_and_null() {
        assert_eq!(
            check_type_compatibility(&DataType::Int32, &DataType::Int32),
            TypeCompatibility::Exact
        );
        assert_eq!(
            check_type_compatibility(&DataType::Null, &DataType::Utf8),
            TypeCompatibility::Compatible(DataType::Utf8)
        );
    }

    #[test]
    fn test_numeric_widening_is_symmetric() {
        assert_eq!(
            check_type_compatibility(&DataType::Int32, &DataType::Int64),
            TypeCompatibility::Compatible(DataType::Int64)
        );
        assert_eq!(
            check_type_compatibility(&DataType::Int64, &DataType::Int32),
            TypeCompatibility::Compatible(DataType::Int64)
        );
        assert_eq!(
            check_type_compatibility(&DataType::Int64, &DataType::Float32),
            TypeCompatibility::Compatible(DataType::Float64)
        );
    }

    #[test]
    fn test_mixed_scalars_fall_back_to_string() {
        assert_eq!(
            check_type_compatibility(&DataType::Int64, &DataType::Utf8),
            TypeCompatibility::Compatible(DataType::Utf8)
        );
        assert_eq!(
            check_type_compatibility(
                &DataType::Timestamp(TimeUnit::Millisecond, None),
                &DataType::Boolean
            ),
            TypeCompatibility::Compatible(DataType::Utf8)
        );
        assert_eq!(
            check_type_compatibility(&DataType::LargeUtf8, &DataType::Float64),
            TypeCompatibility::Compatible(DataType::LargeUtf8)
        );
    }

    #[test]
    fn test_dictionary_and_time_fall_back_to_string() {
        let categorical = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        assert_eq!(
            check_type_compatibility(&categorical, &DataType::Utf8),
            TypeCompatibility::Compatible(DataType::Utf8)
        );
        assert_eq!(
            check_type_compatibility(&DataType::Time32(TimeUnit::Second), &DataType::Utf8),
            TypeCompatibility::Compatible(DataType::Utf8)
        );
        assert_eq!(
            check_type_compatibility(
                &DataType::Time64(TimeUnit::Microsecond),
                &DataType::Int64
            ),
            TypeCompatibility::Compatible(DataType::Utf8)
        );
    }

    #[test]
    fn test_binary_is_incompatible() {
        assert_eq!(
            check_type_compatibility(&DataType::Binary, &DataType::Int32),
            TypeCompatibility::Incompatible
        );
    }
}
