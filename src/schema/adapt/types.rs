//! Core types for schema adaptation.

use arrow::datatypes::DataType;

/// Types of data type compatibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCompatibility {
    /// Types match exactly
    Exact,
    /// Both sides can be converted to the contained common type
    Compatible(DataType),
    /// Types are incompatible
    Incompatible,
}

/// Available strategies for bringing a column to its common type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptationStrategy {
    /// Column is absent and is filled with nulls
    NullFill,
    /// Convert numeric types (widening)
    NumericConversion,
    /// Convert to string representation
    StringConversion,
    /// Automatically cast using Arrow's cast functionality
    AutoCast,
}
