//! Module for handling data type adaptation between mismatched schemas.

pub mod compatibility;
pub mod conversions;
pub mod schema_compat;
pub mod types;

// Re-export the main types and functions for easier access
pub use compatibility::{
    check_type_compatibility, determine_adaptation_strategy, is_binary_or_nested, is_numeric, is_string,
    is_string_representable, widens_to,
};
pub use conversions::{convert_array, create_null_array, map_strings, to_string_array};
pub use schema_compat::{SchemaAdaptation, align_record_batch, plan_adaptations, unify_schemas};
pub use types::{AdaptationStrategy, TypeCompatibility};
