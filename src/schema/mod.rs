//! Schema reconciliation for record sets from heterogeneous sources.

pub mod adapt;

pub use adapt::{
    AdaptationStrategy, TypeCompatibility, align_record_batch, check_type_compatibility,
    convert_array, unify_schemas,
};
