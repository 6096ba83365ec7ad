//! Record reconciliation algorithms
//!
//! Identifier normalization, union by column name, standard derivations and
//! enrichment joins. Each step takes record sets by reference and returns a
//! new one.

pub mod derive;
pub mod enrichment;
pub mod identifier;
pub mod union;

pub use derive::derive_standard_columns;
pub use enrichment::{Enrichment, enrich, left_join, suffix_columns};
pub use identifier::{
    API10, API12, API14, ensure_join_key, normalize_identifiers, zero_pad_left,
};
pub use union::union_by_name;
