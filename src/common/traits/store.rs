//! Traits for the external collaborators of the pipeline
//!
//! The reconciliation core never touches storage directly. Inputs come from a
//! [`Source`] by logical table name and the final record set goes to a
//! [`Sink`] under a qualified table name.

use crate::error::Result;
use crate::record_set::RecordSet;

/// Resolves logical table names to record sets
pub trait Source {
    /// Load the record set registered under `logical_name`
    ///
    /// Fails with `TableNotFound` when the name cannot be resolved.
    fn load(&self, logical_name: &str) -> Result<RecordSet>;
}

/// How a sink treats data already stored under the target name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Destructively replace whatever is stored under the name
    #[default]
    Overwrite,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Durably stores record sets under qualified table names
pub trait Sink {
    /// Write `record_set` to `qualified_name`
    fn materialize(
        &mut self,
        record_set: &RecordSet,
        qualified_name: &str,
        mode: WriteMode,
    ) -> Result<()>;
}

impl<S: Source + ?Sized> Source for &S {
    fn load(&self, logical_name: &str) -> Result<RecordSet> {
        (**self).load(logical_name)
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn materialize(
        &mut self,
        record_set: &RecordSet,
        qualified_name: &str,
        mode: WriteMode,
    ) -> Result<()> {
        (**self).materialize(record_set, qualified_name, mode)
    }
}
