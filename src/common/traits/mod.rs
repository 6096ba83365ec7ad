//! Common traits used across the codebase
//!
//! This module defines the interfaces between the reconciliation core and the
//! storage it reads from and writes to.

pub mod store;

pub use store::{Sink, Source, WriteMode};
