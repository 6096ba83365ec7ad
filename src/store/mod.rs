//! Concrete sources and sinks for the pipeline

pub mod directory;
pub mod memory;

pub use directory::{DirectoryStore, TableLocation};
pub use memory::MemoryStore;
