//! Infrastructure adapters for cxa.
//!
//! This crate implements the ports defined in `cxa_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod fetcher;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use fetcher::{DEFAULT_TEMPLATE_PREFIX, NpmPackageFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::ProcessRunner;
