//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world. Adapters
//! in `cxa-adapters` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File and directory operations
//!   - `PackageFetcher`: Template identifier → local directory
//!   - `CommandRunner`: Package-manager subprocesses

pub mod output;

pub use output::{CommandRunner, CommandStatus, Filesystem, PackageFetcher};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockPackageFetcher};
