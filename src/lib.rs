//! bbl-janitor - selective cleanup of a bbl state directory
//!
//! When an environment is destroyed, its state directory still holds
//! everything bbl generated over the environment's life: the state file,
//! helper scripts, vars, cloud-config, terraform templates and vendored
//! deployment checkouts. Users often drop their own files next to those.
//! This crate deletes only what bbl owns and reports what it leaves behind.
//!
//! # Example
//!
//! ```no_run
//! use bbl_janitor::{GarbageCollector, LoggingReporter, RealFileSystem};
//! use std::path::Path;
//!
//! let gc = GarbageCollector::new(RealFileSystem::new(), LoggingReporter);
//! gc.remove(Path::new("/var/bbl/env-a")).expect("teardown cleanup failed");
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: filesystem port with real and in-memory implementations
//! - [`reporter`]: sinks for warnings about preserved files
//! - [`policy`]: which files and directories bbl owns
//! - [`gc`]: the collector that applies the policy

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod gc;
pub mod policy;
pub mod reporter;
pub mod util;

pub use config::{ConfigError, JanitorConfig};
pub use error::GcError;
pub use fs::{DirEntry, FileSystem, FileType, FsCall, MockFileSystem, RealFileSystem};
pub use gc::{GarbageCollector, TeardownPlan};
pub use policy::{Classification, DeletionMode, ManagedArea, OwnershipPolicy};
pub use reporter::{ConsoleReporter, LoggingReporter, NoOpReporter, RecordingReporter, Reporter};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
