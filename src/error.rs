use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the garbage collector.
///
/// Each variant names the path the filesystem refused to touch and keeps the
/// underlying I/O error as its source.
#[derive(Debug, Error)]
pub enum GcError {
    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove directory tree {}: {source}", .path.display())]
    RemoveAll {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GcError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            GcError::Remove { path, .. }
            | GcError::RemoveAll { path, .. }
            | GcError::ReadDir { path, .. } => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            GcError::Remove { source, .. }
            | GcError::RemoveAll { source, .. }
            | GcError::ReadDir { source, .. } => source.kind(),
        }
    }
}
