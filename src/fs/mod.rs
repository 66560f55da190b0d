//! FileSystem abstraction for testable file operations

mod mock;
mod real;
mod r#trait;

pub use mock::{FsCall, MockFileSystem};
pub use r#trait::{DirEntry, FileSystem, FileType};
pub use real::RealFileSystem;
