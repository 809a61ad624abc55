//! File-system seam.
//!
//! The config store only needs four operations.  Putting them behind the
//! `FileSystem` trait lets unit tests run against an in-memory tree
//! ([`mock::MemoryFileSystem`]) or inject I/O failures, without touching the
//! real disk.
//!
//! [`StdFileSystem`] is the production implementation over `std::fs`.

use std::io;
use std::path::Path;

pub mod mock;

/// The file operations the config store depends on.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Reads a whole file as UTF-8 text.
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Replaces the file's contents, creating it if needed.  The parent
    /// directory must already exist.
    fn write_text(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Creates `path` and all missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by the real disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
