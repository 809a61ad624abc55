//! In-memory file system for tests.
//!
//! Behaves like a tiny disk: writes fail with `NotFound` unless the parent
//! directory was created first, so callers that forget `create_dir_all` are
//! caught.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::FileSystem;

/// A [`FileSystem`] that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    dirs: Mutex<HashSet<PathBuf>>,
}

impl MemoryFileSystem {
    /// Creates an empty tree.  The root (`/`) and the empty relative path
    /// always exist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a file directly, creating its parent directories.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path, contents.into());
    }

    /// Returns the contents of `path`, if it is a file.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("lock poisoned").get(path).cloned()
    }

    /// Number of files currently stored.
    pub fn file_count(&self) -> usize {
        self.files.lock().expect("lock poisoned").len()
    }

    fn add_dirs(&self, path: &Path) {
        let mut dirs = self.dirs.lock().expect("lock poisoned");
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty()
            || path.parent().is_none()
            || self.dirs.lock().expect("lock poisoned").contains(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.contents(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        let parent_exists = path.parent().map_or(true, |p| self.is_dir(p));
        if !parent_exists {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "parent directory does not exist",
            ));
        }
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("lock poisoned").contains_key(path) || self.is_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.add_dirs(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_without_parent_directory_fails() {
        let fs = MemoryFileSystem::new();
        let err = fs
            .write_text(Path::new("/a/b/file.json"), "{}")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_after_create_dir_all_succeeds() {
        // Arrange
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/a/b")).unwrap();

        // Act
        fs.write_text(Path::new("/a/b/file.json"), "{}").unwrap();

        // Assert
        assert_eq!(fs.read_text(Path::new("/a/b/file.json")).unwrap(), "{}");
        assert!(fs.exists(Path::new("/a")));
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn test_insert_creates_parents() {
        let fs = MemoryFileSystem::new();
        fs.insert("/home/xuser/.fex-emu/Config.json", "x");
        assert!(fs.exists(Path::new("/home/xuser/.fex-emu")));
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let fs = MemoryFileSystem::new();
        let err = fs.read_text(Path::new("/missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!fs.exists(Path::new("/missing")));
    }
}
