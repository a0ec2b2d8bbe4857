//! Backing-resource access for the catalog store.
//!
//! # Responsibility
//! - Read the whole catalog resource as UTF-8 text.
//! - Overwrite the whole catalog resource, creating missing parent
//!   directories first.
//!
//! # Invariants
//! - Every failure surfaces as one `IoFailure` kind; callers never see
//!   `std::io::Error` directly.

use crate::error::{IoFailure, IoOperation};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Whole-content text storage consumed by the catalog store.
pub trait TextResource {
    /// Returns whether the resource currently exists.
    fn exists(&self) -> bool;
    /// Reads the full resource as UTF-8 text.
    fn read_utf8(&self) -> Result<String, IoFailure>;
    /// Replaces the full resource content.
    fn write_utf8(&self, content: &str) -> Result<(), IoFailure>;
    /// Human-readable location, used in logs only.
    fn location(&self) -> String;
}

/// File-system backed resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, operation: IoOperation, source: std::io::Error) -> IoFailure {
        IoFailure::new(operation, self.location(), source)
    }
}

impl TextResource for FileResource {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_utf8(&self) -> Result<String, IoFailure> {
        fs::read_to_string(&self.path).map_err(|err| self.failure(IoOperation::Read, err))
    }

    fn write_utf8(&self, content: &str) -> Result<(), IoFailure> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| self.failure(IoOperation::Write, err))?;
            }
        }

        fs::write(&self.path, content).map_err(|err| self.failure(IoOperation::Write, err))?;
        debug!(
            "event=resource_write module=repo status=ok bytes={}",
            content.len()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{FileResource, TextResource};
    use crate::error::IoOperation;

    #[test]
    fn write_creates_parent_directories_and_read_returns_content() {
        let dir = tempfile::tempdir().unwrap();
        let resource = FileResource::new(dir.path().join("nested/deeper/items.csv"));
        assert!(!resource.exists());

        resource.write_utf8("hello\nworld\n").unwrap();
        assert!(resource.exists());
        assert_eq!(resource.read_utf8().unwrap(), "hello\nworld\n");

        resource.write_utf8("short").unwrap();
        assert_eq!(resource.read_utf8().unwrap(), "short");
    }

    #[test]
    fn reading_missing_file_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let resource = FileResource::new(dir.path().join("missing.csv"));
        let err = resource.read_utf8().unwrap_err();
        assert_eq!(err.operation(), IoOperation::Read);
        assert_eq!(err.to_string(), "failed to read catalog file");
    }

    #[test]
    fn invalid_utf8_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.csv");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = FileResource::new(&path).read_utf8().unwrap_err();
        assert_eq!(err.operation(), IoOperation::Read);
    }

    #[test]
    fn writing_over_a_directory_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileResource::new(dir.path()).write_utf8("x").unwrap_err();
        assert_eq!(err.operation(), IoOperation::Write);
    }
}
