//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use tracing::trace;

use goodboy_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::DirectoryEntry,
    error::{GoodboyError, GoodboyResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn is_writable(&self, dir: &Path) -> bool {
        // Create and immediately drop an anonymous file; dropping removes it.
        match tempfile::Builder::new()
            .prefix(".goodboy-probe")
            .tempfile_in(dir)
        {
            Ok(_probe) => true,
            Err(e) => {
                trace!(dir = %dir.display(), error = %e, "write probe failed");
                false
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> GoodboyResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn list_entries(&self, dir: &Path) -> GoodboyResult<Vec<DirectoryEntry>> {
        let read_dir = std::fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "read directory"))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| map_io_error(dir, e, "read directory entry"))?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(DirectoryEntry { name, is_dir });
        }
        Ok(entries)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> GoodboyResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GoodboyError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
