//! Target-location checks run before anything is written.

use std::path::Path;

use tracing::debug;

use crate::application::ports::Filesystem;
use crate::domain::FolderReport;
use crate::error::GoodboyResult;

/// Writability and emptiness checks against a [`Filesystem`].
pub struct PathGuard<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> PathGuard<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Probe `dir` for write access. Never errors.
    pub fn is_writable(&self, dir: &Path) -> bool {
        let writable = self.fs.is_writable(dir);
        debug!(dir = %dir.display(), writable, "Writability probe");
        writable
    }

    /// Classify the contents of `dir`. An absent directory yields an empty
    /// report.
    pub fn inspect(&self, dir: &Path) -> GoodboyResult<FolderReport> {
        if !self.fs.exists(dir) {
            return Ok(FolderReport::default());
        }
        let entries = self.fs.list_entries(dir)?;
        Ok(FolderReport::classify(entries))
    }

    /// `true` when `dir` is absent or only holds ignorable entries.
    pub fn is_empty_or_absent(&self, dir: &Path) -> GoodboyResult<bool> {
        Ok(self.inspect(dir)?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DirectoryEntry;

    #[test]
    fn absent_directory_is_acceptable() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_list_entries().never();

        let guard = PathGuard::new(&fs);
        assert!(guard.is_empty_or_absent(Path::new("/tmp/new")).unwrap());
    }

    #[test]
    fn vcs_and_license_only_is_acceptable() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_entries()
            .returning(|_| Ok(vec![DirectoryEntry::dir(".git"), DirectoryEntry::file("LICENSE")]));

        let guard = PathGuard::new(&fs);
        let report = guard.inspect(Path::new("/tmp/app")).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.ignorable.len(), 2);
    }

    #[test]
    fn source_file_conflicts() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_entries()
            .returning(|_| Ok(vec![DirectoryEntry::file("index.js"), DirectoryEntry::dir(".git")]));

        let guard = PathGuard::new(&fs);
        let report = guard.inspect(Path::new("/tmp/app")).unwrap();
        assert!(!report.is_empty());
        assert_eq!(report.conflicts, vec![DirectoryEntry::file("index.js")]);
        assert_eq!(report.ignorable, vec![DirectoryEntry::dir(".git")]);
    }

    #[test]
    fn module_files_of_other_projects_do_not_block() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_entries().returning(|_| {
            Ok(vec![
                DirectoryEntry::file("legacy-api.iml"),
                DirectoryEntry::dir(".idea"),
            ])
        });

        let guard = PathGuard::new(&fs);
        assert!(guard.is_empty_or_absent(Path::new("/tmp/app")).unwrap());
    }

    #[test]
    fn writability_is_delegated() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_writable().return_const(false);
        assert!(!PathGuard::new(&fs).is_writable(Path::new("/")));
    }
}
