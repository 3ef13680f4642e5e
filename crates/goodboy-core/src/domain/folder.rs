//! Target-directory emptiness rules.
//!
//! A target directory may already exist as long as it only holds entries
//! that cannot collide with the generated project: VCS metadata, editor
//! settings (including any IntelliJ `*.iml` module file), licence/readme-style
//! files and tool logs.

use std::fmt;

/// Entries that never conflict with a freshly scaffolded project.
const IGNORABLE_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    ".vscode",
    ".yarn",
    "LICENSE",
    "README.md",
    "Thumbs.db",
    "docs",
    "mkdocs.yml",
    "yarnrc.yml",
];

/// Log-file prefixes left behind by previous package-manager runs.
const IGNORABLE_LOG_PREFIXES: &[&str] = &["npm-debug.log", "yarn-debug.log", "yarn-error.log"];

/// A single directory entry, as seen by the path guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dir {
            write!(f, "{}/", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Classification of an existing directory's contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderReport {
    pub conflicts: Vec<DirectoryEntry>,
    pub ignorable: Vec<DirectoryEntry>,
}

impl FolderReport {
    /// Split `entries` into conflicting and ignorable sets, each sorted by name.
    pub fn classify(entries: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        let (ignorable, conflicts): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|entry| is_ignorable(&entry.name));

        let mut report = Self {
            conflicts,
            ignorable,
        };
        report.conflicts.sort_by(|a, b| a.name.cmp(&b.name));
        report.ignorable.sort_by(|a, b| a.name.cmp(&b.name));
        report
    }

    /// `true` when nothing in the directory would collide with the scaffold.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

fn is_ignorable(name: &str) -> bool {
    IGNORABLE_ENTRIES.contains(&name)
        || IGNORABLE_LOG_PREFIXES.iter().any(|p| name.starts_with(p))
        || name.ends_with(".iml")
}
