//! Template selection and copy rules.
//!
//! [`TemplateDescriptor`] picks a subtree of the template corpus;
//! [`CopyPlan`] says which files of that subtree are copied and under which
//! basename they land. Pattern matching itself is done by the materializer
//! adapter; this module only owns the rules.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::ScaffoldRequest;

/// File name of the synthesized manifest at the project root.
pub const MANIFEST_FILE: &str = "package.json";

/// Lint configuration shipped with the template; skipped unless requested.
pub const LINT_CONFIG_FILE: &str = "eslint.config.mjs";

/// Identifier of the single bundled template.
pub const DEFAULT_TEMPLATE_ID: &str = "default";

// ── TemplateDescriptor ───────────────────────────────────────────────────────

/// Source-language flavour of a template subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateMode {
    Ts,
    Js,
}

impl TemplateMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Js => "js",
        }
    }
}

impl fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects `<templates_root>/<template_id>/<mode>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub template_id: &'static str,
    pub mode: TemplateMode,
}

impl TemplateDescriptor {
    pub fn for_request(request: &ScaffoldRequest) -> Self {
        Self {
            template_id: DEFAULT_TEMPLATE_ID,
            mode: if request.use_typescript() {
                TemplateMode::Ts
            } else {
                TemplateMode::Js
            },
        }
    }

    /// Directory holding this template's files.
    pub fn source_dir(&self, templates_root: &Path) -> PathBuf {
        templates_root.join(self.template_id).join(self.mode.as_str())
    }
}

// ── CopyPlan ─────────────────────────────────────────────────────────────────

/// Which template files to copy, and how to name them at the destination.
///
/// Patterns are globs relative to the template root. Exclusion is decided on
/// the *source* path, before any rename; renames only ever touch the final
/// path component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyPlan {
    include: Vec<String>,
    exclude: Vec<String>,
    renames: BTreeMap<String, String>,
}

impl CopyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// The plan used for the bundled template.
    ///
    /// Extensionless dotfile sources (`gitignore`, `env`) are stored without
    /// the dot so that packaging tools do not drop them.
    pub fn for_template(include_lint_config: bool) -> Self {
        let mut plan = Self::new()
            .include("**")
            .exclude(MANIFEST_FILE)
            .rename("gitignore", ".gitignore")
            .rename("env", ".env")
            .rename("README-template.md", "README.md");

        if !include_lint_config {
            plan = plan.exclude(LINT_CONFIG_FILE);
        }
        plan
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.insert(from.into(), to.into());
        self
    }

    pub fn include_patterns(&self) -> &[String] {
        &self.include
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }

    /// Basename after applying the rename rules (unchanged if unmatched).
    pub fn renamed<'a>(&'a self, basename: &'a str) -> &'a str {
        self.renames.get(basename).map_or(basename, String::as_str)
    }

    /// Destination path (relative) for a template-relative source path.
    pub fn destination_for(&self, relative: &Path) -> PathBuf {
        let Some(basename) = relative.file_name().and_then(|n| n.to_str()) else {
            return relative.to_path_buf();
        };
        let renamed = self.renamed(basename);
        if renamed == basename {
            return relative.to_path_buf();
        }
        relative.with_file_name(renamed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotfiles_are_renamed_by_basename() {
        let plan = CopyPlan::for_template(false);
        assert_eq!(plan.destination_for(Path::new("gitignore")), PathBuf::from(".gitignore"));
        assert_eq!(plan.destination_for(Path::new("env")), PathBuf::from(".env"));
        assert_eq!(
            plan.destination_for(Path::new("README-template.md")),
            PathBuf::from("README.md")
        );
    }

    #[test]
    fn rename_is_not_reapplied() {
        let plan = CopyPlan::for_template(false);
        let once = plan.destination_for(Path::new("gitignore"));
        assert_eq!(plan.destination_for(&once), once);
    }

    #[test]
    fn rename_keeps_directory_structure() {
        let plan = CopyPlan::for_template(true);
        assert_eq!(
            plan.destination_for(Path::new("prisma/env")),
            PathBuf::from("prisma/.env")
        );
        assert_eq!(
            plan.destination_for(Path::new("src/routes.ts")),
            PathBuf::from("src/routes.ts")
        );
    }

    #[test]
    fn lint_config_excluded_only_when_opted_out() {
        let without = CopyPlan::for_template(false);
        let with = CopyPlan::for_template(true);
        assert!(without.exclude_patterns().iter().any(|p| p == LINT_CONFIG_FILE));
        assert!(!with.exclude_patterns().iter().any(|p| p == LINT_CONFIG_FILE));
    }

    #[test]
    fn template_manifest_is_always_excluded() {
        for lint in [true, false] {
            let plan = CopyPlan::for_template(lint);
            assert!(plan.exclude_patterns().iter().any(|p| p == MANIFEST_FILE));
        }
    }

    #[test]
    fn descriptor_follows_typescript_flag() {
        let ts = ScaffoldRequest::new("/tmp/app");
        let js = ScaffoldRequest::new("/tmp/app").with_typescript(false);
        assert_eq!(TemplateDescriptor::for_request(&ts).mode, TemplateMode::Ts);
        assert_eq!(
            TemplateDescriptor::for_request(&js).source_dir(Path::new("/t")),
            PathBuf::from("/t/default/js")
        );
    }
}
