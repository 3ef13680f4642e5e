//! The resolved configuration for one scaffold run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, PackageManagerKind};

/// Everything the pipeline needs to know about what to create.
///
/// Built once from user input and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    target_path: PathBuf,
    package_manager: PackageManagerKind,
    use_typescript: bool,
    use_source_dir: bool,
    include_lint_config: bool,
}

impl ScaffoldRequest {
    /// A TypeScript request using npm with every optional feature off.
    pub fn new(target_path: impl Into<PathBuf>) -> Self {
        Self {
            target_path: target_path.into(),
            package_manager: PackageManagerKind::default(),
            use_typescript: true,
            use_source_dir: false,
            include_lint_config: false,
        }
    }

    pub fn with_package_manager(mut self, package_manager: PackageManagerKind) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn with_typescript(mut self, enabled: bool) -> Self {
        self.use_typescript = enabled;
        self
    }

    pub fn with_source_dir(mut self, enabled: bool) -> Self {
        self.use_source_dir = enabled;
        self
    }

    pub fn with_lint_config(mut self, enabled: bool) -> Self {
        self.include_lint_config = enabled;
        self
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn package_manager(&self) -> PackageManagerKind {
        self.package_manager
    }

    pub fn use_typescript(&self) -> bool {
        self.use_typescript
    }

    pub fn use_source_dir(&self) -> bool {
        self.use_source_dir
    }

    pub fn include_lint_config(&self) -> bool {
        self.include_lint_config
    }

    /// The project name: the last component of the target path.
    pub fn app_name(&self) -> Result<String, DomainError> {
        self.target_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .ok_or_else(|| DomainError::MissingProjectName {
                path: self.target_path.clone(),
            })
    }
}

/// Pipeline states, in the only order they can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScaffoldStage {
    Validating,
    PreparingDirectory,
    Copying,
    WritingManifest,
    Installing,
    InitializingVcs,
    Done,
    Aborted,
}

impl ScaffoldStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::PreparingDirectory => "preparing-directory",
            Self::Copying => "copying",
            Self::WritingManifest => "writing-manifest",
            Self::Installing => "installing",
            Self::InitializingVcs => "initializing-vcs",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_last_component() {
        let request = ScaffoldRequest::new("/tmp/projects/my-app");
        assert_eq!(request.app_name().unwrap(), "my-app");
    }

    #[test]
    fn root_has_no_app_name() {
        let request = ScaffoldRequest::new("/");
        assert!(matches!(
            request.app_name(),
            Err(DomainError::MissingProjectName { .. })
        ));
    }

    #[test]
    fn defaults_match_bundled_template() {
        let request = ScaffoldRequest::new("/tmp/a");
        assert!(request.use_typescript());
        assert!(!request.include_lint_config());
        assert_eq!(request.package_manager(), PackageManagerKind::Npm);
    }

    #[test]
    fn stages_are_ordered() {
        assert!(ScaffoldStage::Validating < ScaffoldStage::Copying);
        assert!(ScaffoldStage::Installing < ScaffoldStage::InitializingVcs);
        assert_eq!(ScaffoldStage::Aborted.to_string(), "aborted");
    }
}
