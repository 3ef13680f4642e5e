//! Generated-project manifest (`package.json`) synthesis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Version stamped into every generated project, independent of the tool's.
pub const PROJECT_VERSION: &str = "1.0.0";

/// Compiled entry point of the bundled template.
pub const ENTRY_POINT: &str = "server.js";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Static name → semver-range table for the bundled template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyTable {
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
}

impl DependencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Express + Prisma stack of the default template.
    pub fn express_prisma() -> Self {
        Self::new()
            .dependency("@prisma/client", "5.19.1")
            .dependency("connect-pg-simple", "^10.0.0")
            .dependency("dotenv", "^16.4.7")
            .dependency("cors", "^2.8.5")
            .dependency("express", "^4.19.2")
            .dependency("yup", "^1.4.0")
            .dev_dependency("@types/connect-pg-simple", "^7.0.3")
            .dev_dependency("@types/cors", "^2.8.17")
            .dev_dependency("@types/express", "^4.17.21")
            .dev_dependency("prisma", "^5.19.1")
            .dev_dependency("rimraf", "^6.0.1")
            .dev_dependency("ts-node-dev", "^2.0.0")
            .dev_dependency("typescript", "^5.5.4")
    }

    pub fn dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), range.into());
        self
    }

    pub fn dev_dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dev_dependencies.insert(name.into(), range.into());
        self
    }
}

/// The generated project's manifest.
///
/// `dependencies` is always serialized; `devDependencies` is dropped
/// entirely when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedManifest {
    pub name: String,
    pub version: String,
    #[serde(rename = "main")]
    pub entry_point: String,
    pub scripts: IndexMap<String, String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dev_dependencies: IndexMap<String, String>,
    /// Version of the tool that produced this manifest. Not serialized.
    #[serde(skip)]
    pub generator_version: String,
}

impl GeneratedManifest {
    /// Pretty JSON (2-space indent) with a platform line ending appended.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push_str(LINE_ENDING);
        Ok(json)
    }
}

/// Builds [`GeneratedManifest`]s from a fixed dependency table.
#[derive(Debug, Clone)]
pub struct ManifestSynthesizer {
    table: DependencyTable,
    embedded_version: String,
}

impl Default for ManifestSynthesizer {
    fn default() -> Self {
        Self::new(DependencyTable::express_prisma())
    }
}

impl ManifestSynthesizer {
    pub fn new(table: DependencyTable) -> Self {
        Self {
            table,
            embedded_version: crate::VERSION.to_string(),
        }
    }

    /// Build the manifest for `app_name`.
    ///
    /// `version_override` replaces the embedded tool version (used for
    /// reproducible fixtures); the project's own `version` is always
    /// [`PROJECT_VERSION`].
    pub fn synthesize(&self, app_name: &str, version_override: Option<&str>) -> GeneratedManifest {
        let generator_version = version_override
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(self.embedded_version.as_str())
            .to_string();

        GeneratedManifest {
            name: app_name.to_string(),
            version: PROJECT_VERSION.to_string(),
            entry_point: ENTRY_POINT.to_string(),
            scripts: lifecycle_scripts(),
            dependencies: self.table.dependencies.clone(),
            dev_dependencies: self.table.dev_dependencies.clone(),
            generator_version,
        }
    }
}

fn lifecycle_scripts() -> IndexMap<String, String> {
    [
        ("dev", "ts-node-dev --poll server.ts"),
        ("build", "rimraf ./dist && tsc"),
        ("start", "node dist/server.js"),
        ("generate", "prisma generate"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_version_is_fixed() {
        let manifest = ManifestSynthesizer::default().synthesize("my-app", Some("9.9.9"));
        assert_eq!(manifest.name, "my-app");
        assert_eq!(manifest.version, PROJECT_VERSION);
        assert_eq!(manifest.generator_version, "9.9.9");
    }

    #[test]
    fn embedded_version_used_without_override() {
        let manifest = ManifestSynthesizer::default().synthesize("my-app", None);
        assert_eq!(manifest.generator_version, crate::VERSION);
    }

    #[test]
    fn scripts_are_ordered() {
        let manifest = ManifestSynthesizer::default().synthesize("x", None);
        let keys: Vec<&str> = manifest.scripts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["dev", "build", "start", "generate"]);
    }

    #[test]
    fn serialization_uses_two_space_indent_and_trailing_newline() {
        let json = ManifestSynthesizer::default()
            .synthesize("my-app", None)
            .to_json()
            .unwrap();
        assert!(json.starts_with("{\n  \"name\": \"my-app\",\n  \"version\": \"1.0.0\",\n  \"main\": \"server.js\""));
        assert!(json.ends_with(LINE_ENDING));
        assert!(json.contains("\"devDependencies\""));
        assert!(!json.contains("generator"));
    }

    #[test]
    fn empty_dev_dependencies_are_omitted() {
        let table = DependencyTable::new().dependency("express", "^4.19.2");
        let json = ManifestSynthesizer::new(table).synthesize("a", None).to_json().unwrap();
        assert!(!json.contains("devDependencies"));
        assert!(json.contains("\"dependencies\""));
    }

    #[test]
    fn empty_dependencies_are_still_emitted() {
        let json = ManifestSynthesizer::new(DependencyTable::new())
            .synthesize("a", None)
            .to_json()
            .unwrap();
        assert!(json.contains("\"dependencies\": {}"));
        assert!(!json.contains("devDependencies"));
    }

    #[test]
    fn manifest_reads_back() {
        let original = ManifestSynthesizer::default().synthesize("my-app", None);
        let parsed: GeneratedManifest = serde_json::from_str(&original.to_json().unwrap()).unwrap();
        assert_eq!(parsed.dependencies, original.dependencies);
        assert_eq!(parsed.dev_dependencies, original.dev_dependencies);
    }
}
