//! Package-name validation for generated projects.
//!
//! The rules mirror the npm registry's constraints for *new* packages.
//! Violations come in two severities: [`Severity::Error`] rules are hard
//! registry rejections, [`Severity::Warning`] rules are legacy-tolerated but
//! still refused for new packages. A new project must therefore be free of
//! both to be considered valid.

use std::fmt;

/// Maximum package-name length accepted by the registry.
pub const MAX_NAME_LENGTH: usize = 214;

/// Names the registry refuses outright (compared lowercase).
const FORBIDDEN_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core module names. A package may not shadow one of these.
const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Characters the registry no longer accepts in the final name segment.
const SPECIAL_CHARACTERS: &[char] = &['~', '\'', '!', '(', ')', '*'];

/// How serious a naming problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One violated naming rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of [`validate_package_name`]. Errors are listed before warnings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    problems: Vec<Problem>,
}

impl ValidationResult {
    /// `true` when the name is acceptable for a brand-new package.
    pub fn valid(&self) -> bool {
        self.problems.is_empty()
    }

    /// `true` when only warning-level problems were found.
    pub fn valid_for_old_packages(&self) -> bool {
        self.problems.iter().all(|p| p.severity == Severity::Warning)
    }

    /// Human-readable problem strings, in rule order.
    pub fn problems(&self) -> Vec<String> {
        self.problems.iter().map(|p| p.message.clone()).collect()
    }

    pub fn entries(&self) -> &[Problem] {
        &self.problems
    }
}

/// Validate a proposed project name against package-registry naming rules.
///
/// Every violated rule is reported, not just the first one.
pub fn validate_package_name(name: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }

    let lowercase = name.to_lowercase();
    if FORBIDDEN_NAMES.contains(&lowercase.as_str()) {
        errors.push(format!("{lowercase} is not a valid package name"));
    }
    if CORE_MODULES.contains(&lowercase.as_str()) {
        errors.push(format!("{name} is a core module name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        warnings.push(format!(
            "name can no longer contain more than {MAX_NAME_LENGTH} characters"
        ));
    }
    if lowercase != name {
        warnings.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains(SPECIAL_CHARACTERS) {
        warnings.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    if !is_uri_component_safe(name) && !is_url_friendly_scoped(name) {
        errors.push("name can only contain URL-friendly characters".to_string());
    }

    let problems = errors
        .into_iter()
        .map(|message| Problem {
            severity: Severity::Error,
            message,
        })
        .chain(warnings.into_iter().map(|message| Problem {
            severity: Severity::Warning,
            message,
        }))
        .collect();

    ValidationResult { problems }
}

/// `@scope/name` or `name`, with both parts URL-safe on their own.
fn is_url_friendly_scoped(name: &str) -> bool {
    match split_scope(name) {
        Some((Some(scope), package)) => {
            is_uri_component_safe(scope) && is_uri_component_safe(package)
        }
        Some((None, package)) => is_uri_component_safe(package),
        None => false,
    }
}

fn split_scope(name: &str) -> Option<(Option<&str>, &str)> {
    match name.strip_prefix('@') {
        Some(rest) => {
            let (scope, package) = rest.split_once('/')?;
            if scope.is_empty() || package.is_empty() || package.contains('/') {
                return None;
            }
            Some((Some(scope), package))
        }
        None if name.is_empty() || name.contains('/') => None,
        None => Some((None, name)),
    }
}

/// Whether percent-encoding a URI component would leave `s` unchanged.
fn is_uri_component_safe(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
    })
}
