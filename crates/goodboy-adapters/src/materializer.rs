//! Template copy adapter.
//!
//! Walks the template subtree, filters it through the plan's include and
//! exclude globs, and copies the survivors byte-for-byte, creating parent
//! directories as it goes.

use std::fs;
use std::io;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use goodboy_core::{
    application::{ApplicationError, ports::TemplateMaterializer},
    domain::CopyPlan,
    error::{GoodboyError, GoodboyResult},
};

/// Copies templates from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMaterializer;

impl LocalMaterializer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateMaterializer for LocalMaterializer {
    #[instrument(skip_all, fields(source = %source_root.display(), dest = %dest_root.display()))]
    fn materialize(
        &self,
        plan: &CopyPlan,
        source_root: &Path,
        dest_root: &Path,
    ) -> GoodboyResult<usize> {
        if !source_root.is_dir() {
            return Err(template_io(
                source_root,
                io::Error::new(io::ErrorKind::NotFound, "template directory not found"),
            ));
        }

        let include = build_globset(plan.include_patterns(), source_root)?;
        let exclude = build_globset(plan.exclude_patterns(), source_root)?;

        fs::create_dir_all(dest_root).map_err(|e| template_io(dest_root, e))?;

        let mut copied = 0;
        for entry in WalkDir::new(source_root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source_root).to_path_buf();
                template_io(&path, io::Error::other(e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source_root)
                .map_err(|e| template_io(entry.path(), io::Error::other(e)))?;
            let key = normalize_path(relative);

            if !include.is_match(&key) || exclude.is_match(&key) {
                trace!(file = %key, "skipped");
                continue;
            }

            let destination = dest_root.join(plan.destination_for(relative));
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|e| template_io(parent, e))?;
            }
            fs::copy(entry.path(), &destination).map_err(|e| template_io(entry.path(), e))?;
            trace!(from = %key, to = %destination.display(), "copied");
            copied += 1;
        }

        debug!(files = copied, "Template materialized");
        Ok(copied)
    }
}

fn build_globset(patterns: &[String], source_root: &Path) -> GoodboyResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| GoodboyError::Internal {
            message: format!(
                "invalid copy pattern '{pattern}' for {}: {e}",
                source_root.display()
            ),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| GoodboyError::Internal {
        message: format!("could not compile copy patterns: {e}"),
    })
}

/// Forward-slash form so patterns behave the same on every platform.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn template_io(path: &Path, e: io::Error) -> GoodboyError {
    ApplicationError::TemplateIo {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
