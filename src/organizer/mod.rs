mod rename;
mod single_file;
mod types;

pub use rename::{HexObfuscated, PatternRename, RenamePolicy};
pub use single_file::SingleFileCollapse;
pub use types::{Action, OrganizeReport, RunOptions};

use crate::resolver::ResolveError;
use crate::scanner::ScanError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("unknown organizer: {0:?}")]
    UnknownOrganizer(String),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("target already exists: {path}")]
    Conflict { path: PathBuf },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to rename {from} -> {to}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove directory {path}")]
    RemoveDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A named reorganization policy sharing the traverse-filter-apply pipeline.
pub trait Organizer {
    /// Traverse the configured root, apply (or, under dry-run, record) this
    /// policy's mutations, and report what happened. Any precondition
    /// violation aborts the whole run.
    fn organize(&self, options: &RunOptions) -> Result<OrganizeReport, OrganizeError>;

    /// Static human-readable explanation, used for listing strategies.
    fn description(&self) -> &'static str;
}

/// The fixed key-to-strategy mapping. Built once at startup.
pub fn registry() -> BTreeMap<&'static str, Box<dyn Organizer>> {
    let mut organizers: BTreeMap<&'static str, Box<dyn Organizer>> = BTreeMap::new();
    organizers.insert("single_file", Box::new(SingleFileCollapse));
    organizers.insert("hex_obfuscated", Box::new(PatternRename::new(HexObfuscated)));
    organizers
}

/// Resolve `key` in the registry and drive the strategy over the options'
/// root path.
pub fn run_organizer(key: &str, options: &RunOptions) -> Result<OrganizeReport, OrganizeError> {
    let organizers = registry();
    let organizer = organizers
        .get(key)
        .ok_or_else(|| OrganizeError::UnknownOrganizer(key.to_string()))?;

    info!(organizer = key, root = ?options.root, dry_run = options.dry_run, "Running organizer");
    organizer.organize(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_registry_keys() {
        let organizers = registry();
        let keys: Vec<_> = organizers.keys().copied().collect();
        assert_eq!(keys, vec!["hex_obfuscated", "single_file"]);
    }

    #[test]
    fn test_registry_descriptions_nonempty() {
        for (key, organizer) in registry() {
            assert!(!organizer.description().is_empty(), "{key} lacks a description");
        }
    }

    #[test]
    fn test_unknown_organizer() {
        let dir = tempdir().unwrap();
        let options = RunOptions::new(dir.path().to_path_buf());

        let result = run_organizer("no_such_thing", &options);
        assert!(matches!(result, Err(OrganizeError::UnknownOrganizer(_))));
    }

    #[test]
    fn test_run_organizer_dispatches() {
        let dir = tempdir().unwrap();
        let options = RunOptions::new(dir.path().to_path_buf());

        let report = run_organizer("single_file", &options).unwrap();
        assert!(report.is_empty());
    }
}
