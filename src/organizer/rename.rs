use super::types::{Action, OrganizeReport, RunOptions};
use super::{OrganizeError, Organizer};
use crate::resolver::Resolver;
use crate::scanner;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Policy-specific pieces of the rename pipeline: which base names are
/// worth renaming, and how to describe the rule.
pub trait RenamePolicy {
    /// Whether a file's base name (without extension) should be renamed.
    fn eligible(&self, stem: &str) -> bool;

    /// What an eligible base name looks like, for skip messages.
    fn requirement(&self) -> &'static str;

    fn description(&self) -> &'static str;
}

/// Renames obfuscated base names: eligible only when the stem consists
/// entirely of hexadecimal digits.
pub struct HexObfuscated;

impl RenamePolicy for HexObfuscated {
    fn eligible(&self, stem: &str) -> bool {
        !stem.is_empty() && stem.chars().all(|c| c.is_ascii_hexdigit())
    }

    fn requirement(&self) -> &'static str {
        "a base name made entirely of hex digits"
    }

    fn description(&self) -> &'static str {
        "Rename files whose base name is a hex string, using metadata \
         guessed from the parent directory name"
    }
}

/// Shared traverse-filter-rename pipeline: collect files (optionally MIME
/// filtered), skip ineligible ones, and rename the rest to a name
/// synthesized by the metadata resolver, keeping the extension.
pub struct PatternRename<P: RenamePolicy> {
    policy: P,
}

impl<P: RenamePolicy> PatternRename<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }
}

impl<P: RenamePolicy> Organizer for PatternRename<P> {
    fn organize(&self, options: &RunOptions) -> Result<OrganizeReport, OrganizeError> {
        let files = scanner::collect_files(&options.root, options.mime_filter.as_deref())?;
        let mut resolver = Resolver::new(options.guess_options.clone())?;
        let mut report = OrganizeReport::new(options.dry_run);
        let mut planned: HashSet<PathBuf> = HashSet::new();

        for file in files {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            if !options.force && !self.policy.eligible(&stem) {
                warn!(file = ?file, "Skipping ineligible file");
                report.push(Action::Skip {
                    path: file,
                    reason: format!("expected {}", self.policy.requirement()),
                });
                continue;
            }

            let Some(parent) = file.parent() else { continue };
            let hint = parent
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let resolved = resolver.resolve(&hint, &file)?;
            let mut new_name = resolved.new_name();
            if let Some(ext) = file.extension() {
                new_name.push('.');
                new_name.push_str(&ext.to_string_lossy());
            }
            let target = parent.join(&new_name);

            if target == file {
                report.push(Action::Skip {
                    path: file,
                    reason: "already has the resolved name".to_string(),
                });
                continue;
            }

            if target.exists() || planned.contains(&target) {
                return Err(OrganizeError::Conflict { path: target });
            }

            info!(from = ?file, to = ?target, "Renaming file");

            if !options.dry_run {
                fs::rename(&file, &target).map_err(|e| OrganizeError::Rename {
                    from: file.clone(),
                    to: target.clone(),
                    source: e,
                })?;
            }

            planned.insert(target.clone());
            report.push(Action::Rename {
                from: file,
                to: target,
            });
        }

        Ok(report)
    }

    fn description(&self) -> &'static str {
        self.policy.description()
    }
}
