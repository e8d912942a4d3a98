use crate::guess::GuessOptions;
use std::path::PathBuf;

/// Resolved command-line options for one run; built once, never mutated.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root of the tree to organize.
    pub root: PathBuf,
    /// Case-insensitive MIME substring filter for file candidates.
    pub mime_filter: Option<String>,
    /// Record intended mutations without touching the filesystem.
    pub dry_run: bool,
    /// Bypass the policy eligibility check.
    pub force: bool,
    /// Passed through to the name resolver.
    pub guess_options: GuessOptions,
}

impl RunOptions {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            mime_filter: None,
            dry_run: false,
            force: false,
            guess_options: GuessOptions::default(),
        }
    }
}

/// One intended or performed filesystem mutation, or a per-file skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move { from: PathBuf, to: PathBuf },
    RemoveDir { path: PathBuf },
    Rename { from: PathBuf, to: PathBuf },
    Skip { path: PathBuf, reason: String },
}

/// What one strategy run did (or, under dry-run, would do).
///
/// The recorded actions are identical between dry-run and live mode on the
/// same input tree.
#[derive(Debug, Clone)]
pub struct OrganizeReport {
    pub actions: Vec<Action>,
    pub dry_run: bool,
}

impl OrganizeReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            actions: Vec::new(),
            dry_run,
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Number of recorded mutations (everything but skips).
    pub fn mutation_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| !matches!(a, Action::Skip { .. }))
            .count()
    }

    pub fn skip_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Skip { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = OrganizeReport::new(true);
        assert!(report.is_empty());

        report.push(Action::Move {
            from: PathBuf::from("/a/b/f.txt"),
            to: PathBuf::from("/a/f.txt"),
        });
        report.push(Action::RemoveDir {
            path: PathBuf::from("/a/b"),
        });
        report.push(Action::Skip {
            path: PathBuf::from("/a/readme.md"),
            reason: "not eligible".to_string(),
        });

        assert_eq!(report.len(), 3);
        assert_eq!(report.mutation_count(), 2);
        assert_eq!(report.skip_count(), 1);
        assert!(report.dry_run);
    }
}
