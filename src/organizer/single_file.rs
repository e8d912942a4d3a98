use super::types::{Action, OrganizeReport, RunOptions};
use super::{OrganizeError, Organizer};
use crate::scanner::{self, ScanError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Flattens directories that hold exactly one file and nothing else: the
/// file moves into the directory's parent under its original name and the
/// emptied directory is removed.
pub struct SingleFileCollapse;

impl Organizer for SingleFileCollapse {
    fn organize(&self, options: &RunOptions) -> Result<OrganizeReport, OrganizeError> {
        let dirs = scanner::collect_dirs(&options.root)?;
        let mut report = OrganizeReport::new(options.dry_run);

        // Evaluate candidates and conflicts against the snapshot before
        // mutating anything, so dry-run and live mode see the same tree. A
        // target that exists at snapshot time conflicts even when an earlier
        // collapse would have removed it.
        let mut collapses: Vec<(PathBuf, PathBuf, PathBuf)> = Vec::new();
        let mut planned: HashSet<PathBuf> = HashSet::new();
        for dir in dirs {
            let Some(file) = sole_file(&dir)? else { continue };
            let Some(parent) = dir.parent() else { continue };
            let Some(file_name) = file.file_name() else {
                continue;
            };
            let target = parent.join(file_name);

            if target.exists() || planned.contains(&target) {
                return Err(OrganizeError::Conflict { path: target });
            }

            planned.insert(target.clone());
            collapses.push((dir, file, target));
        }

        for (dir, file, target) in collapses {
            info!(from = ?file, to = ?target, "Collapsing single-file directory");

            if !options.dry_run {
                fs::rename(&file, &target).map_err(|e| OrganizeError::Rename {
                    from: file.clone(),
                    to: target.clone(),
                    source: e,
                })?;
                fs::remove_dir(&dir).map_err(|e| OrganizeError::RemoveDir {
                    path: dir.clone(),
                    source: e,
                })?;
            }

            report.push(Action::Move {
                from: file,
                to: target,
            });
            report.push(Action::RemoveDir { path: dir });
        }

        Ok(report)
    }

    fn description(&self) -> &'static str {
        "If a directory holds exactly one file and no subdirectories, move \
         that file one level up and remove the directory"
    }
}

/// The directory's only file, if it contains exactly one file and zero
/// subdirectories.
fn sole_file(dir: &Path) -> Result<Option<PathBuf>, OrganizeError> {
    let mut file = None;
    let mut file_count = 0;
    let mut dir_count = 0;

    for entry in fs::read_dir(dir).map_err(ScanError::Io)? {
        let entry = entry.map_err(ScanError::Io)?;
        let file_type = entry.file_type().map_err(ScanError::Io)?;
        if file_type.is_dir() {
            dir_count += 1;
        } else {
            file_count += 1;
            file = Some(entry.path());
        }
    }

    debug!(dir = ?dir, files = file_count, dirs = dir_count, "Inspected directory");

    if file_count == 1 && dir_count == 0 {
        Ok(file)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn run(root: &Path, dry_run: bool) -> Result<OrganizeReport, OrganizeError> {
        let mut options = RunOptions::new(root.to_path_buf());
        options.dry_run = dry_run;
        SingleFileCollapse.organize(&options)
    }

    #[test]
    fn test_collapses_single_file_directory() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("lonely")).unwrap();
        fs::write(root.path().join("lonely/movie.mkv"), "data").unwrap();

        let report = run(root.path(), false).unwrap();

        assert_eq!(report.mutation_count(), 2);
        assert!(root.path().join("movie.mkv").exists());
        assert!(!root.path().join("lonely").exists());
    }

    #[test]
    fn test_leaves_multi_file_directory() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("pair")).unwrap();
        fs::write(root.path().join("pair/a.txt"), "a").unwrap();
        fs::write(root.path().join("pair/b.txt"), "b").unwrap();

        let report = run(root.path(), false).unwrap();

        assert!(report.is_empty());
        assert!(root.path().join("pair/a.txt").exists());
        assert!(root.path().join("pair/b.txt").exists());
    }

    #[test]
    fn test_leaves_directory_with_subdirectory() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("outer/inner")).unwrap();
        fs::write(root.path().join("outer/only.txt"), "x").unwrap();

        let report = run(root.path(), false).unwrap();

        assert!(report.is_empty());
        assert!(root.path().join("outer/only.txt").exists());
    }

    #[test]
    fn test_leaves_empty_directory() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("empty")).unwrap();

        let report = run(root.path(), false).unwrap();

        assert!(report.is_empty());
        assert!(root.path().join("empty").exists());
    }

    #[test]
    fn test_existing_target_aborts() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("lonely")).unwrap();
        fs::write(root.path().join("lonely/movie.mkv"), "inner").unwrap();
        fs::write(root.path().join("movie.mkv"), "outer").unwrap();

        let result = run(root.path(), false);

        assert!(matches!(result, Err(OrganizeError::Conflict { .. })));
        // Nothing moved.
        assert!(root.path().join("lonely/movie.mkv").exists());
        assert_eq!(
            fs::read_to_string(root.path().join("movie.mkv")).unwrap(),
            "outer"
        );
    }

    #[test]
    fn test_colliding_collapses_abort() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("one")).unwrap();
        fs::create_dir(root.path().join("two")).unwrap();
        fs::write(root.path().join("one/same.txt"), "1").unwrap();
        fs::write(root.path().join("two/same.txt"), "2").unwrap();

        // Both collapses target root/same.txt; the second must abort, in
        // dry-run as well as live mode.
        assert!(matches!(
            run(root.path(), true),
            Err(OrganizeError::Conflict { .. })
        ));
        assert!(matches!(
            run(root.path(), false),
            Err(OrganizeError::Conflict { .. })
        ));
    }

    #[test]
    fn test_target_freed_by_earlier_collapse_still_aborts() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("a/b")).unwrap();
        fs::create_dir(root.path().join("a/c")).unwrap();
        fs::write(root.path().join("a/b/f.txt"), "x").unwrap();
        fs::write(root.path().join("a/c/b"), "y").unwrap();

        // Collapsing a/c targets a/b, which only stops existing once a/b
        // itself collapses. Conflicts are judged against the snapshot, so
        // both modes refuse instead of depending on apply order.
        assert!(matches!(
            run(root.path(), true),
            Err(OrganizeError::Conflict { .. })
        ));
        assert!(matches!(
            run(root.path(), false),
            Err(OrganizeError::Conflict { .. })
        ));

        // Live mode mutated nothing before refusing.
        assert!(root.path().join("a/b/f.txt").exists());
        assert!(root.path().join("a/c/b").exists());
    }

    #[test]
    fn test_dry_run_reports_without_mutating() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("lonely")).unwrap();
        fs::write(root.path().join("lonely/movie.mkv"), "data").unwrap();

        let dry = run(root.path(), true).unwrap();

        assert!(dry.dry_run);
        assert_eq!(dry.mutation_count(), 2);
        assert!(root.path().join("lonely/movie.mkv").exists());
        assert!(!root.path().join("movie.mkv").exists());

        // The live run performs exactly what the dry run reported.
        let live = run(root.path(), false).unwrap();
        assert_eq!(dry.actions, live.actions);
    }

    #[test]
    fn test_nested_single_file_directories() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("a/b")).unwrap();
        fs::write(root.path().join("a/b/deep.txt"), "x").unwrap();

        let report = run(root.path(), false).unwrap();

        // b collapses into a; a itself held a subdirectory at snapshot time.
        assert_eq!(report.mutation_count(), 2);
        assert!(root.path().join("a/deep.txt").exists());
        assert!(!root.path().join("a/b").exists());
    }
}
