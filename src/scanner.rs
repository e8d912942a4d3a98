use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
}

pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    if !root.exists() {
        return Err(ScanError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Every directory strictly below `root`, as one snapshot taken up front.
///
/// Entries are sorted so runs over the same tree are deterministic; no order
/// across distinct directories is otherwise promised.
pub fn collect_dirs(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    validate_root(root)?;
    debug!(path = ?root, "Collecting directories");

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(walk_error(root))?;
        if entry.file_type().is_dir() {
            trace!(dir = ?entry.path(), "Found directory");
            dirs.push(entry.into_path());
        }
    }

    dirs.sort();
    debug!(count = dirs.len(), "Directory scan complete");
    Ok(dirs)
}

/// Every file below `root` whose guessed MIME type contains `mime_filter`
/// (case-insensitive), or every file when no filter is given.
///
/// With a filter present, files whose type cannot be guessed are excluded.
pub fn collect_files(root: &Path, mime_filter: Option<&str>) -> Result<Vec<PathBuf>, ScanError> {
    validate_root(root)?;
    debug!(path = ?root, filter = ?mime_filter, "Collecting files");

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(walk_error(root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(filter) = mime_filter {
            if !mime_matches(entry.path(), filter) {
                trace!(file = ?entry.path(), "MIME filter excluded file");
                continue;
            }
        }
        files.push(entry.into_path());
    }

    files.sort();
    debug!(count = files.len(), "File scan complete");
    Ok(files)
}

/// Case-insensitive containment test of `filter` against the file's guessed
/// `type/subtype` string. Unknown types never match.
pub fn mime_matches(path: &Path, filter: &str) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| {
            mime.essence_str()
                .to_ascii_lowercase()
                .contains(&filter.to_ascii_lowercase())
        })
        .unwrap_or(false)
}

/// True when the file's guessed MIME type is a video type.
pub fn is_video(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::VIDEO)
        .unwrap_or(false)
}

fn walk_error(root: &Path) -> impl Fn(walkdir::Error) -> ScanError + '_ {
    move |e| {
        if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            ScanError::PermissionDenied(path)
        } else {
            ScanError::Walk(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_dirs_empty() {
        let dir = tempdir().unwrap();
        let result = collect_dirs(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_collect_dirs_nested() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();
        fs::write(dir.path().join("file.txt"), "content").unwrap();

        let result = collect_dirs(dir.path()).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0], dir.path().join("a"));
        assert_eq!(result[1], dir.path().join("a/b"));
        assert_eq!(result[2], dir.path().join("c"));
    }

    #[test]
    fn test_collect_files_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("top.txt"), "x").unwrap();
        fs::write(dir.path().join("sub/inner.txt"), "x").unwrap();

        let result = collect_files(dir.path(), None).unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.contains(&dir.path().join("top.txt")));
        assert!(result.contains(&dir.path().join("sub/inner.txt")));
    }

    #[test]
    fn test_collect_files_mime_filter() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("clip.mkv"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("unknown"), "x").unwrap();

        let result = collect_files(dir.path(), Some("video")).unwrap();

        assert_eq!(result, vec![dir.path().join("clip.mkv")]);
    }

    #[test]
    fn test_mime_filter_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("clip.mp4"), "x").unwrap();

        let result = collect_files(dir.path(), Some("VIDEO")).unwrap();

        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_path_not_found() {
        let result = collect_dirs(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(ScanError::PathNotFound(_))));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "content").unwrap();

        let result = collect_files(&file_path, None);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_is_video() {
        assert!(is_video(Path::new("clip.mkv")));
        assert!(is_video(Path::new("clip.mp4")));
        assert!(!is_video(Path::new("notes.txt")));
        assert!(!is_video(Path::new("noextension")));
    }

    #[test]
    fn test_mime_matches_substring() {
        assert!(mime_matches(Path::new("clip.mkv"), "video"));
        assert!(mime_matches(Path::new("clip.mkv"), "matroska"));
        assert!(!mime_matches(Path::new("clip.mkv"), "audio"));
        assert!(!mime_matches(Path::new("unknown"), "video"));
    }
}
