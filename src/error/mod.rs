mod codes;

pub use codes::ExitCode;

use crate::organizer::OrganizeError;
use crate::probe::ProbeError;
use crate::resolver::ResolveError;
use crate::scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Unknown organizer: {key}")]
    UnknownOrganizer { key: String, available: Vec<String> },

    #[error("Refusing to overwrite existing path: {path}")]
    OverwriteConflict { path: PathBuf },

    #[error("Name resolution failed: {0}")]
    NameResolution(ResolveError),

    #[error("Media probe failed: {0}")]
    Probe(ProbeError),

    #[error("Rename failed: {from} -> {to}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove directory: {path}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::UnknownOrganizer { .. } => ExitCode::UnknownOrganizer,
            AppError::OverwriteConflict { .. } => ExitCode::OverwriteConflict,
            AppError::NameResolution(_) => ExitCode::NameResolution,
            AppError::Probe(_) => ExitCode::ProbeError,
            AppError::RenameFailed { .. } => ExitCode::RenameError,
            AppError::RemoveFailed { .. } => ExitCode::RenameError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The target directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The target path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::UnknownOrganizer { key, available } => {
                let mut msg = format!("No organizer is registered under {key:?}.\n\nAvailable:\n");
                for name in available {
                    msg.push_str(&format!("  - {}\n", name));
                }
                msg.push_str("\nRun with --list for descriptions.");
                msg
            }

            AppError::OverwriteConflict { path } => {
                format!(
                    "A target path already exists and would be overwritten:\n  {}\n\n\
                     No changes were applied beyond this point. Move the existing\n\
                     file out of the way and run again.",
                    path.display()
                )
            }

            AppError::NameResolution(err) => {
                format!(
                    "Could not resolve a new file name:\n  {}\n\n\
                     The run stopped before renaming anything else.",
                    err
                )
            }

            AppError::Probe(err) => {
                format!(
                    "Could not probe media metadata:\n  {}\n\n\
                     ffprobe must be installed and the file must be readable.",
                    err
                )
            }

            AppError::RenameFailed { from, to, source } => {
                format!(
                    "Failed to rename:\n\
                     From: {}\n\
                     To:   {}\n\
                     Error: {}\n\n\
                     Check file permissions and ensure no files are open.",
                    from.display(),
                    to.display(),
                    source
                )
            }

            AppError::RemoveFailed { path, source } => {
                format!(
                    "Failed to remove directory:\n  {}\n  Error: {}",
                    path.display(),
                    source
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScanError::NotADirectory(path) => AppError::NotADirectory { path },
            ScanError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScanError::Io(e) => AppError::Other(format!("I/O error: {}", e)),
            ScanError::Walk(e) => AppError::Other(format!("Traversal error: {}", e)),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Probe(e) => AppError::Probe(e),
            other => AppError::NameResolution(other),
        }
    }
}

impl From<ProbeError> for AppError {
    fn from(err: ProbeError) -> Self {
        AppError::Probe(err)
    }
}

impl From<OrganizeError> for AppError {
    fn from(err: OrganizeError) -> Self {
        match err {
            OrganizeError::UnknownOrganizer(key) => AppError::UnknownOrganizer {
                key,
                available: crate::organizer::registry()
                    .keys()
                    .map(|k| k.to_string())
                    .collect(),
            },
            OrganizeError::Scan(e) => e.into(),
            OrganizeError::Conflict { path } => AppError::OverwriteConflict { path },
            OrganizeError::Resolve(e) => e.into(),
            OrganizeError::Rename { from, to, source } => {
                AppError::RenameFailed { from, to, source }
            }
            OrganizeError::RemoveDir { path, source } => AppError::RemoveFailed { path, source },
        }
    }
}
