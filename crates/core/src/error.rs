use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no capture timestamp found: {0}")]
    MissingMetadata(String),
    #[error("failed to rename {} -> {}: {reason}", .from.display(), .to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },
}

impl SortError {
    /// Maps a directory-level I/O failure onto the fatal error kinds.
    pub(crate) fn from_dir_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => SortError::DirectoryNotFound(path),
            io::ErrorKind::PermissionDenied => SortError::PermissionDenied(path),
            _ => SortError::ReadDirectory { path, source },
        }
    }
}

/// Per-file failure of the timestamp extractor. Never fatal for a run.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse Exif in {}: {source}", .path.display())]
    Exif {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },
    #[error("no date tag in {}", .0.display())]
    NoTimestamp(PathBuf),
    #[error("unrecognised date value {value:?} in {}", .path.display())]
    UnparseableTimestamp { path: PathBuf, value: String },
}
