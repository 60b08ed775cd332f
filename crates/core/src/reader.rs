use crate::error::SortError;
use crate::exif_reader::TimestampExtractor;
use crate::metadata::PhotoEntry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "heic", "heif"];

/// Supported images directly inside `root`, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub skipped: usize,
}

pub fn list_photos(root: &Path) -> Result<DirectoryListing, SortError> {
    let meta = fs::metadata(root).map_err(|err| SortError::from_dir_io(root.to_path_buf(), err))?;
    if !meta.is_dir() {
        return Err(SortError::NotADirectory(root.to_path_buf()));
    }

    let entries =
        fs::read_dir(root).map_err(|err| SortError::from_dir_io(root.to_path_buf(), err))?;

    let mut listing = DirectoryListing {
        root: root.to_path_buf(),
        ..Default::default()
    };
    for entry in entries {
        let entry = entry.map_err(|err| SortError::from_dir_io(root.to_path_buf(), err))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_hidden(&path) || !is_supported_image(&path) {
            listing.skipped += 1;
            continue;
        }
        listing.files.push(path);
    }
    listing.files.sort();

    debug!(
        root = %root.display(),
        photos = listing.files.len(),
        skipped = listing.skipped,
        "listed directory"
    );
    Ok(listing)
}

pub fn read_entries<E>(listing: &DirectoryListing, extractor: &E) -> Vec<PhotoEntry>
where
    E: TimestampExtractor + ?Sized,
{
    listing
        .files
        .iter()
        .map(|path| {
            let timestamp = match extractor.extract(path) {
                Ok(ts) => Some(ts),
                Err(err) => {
                    debug!(error = %err, "no capture timestamp");
                    None
                }
            };
            PhotoEntry::new(path, timestamp)
        })
        .collect()
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
