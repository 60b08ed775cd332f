use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhotoEntry {
    pub original_name: String,
    pub path: PathBuf,
    pub timestamp: Option<DateTime<Local>>,
    pub ordinal: Option<usize>,
}

impl PhotoEntry {
    pub fn new(path: &Path, timestamp: Option<DateTime<Local>>) -> Self {
        let original_name = path
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            original_name,
            path: path.to_path_buf(),
            timestamp,
            ordinal: None,
        }
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::PhotoEntry;
    use std::path::Path;

    #[test]
    fn new_entry_takes_file_name_and_leaves_ordinal_unset() {
        let entry = PhotoEntry::new(Path::new("/photos/IMG_0001.JPG"), None);
        assert_eq!(entry.original_name, "IMG_0001.JPG");
        assert_eq!(entry.ordinal, None);
        assert!(!entry.has_timestamp());
    }
}
