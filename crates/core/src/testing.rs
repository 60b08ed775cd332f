use crate::error::ExtractionError;
use crate::exif_reader::TimestampExtractor;
use chrono::{DateTime, Local, TimeZone};
use std::collections::HashMap;
use std::path::Path;

/// Timestamps keyed by file name; anything unknown has no metadata.
#[derive(Debug, Default)]
pub struct FakeExtractor {
    timestamps: HashMap<String, DateTime<Local>>,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: &str, year: i32, month: u32, day: u32) -> Self {
        self.with_time(name, local(year, month, day, 12, 0, 0))
    }

    pub fn with_time(mut self, name: &str, timestamp: DateTime<Local>) -> Self {
        self.timestamps.insert(name.to_string(), timestamp);
        self
    }
}

impl TimestampExtractor for FakeExtractor {
    fn extract(&self, path: &Path) -> Result<DateTime<Local>, ExtractionError> {
        let name = path
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default();
        self.timestamps
            .get(&name)
            .copied()
            .ok_or_else(|| ExtractionError::NoTimestamp(path.to_path_buf()))
    }
}

pub fn local(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .earliest()
        .expect("valid local time")
}
