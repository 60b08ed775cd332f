use crate::error::ExtractionError;
use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
use exif::{Exif, In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Source of capture timestamps, one file at a time.
pub trait TimestampExtractor {
    fn extract(&self, path: &Path) -> Result<DateTime<Local>, ExtractionError>;
}

/// Reads the capture time from the Exif block embedded in the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifExtractor;

const DATE_TAGS: &[Tag] = &[Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

impl TimestampExtractor for ExifExtractor {
    fn extract(&self, path: &Path) -> Result<DateTime<Local>, ExtractionError> {
        let file = File::open(path).map_err(|source| ExtractionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut buf = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut buf)
            .map_err(|source| ExtractionError::Exif {
                path: path.to_path_buf(),
                source,
            })?;

        timestamp_from_exif(&exif, path)
    }
}

/// First date tag whose value parses. Placeholder values such as
/// `0000:00:00 00:00:00` fall through to the next tag.
pub(crate) fn timestamp_from_exif(
    exif: &Exif,
    path: &Path,
) -> Result<DateTime<Local>, ExtractionError> {
    let mut unparseable = None;
    for tag in DATE_TAGS {
        let Some(field) = exif.get_field(*tag, In::PRIMARY) else {
            continue;
        };
        let raw = field.display_value().to_string();
        match parse_date(&raw) {
            Some(ts) => return Ok(ts),
            None => {
                unparseable.get_or_insert(raw);
            }
        }
    }

    Err(match unparseable {
        Some(value) => ExtractionError::UnparseableTimestamp {
            path: path.to_path_buf(),
            value,
        },
        None => ExtractionError::NoTimestamp(path.to_path_buf()),
    })
}

pub(crate) fn parse_date(input: &str) -> Option<DateTime<Local>> {
    let normalized = input.trim().trim_matches('"');

    let candidates = [
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%.f%:z",
    ];

    for fmt in candidates {
        if let Ok(dt) = DateTime::parse_from_str(normalized, fmt) {
            return Some(dt.with_timezone(&Local));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            return Some(naive_to_local(&naive));
        }
    }

    None
}

/// Wall-clock times skipped by a DST change are moved past the gap.
fn naive_to_local(naive: &NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(*naive + Duration::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| Local.from_utc_datetime(naive))
}
