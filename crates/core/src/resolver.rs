use crate::error::SortError;
use crate::metadata::PhotoEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn from_desc_flag(desc: bool) -> Self {
        if desc {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

/// What to do with photos whose capture time could not be read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingMetadataPolicy {
    /// After every timestamped photo when ascending, before them when descending.
    #[default]
    Last,
    Exclude,
    Fail,
}

/// Sorts `entries` and assigns ordinals `1..=n` in the resulting order.
///
/// Ascending order is by timestamp, then by file name. Descending order is the
/// exact reverse of ascending order.
pub fn resolve_order(
    mut entries: Vec<PhotoEntry>,
    direction: Direction,
    policy: MissingMetadataPolicy,
) -> Result<Vec<PhotoEntry>, SortError> {
    match policy {
        MissingMetadataPolicy::Last => {}
        MissingMetadataPolicy::Exclude => {
            entries.retain(|entry| {
                if !entry.has_timestamp() {
                    warn!(file = %entry.original_name, "excluded: no capture timestamp");
                }
                entry.has_timestamp()
            });
        }
        MissingMetadataPolicy::Fail => {
            if let Some(missing) = entries
                .iter()
                .filter(|entry| !entry.has_timestamp())
                .min_by(|a, b| a.original_name.cmp(&b.original_name))
            {
                return Err(SortError::MissingMetadata(missing.original_name.clone()));
            }
        }
    }

    entries.sort_by(compare_ascending);
    if direction == Direction::Descending {
        entries.reverse();
    }

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.ordinal = Some(index + 1);
    }

    Ok(entries)
}

fn compare_ascending(a: &PhotoEntry, b: &PhotoEntry) -> Ordering {
    let by_time = match (&a.timestamp, &b.timestamp) {
        (Some(t1), Some(t2)) => t1.cmp(t2),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time.then_with(|| a.original_name.cmp(&b.original_name))
}

/// Digits needed for the largest ordinal, never fewer than `min_width`.
pub fn prefix_width(count: usize, min_width: usize) -> usize {
    count.max(1).to_string().len().max(min_width)
}
