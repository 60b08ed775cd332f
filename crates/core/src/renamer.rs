use crate::error::SortError;
use crate::metadata::PhotoEntry;
use crate::naming::{create_prefix, prefixed_name, strip_prefix};
use crate::reader::DirectoryListing;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The single operation a run performs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Test,
    Revert,
}

impl Mode {
    /// Revert wins over test; neither flag means a normal rename.
    pub fn select(revert: bool, test: bool) -> Self {
        match (revert, test) {
            (true, _) => Mode::Revert,
            (false, true) => Mode::Test,
            (false, false) => Mode::Normal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRow {
    pub ordinal: usize,
    pub prefix: String,
    pub original_name: String,
    pub target_name: String,
    pub timestamp: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameOperation {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub renamed: Vec<RenameOperation>,
    pub skipped: usize,
    pub failures: Vec<SortError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Rows describing what a normal run would do, in resolved order.
pub fn order_rows(entries: &[PhotoEntry], width: usize, separator: &str) -> Vec<OrderRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let ordinal = entry.ordinal.unwrap_or(index + 1);
            OrderRow {
                ordinal,
                prefix: create_prefix(ordinal, width),
                original_name: entry.original_name.clone(),
                target_name: prefixed_name(ordinal, width, separator, &entry.original_name),
                timestamp: entry.timestamp,
            }
        })
        .collect()
}

pub fn write_order_table<W: Write>(rows: &[OrderRow], out: &mut W) -> io::Result<()> {
    for row in rows {
        let taken = row
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{}  {} -> {}  ({taken})",
            row.prefix, row.original_name, row.target_name
        )?;
    }
    Ok(())
}

/// Prefixes every resolved entry with its ordinal. Failures are collected per
/// file; earlier renames stay applied.
pub fn apply_prefixes(entries: &[PhotoEntry], width: usize, separator: &str) -> RunReport {
    let mut report = RunReport::default();
    let rows = order_rows(entries, width, separator);
    for (row, entry) in rows.iter().zip(entries) {
        let target = sibling(&entry.path, &row.target_name);
        if utf8_file_name(&entry.path).is_none() {
            reject_non_utf8(&entry.path, &target, &mut report);
            continue;
        }
        if strip_prefix(&entry.original_name, separator, width).is_some() {
            warn!(file = %entry.original_name, "file already carries an ordinal prefix");
        }
        rename_one(&entry.path, &target, &mut report);
    }
    report
}

/// Strips ordinal prefixes from every matching photo in the listing.
///
/// Any run of leading digits counts, so prefixes written with a narrower
/// width are reverted too.
pub fn revert_prefixes(listing: &DirectoryListing, separator: &str) -> RunReport {
    let mut report = RunReport::default();
    for path in &listing.files {
        let Some(name) = utf8_file_name(path) else {
            let lossy = path
                .file_name()
                .map(|v| v.to_string_lossy().to_string())
                .unwrap_or_default();
            match strip_prefix(&lossy, separator, 1) {
                Some(original) => reject_non_utf8(path, &sibling(path, original), &mut report),
                None => report.skipped += 1,
            }
            continue;
        };
        let Some(original) = strip_prefix(name, separator, 1) else {
            report.skipped += 1;
            continue;
        };
        let target = sibling(path, original);
        rename_one(path, &target, &mut report);
    }
    report
}

fn utf8_file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

// Non-UTF-8 names are reported and never renamed.
fn reject_non_utf8(from: &Path, to: &Path, report: &mut RunReport) {
    let err = SortError::RenameFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason: "file name is not valid UTF-8".to_string(),
    };
    warn!(error = %err, "rename failed");
    report.failures.push(err);
}

fn rename_one(from: &Path, to: &Path, report: &mut RunReport) {
    match try_rename(from, to) {
        Ok(()) => {
            info!(from = %from.display(), to = %to.display(), "renamed");
            report.renamed.push(RenameOperation {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        Err(err) => {
            warn!(error = %err, "rename failed");
            report.failures.push(err);
        }
    }
}

fn try_rename(from: &Path, to: &Path) -> Result<(), SortError> {
    let failed = |reason: String| SortError::RenameFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason,
    };
    // fs::rename silently replaces an existing file on Unix.
    if fs::symlink_metadata(to).is_ok() {
        return Err(failed("target already exists".to_string()));
    }
    fs::rename(from, to).map_err(|err| failed(err.to_string()))
}

fn sibling(path: &Path, name: &str) -> PathBuf {
    path.parent()
        .map(|parent| parent.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}
