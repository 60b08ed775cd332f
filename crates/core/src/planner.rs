use crate::config::AppConfig;
use crate::error::SortError;
use crate::exif_reader::TimestampExtractor;
use crate::metadata::PhotoEntry;
use crate::reader::{list_photos, read_entries};
use crate::renamer::{apply_prefixes, order_rows, revert_prefixes, Mode, OrderRow, RunReport};
use crate::resolver::{prefix_width, resolve_order, Direction, MissingMetadataPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub directory: PathBuf,
    pub mode: Mode,
    pub direction: Direction,
    pub missing_metadata: MissingMetadataPolicy,
    pub separator: String,
    pub min_width: usize,
}

impl RunOptions {
    pub fn from_config(directory: PathBuf, config: &AppConfig) -> Self {
        Self {
            directory,
            mode: Mode::Normal,
            direction: Direction::from_desc_flag(config.descending_default),
            missing_metadata: config.missing_metadata,
            separator: config.separator.clone(),
            min_width: config.min_width,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlan {
    pub root: PathBuf,
    pub direction: Direction,
    pub width: usize,
    pub rows: Vec<OrderRow>,
}

#[derive(Debug)]
pub enum RunOutcome {
    Preview(OrderPlan),
    Applied(RunReport),
}

/// Lists, reads and orders the photos without touching the filesystem.
pub fn plan_order<E>(options: &RunOptions, extractor: &E) -> Result<OrderPlan, SortError>
where
    E: TimestampExtractor + ?Sized,
{
    let resolved = resolve_directory(options, extractor)?;
    Ok(OrderPlan {
        rows: order_rows(&resolved.entries, resolved.width, &options.separator),
        root: resolved.root,
        direction: options.direction,
        width: resolved.width,
    })
}

struct ResolvedDirectory {
    root: PathBuf,
    entries: Vec<PhotoEntry>,
    width: usize,
    /// Non-images, hidden files and photos dropped by the missing-metadata policy.
    skipped: usize,
}

fn resolve_directory<E>(
    options: &RunOptions,
    extractor: &E,
) -> Result<ResolvedDirectory, SortError>
where
    E: TimestampExtractor + ?Sized,
{
    let listing = list_photos(&options.directory)?;
    let entries = read_entries(&listing, extractor);
    let read = entries.len();
    let entries = resolve_order(entries, options.direction, options.missing_metadata)?;
    let width = prefix_width(entries.len(), options.min_width);

    debug!(photos = entries.len(), width, "resolved order");
    Ok(ResolvedDirectory {
        skipped: listing.skipped + (read - entries.len()),
        root: listing.root,
        entries,
        width,
    })
}

/// Runs the selected mode. Directory and policy errors abort; per-file rename
/// failures are collected in the returned report.
pub fn run<E>(options: &RunOptions, extractor: &E) -> Result<RunOutcome, SortError>
where
    E: TimestampExtractor + ?Sized,
{
    match options.mode {
        Mode::Test => plan_order(options, extractor).map(RunOutcome::Preview),
        Mode::Normal => {
            let resolved = resolve_directory(options, extractor)?;
            let mut report = apply_prefixes(&resolved.entries, resolved.width, &options.separator);
            report.skipped += resolved.skipped;
            Ok(RunOutcome::Applied(report))
        }
        Mode::Revert => {
            let listing = list_photos(&options.directory)?;
            let mut report = revert_prefixes(&listing, &options.separator);
            report.skipped += listing.skipped;
            Ok(RunOutcome::Applied(report))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, RunOptions, RunOutcome};
    use crate::config::AppConfig;
    use crate::error::SortError;
    use crate::renamer::Mode;
    use crate::resolver::{Direction, MissingMetadataPolicy};
    use crate::testing::FakeExtractor;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn dir_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("read dir")
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn setup(dir: &Path) -> FakeExtractor {
        for name in ["b.jpg", "a.jpg", "c.jpg"] {
            fs::write(dir.join(name), b"x").expect("write");
        }
        FakeExtractor::new()
            .with("a.jpg", 2020, 1, 1)
            .with("b.jpg", 2020, 1, 2)
    }

    fn options(dir: &Path, mode: Mode, direction: Direction) -> RunOptions {
        let mut options = RunOptions::from_config(dir.to_path_buf(), &AppConfig::default());
        options.mode = mode;
        options.direction = direction;
        options
    }

    fn preview_names(outcome: RunOutcome) -> Vec<String> {
        match outcome {
            RunOutcome::Preview(plan) => plan.rows.into_iter().map(|r| r.target_name).collect(),
            RunOutcome::Applied(_) => panic!("expected preview"),
        }
    }

    #[test]
    fn test_mode_previews_without_mutation() {
        let temp = tempdir().expect("tempdir");
        let extractor = setup(temp.path());
        let before = dir_names(temp.path());

        let outcome = run(
            &options(temp.path(), Mode::Test, Direction::Ascending),
            &extractor,
        )
        .expect("run");
        assert_eq!(
            preview_names(outcome),
            vec!["001__a.jpg", "002__b.jpg", "003__c.jpg"]
        );
        assert_eq!(dir_names(temp.path()), before);
    }

    #[test]
    fn descending_preview_puts_missing_metadata_first() {
        let temp = tempdir().expect("tempdir");
        let extractor = setup(temp.path());

        let outcome = run(
            &options(temp.path(), Mode::Test, Direction::Descending),
            &extractor,
        )
        .expect("run");
        assert_eq!(
            preview_names(outcome),
            vec!["001__c.jpg", "002__b.jpg", "003__a.jpg"]
        );
    }

    #[test]
    fn normal_then_revert_restores_directory() {
        let temp = tempdir().expect("tempdir");
        let extractor = setup(temp.path());
        let before = dir_names(temp.path());

        let outcome = run(
            &options(temp.path(), Mode::Normal, Direction::Ascending),
            &extractor,
        )
        .expect("rename");
        assert!(matches!(outcome, RunOutcome::Applied(ref r) if r.is_success()));
        assert_eq!(
            dir_names(temp.path()),
            vec!["001__a.jpg", "002__b.jpg", "003__c.jpg"]
        );

        let outcome = run(
            &options(temp.path(), Mode::Revert, Direction::Ascending),
            &extractor,
        )
        .expect("revert");
        assert!(matches!(outcome, RunOutcome::Applied(ref r) if r.is_success()));
        assert_eq!(dir_names(temp.path()), before);
    }

    #[test]
    fn fail_policy_aborts_before_renaming() {
        let temp = tempdir().expect("tempdir");
        let extractor = setup(temp.path());
        let before = dir_names(temp.path());

        let mut opts = options(temp.path(), Mode::Normal, Direction::Ascending);
        opts.missing_metadata = MissingMetadataPolicy::Fail;
        let err = run(&opts, &extractor).expect_err("c.jpg has no metadata");
        assert!(matches!(err, SortError::MissingMetadata(name) if name == "c.jpg"));
        assert_eq!(dir_names(temp.path()), before);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("nope");
        let err = run(
            &options(&missing, Mode::Revert, Direction::Ascending),
            &FakeExtractor::new(),
        )
        .expect_err("missing dir");
        assert!(matches!(err, SortError::DirectoryNotFound(_)));
    }

    #[test]
    fn report_counts_files_that_were_not_renamed() {
        let temp = tempdir().expect("tempdir");
        let extractor = setup(temp.path());
        fs::write(temp.path().join("notes.txt"), b"x").expect("write notes");
        fs::write(temp.path().join(".hidden.jpg"), b"x").expect("write hidden");

        let mut opts = options(temp.path(), Mode::Normal, Direction::Ascending);
        opts.missing_metadata = MissingMetadataPolicy::Exclude;
        let RunOutcome::Applied(report) = run(&opts, &extractor).expect("rename") else {
            panic!("expected applied report");
        };
        assert_eq!(report.renamed.len(), 2);
        assert_eq!(report.skipped, 3);

        let opts = options(temp.path(), Mode::Revert, Direction::Ascending);
        let RunOutcome::Applied(report) = run(&opts, &extractor).expect("revert") else {
            panic!("expected applied report");
        };
        assert_eq!(report.renamed.len(), 2);
        assert_eq!(report.skipped, 3);
    }
}
