mod config;
mod error;
mod exif_reader;
mod metadata;
mod naming;
mod planner;
mod reader;
mod renamer;
mod resolver;
#[cfg(test)]
mod testing;

pub use config::{
    app_paths, load_config, load_config_from, save_config, save_config_to, validate_separator,
    AppConfig, AppPaths, DEFAULT_MIN_WIDTH, DEFAULT_SEPARATOR,
};
pub use error::{ExtractionError, SortError};
pub use exif_reader::{ExifExtractor, TimestampExtractor};
pub use metadata::PhotoEntry;
pub use naming::{create_prefix, prefixed_name, strip_prefix};
pub use planner::{plan_order, run, OrderPlan, RunOptions, RunOutcome};
pub use reader::{is_supported_image, list_photos, read_entries, DirectoryListing};
pub use renamer::{
    apply_prefixes, order_rows, revert_prefixes, write_order_table, Mode, OrderRow,
    RenameOperation, RunReport,
};
pub use resolver::{prefix_width, resolve_order, Direction, MissingMetadataPolicy};
