use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use photo_sorter_core::{
    load_config, load_config_from, run, save_config, save_config_to, validate_separator,
    write_order_table, AppConfig, ExifExtractor, MissingMetadataPolicy, Mode, OrderPlan,
    RunOptions, RunOutcome, RunReport,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "photo-sorter")]
#[command(about = "Prefixes photos with their capture-time order, or strips that prefix again")]
struct Cli {
    /// Directory containing the photos (not searched recursively)
    #[arg(required_unless_present = "save_defaults")]
    dir: Option<PathBuf>,
    /// Newest first instead of oldest first
    #[arg(long, default_value_t = false)]
    desc: bool,
    /// Only print the resolved order
    #[arg(short, long, default_value_t = false)]
    test: bool,
    /// Strip previously applied prefixes; overrides --test
    #[arg(short, long, default_value_t = false)]
    revert: bool,
    /// Text between the ordinal and the original name
    #[arg(short, long, value_parser = parse_delim)]
    delim: Option<String>,
    /// Handling of photos without a capture timestamp
    #[arg(long, value_enum)]
    missing: Option<MissingArg>,
    /// Minimum number of digits in the ordinal
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    min_width: Option<u16>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Read settings from this file instead of the user config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store --desc, --delim, --missing and --min-width as defaults, then exit
    #[arg(long, default_value_t = false)]
    save_defaults: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MissingArg {
    Last,
    Exclude,
    Fail,
}

impl From<MissingArg> for MissingMetadataPolicy {
    fn from(value: MissingArg) -> Self {
        match value {
            MissingArg::Last => MissingMetadataPolicy::Last,
            MissingArg::Exclude => MissingMetadataPolicy::Exclude,
            MissingArg::Fail => MissingMetadataPolicy::Fail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_delim(value: &str) -> Result<String> {
    validate_separator(value)?;
    Ok(value.to_string())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if cli.save_defaults {
        return cmd_save_defaults(&cli, &config);
    }
    let Some(dir) = cli.dir.as_deref() else {
        bail!("a photo directory is required");
    };
    let options = build_options(&cli, dir, &config);

    match run(&options, &ExifExtractor)? {
        RunOutcome::Preview(plan) => print_plan(&plan, cli.output),
        RunOutcome::Applied(report) => finish(&report, options.mode),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Config values overridden by whatever was given on the command line.
fn merged_config(cli: &Cli, config: &AppConfig) -> AppConfig {
    let mut merged = config.clone();
    merged.descending_default |= cli.desc;
    if let Some(delim) = &cli.delim {
        merged.separator = delim.clone();
    }
    if let Some(missing) = cli.missing {
        merged.missing_metadata = missing.into();
    }
    if let Some(width) = cli.min_width {
        merged.min_width = usize::from(width);
    }
    merged
}

fn build_options(cli: &Cli, dir: &Path, config: &AppConfig) -> RunOptions {
    let mut options = RunOptions::from_config(dir.to_path_buf(), &merged_config(cli, config));
    options.mode = Mode::select(cli.revert, cli.test);
    options
}

fn cmd_save_defaults(cli: &Cli, config: &AppConfig) -> Result<()> {
    let merged = merged_config(cli, config);
    let path = match &cli.config {
        Some(path) => {
            save_config_to(&merged, path)?;
            path.clone()
        }
        None => save_config(&merged)?,
    };
    println!("config file: {}", path.display());
    println!("{}", toml::to_string_pretty(&merged)?);
    Ok(())
}

fn print_plan(plan: &OrderPlan, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        OutputFormat::Table => {
            write_order_table(&plan.rows, &mut io::stdout().lock())?;
        }
    }
    eprintln!("test mode: {} photo(s), no files were renamed", plan.rows.len());
    Ok(())
}

fn finish(report: &RunReport, mode: Mode) -> Result<()> {
    let verb = if mode == Mode::Revert {
        "Reverted"
    } else {
        "Renamed"
    };
    for op in &report.renamed {
        println!(
            "{verb}: {} -> {}",
            display_name(&op.from),
            display_name(&op.to)
        );
    }
    for failure in &report.failures {
        eprintln!("{failure}");
    }

    eprintln!(
        "done: renamed={} skipped={} failed={}",
        report.renamed.len(),
        report.skipped,
        report.failures.len()
    );

    if !report.is_success() {
        bail!("{} file(s) could not be renamed", report.failures.len());
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
