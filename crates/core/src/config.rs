use crate::resolver::MissingMetadataPolicy;
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEPARATOR: &str = "__";
pub const DEFAULT_MIN_WIDTH: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub separator: String,
    pub min_width: usize,
    pub missing_metadata: MissingMetadataPolicy,
    pub descending_default: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            min_width: DEFAULT_MIN_WIDTH,
            missing_metadata: MissingMetadataPolicy::Last,
            descending_default: false,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        validate_separator(&self.separator)?;
        if self.min_width == 0 {
            bail!("min_width must be at least 1");
        }
        Ok(())
    }
}

/// A separator starting with a digit would make prefixed names ambiguous on revert.
pub fn validate_separator(separator: &str) -> Result<()> {
    if separator.is_empty() {
        bail!("separator must not be empty");
    }
    if separator.starts_with(|c: char| c.is_ascii_digit()) {
        bail!("separator must not start with a digit: {separator:?}");
    }
    if separator.contains(['/', '\\']) {
        bail!("separator must not contain path separators: {separator:?}");
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "photo-sorter", "photo-sorter")
        .context("could not resolve the OS config directory")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    load_config_from(&paths.config_path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read config file: {}", path.display()))?;

    let config = toml::from_str::<AppConfig>(&raw)
        .with_context(|| format!("could not parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<PathBuf> {
    let paths = app_paths()?;
    save_config_to(config, &paths.config_path)?;
    Ok(paths.config_path)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    config.validate()?;
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create config directory: {}", dir.display()))?;
    }
    let body = toml::to_string_pretty(config).context("could not serialize config")?;
    fs::write(path, body)
        .with_context(|| format!("could not write config file: {}", path.display()))?;
    Ok(())
}
