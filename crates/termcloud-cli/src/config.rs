//! Configuration file loading for the CLI
//!
//! A cloud is usually rendered from a results file saved next to the
//! settings used for it, so besides the usual locations the directory of
//! the input file is searched. Command-line overrides are applied on top of
//! whatever was loaded.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info, trace};
use thiserror::Error;

use termcloud::{TermCloudError, config::AppConfig, strategy::Mode};

use crate::Args;

/// File name looked up beside the input file.
const SIBLING_CONFIG: &str = "termcloud.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration in {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

impl From<ConfigError> for TermCloudError {
    fn from(err: ConfigError) -> Self {
        TermCloudError::Config(err.to_string())
    }
}

/// Find and load configuration for rendering `input`.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. `termcloud.toml` in the directory of the input file
/// 3. Local project directory (termcloud/config.toml)
/// 4. Platform-specific config directory
/// 5. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - A config file exists but cannot be parsed
/// - A config file parses but its cloud or style settings are invalid
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
    input: impl AsRef<Path>,
) -> Result<AppConfig, TermCloudError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let mut candidates = Vec::new();
    if let Some(dir) = input.as_ref().parent() {
        candidates.push(("input directory", dir.join(SIBLING_CONFIG)));
    }
    candidates.push(("local", PathBuf::from("termcloud/config.toml")));
    match ProjectDirs::from("com", "termcloud", "termcloud") {
        Some(dirs) => candidates.push(("system", dirs.config_dir().join("config.toml"))),
        None => debug!("Could not determine platform-specific config directory"),
    }

    for (origin, path) in candidates {
        if path.is_file() {
            info!(origin, path = path.display().to_string(); "Loading configuration");
            return load_config_file(&path);
        }
        trace!(origin, path = path.display().to_string(); "No configuration file");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Parses a TOML file and checks the settings it holds.
fn load_config_file(path: &Path) -> Result<AppConfig, TermCloudError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };
    config.cloud().validate().map_err(invalid)?;
    config.strategy_options().map_err(invalid)?;
    config.style().background_color().map_err(invalid)?;

    Ok(config)
}

/// Applies command-line overrides to a loaded configuration.
pub fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    let mut cloud = std::mem::take(config.cloud_mut());

    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or(cloud.width());
        let height = args.height.unwrap_or(cloud.height());
        cloud = cloud.with_size(width, height);
    }
    if let Some(max_n) = args.max_n {
        cloud = cloud.with_max_n(max_n);
    }
    if args.terms {
        cloud = cloud.with_mode(Mode::Term);
    }
    if args.warnings {
        cloud = cloud.with_warnings(true);
    }

    debug!(mode:% = cloud.mode(), width = cloud.width(), height = cloud.height(); "Effective cloud configuration");
    *config.cloud_mut() = cloud;
    config
}
