use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::DiscoveryConfig;
use crate::core::{DiscoveryError, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".discovery.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read a config file's contents
pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DiscoveryConfig> {
    let config = toml::from_str::<DiscoveryConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load a config file the user named explicitly. Any failure is an error.
pub fn load_config_from(path: &Path) -> Result<DiscoveryConfig> {
    let contents = read_config_file(path).map_err(|source| {
        DiscoveryError::configuration(format!("cannot read {}: {}", path.display(), source))
    })?;
    let config = parse_and_validate_config(&contents).map_err(|e| match e {
        DiscoveryError::Toml(source) => {
            DiscoveryError::configuration(format!("{}: {}", path.display(), source))
        }
        other => other,
    })?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a discovered config path; problems are logged and skipped
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DiscoveryConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("Ignoring {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.discovery.toml` above `start`, or defaults.
pub fn discover_config(start: PathBuf) -> DiscoveryConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DiscoveryConfig::default()
        })
}

/// Load configuration from the current directory hierarchy
pub fn load_config() -> DiscoveryConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            DiscoveryConfig::default()
        }
    }
}
