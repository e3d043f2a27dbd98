use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{CONFIG_FILE_NAME, SAMPLE_CONFIG};

/// Write the sample configuration into the current directory.
pub fn init_config(force: bool) -> Result<()> {
    write_sample_config(Path::new("."), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

/// Write the sample configuration into `dir`.
pub fn write_sample_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;
    use tempfile::TempDir;

    #[test]
    fn test_writes_valid_sample() {
        let dir = TempDir::new().unwrap();
        write_sample_config(dir.path(), false).unwrap();
        let contents = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(parse_and_validate_config(&contents).is_ok());
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "# mine").unwrap();

        let err = write_sample_config(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "# mine"
        );

        write_sample_config(dir.path(), true).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            SAMPLE_CONFIG
        );
    }
}
