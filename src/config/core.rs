use serde::{Deserialize, Serialize};

use crate::core::{DiscoveryError, Result};
use crate::filters::ParticipantBuckets;
use crate::formatting::ColorMode;

/// Root configuration structure, read from `.discovery.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DiscoveryConfig {
    /// Participant bucket boundaries
    #[serde(default)]
    pub participants: ParticipantBuckets,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl DiscoveryConfig {
    /// Reject configurations the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        self.participants.validate()?;
        if let Some(output) = &self.output {
            output.validate()?;
        }
        Ok(())
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format)
            .unwrap_or_default()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.output
            .as_ref()
            .and_then(|o| o.color.as_deref())
            .and_then(ColorMode::parse)
            .unwrap_or(ColorMode::Auto)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,

    /// `auto`, `always` or `never`
    #[serde(default)]
    pub color: Option<String>,
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        match self.color.as_deref() {
            Some(color) if ColorMode::parse(color).is_none() => Err(DiscoveryError::configuration(
                format!("output.color must be auto, always or never (got '{}')", color),
            )),
            _ => Ok(()),
        }
    }
}
