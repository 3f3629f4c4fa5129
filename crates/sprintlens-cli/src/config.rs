//! Optional `sprintlens.toml` configuration.
//!
//! Deployment-specific knobs the flags shouldn't have to repeat: the
//! story-point field candidates and the chart row cap. Flags and
//! environment variables override anything set here.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sprintlens_core::FieldPolicy;
use sprintlens_progress::ChartProjector;
use tracing::debug;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "sprintlens.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Story-point field identifiers, tried in order
    pub story_point_fields: Vec<String>,
    /// Maximum rows per chart table
    pub max_chart_rows: Option<usize>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist; the implicit `sprintlens.toml` in the
    /// working directory is optional and silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let implicit = Path::new(CONFIG_FILE);
                if !implicit.exists() {
                    return Ok(Self::default());
                }
                implicit.to_path_buf()
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("malformed config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Field policy, with `override_fields` (flags/env) taking precedence
    pub fn field_policy(&self, override_fields: &[String]) -> FieldPolicy {
        if !override_fields.is_empty() {
            FieldPolicy::new(override_fields.iter().cloned())
        } else if !self.story_point_fields.is_empty() {
            FieldPolicy::new(self.story_point_fields.iter().cloned())
        } else {
            FieldPolicy::default()
        }
    }

    /// Chart projector honoring the configured row cap
    pub fn projector(&self) -> ChartProjector {
        match self.max_chart_rows {
            Some(max_rows) => ChartProjector::new().max_rows(max_rows),
            None => ChartProjector::new(),
        }
    }
}
