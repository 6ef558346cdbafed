//! Demo configuration, loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fb_core::SchedulerConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames to run before exiting.
    pub frames: u64,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Where to write the per-update CSV trace.  `None` disables tracing output.
    pub trace_csv: Option<PathBuf>,

    pub scheduler: SchedulerConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames:     32,
            log_filter: "orbit=info".into(),
            trace_csv:  None,
            scheduler:  SchedulerConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: DemoConfig = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.scheduler.validate()?;
        Ok(config)
    }
}
