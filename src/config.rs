//! Configuration loading for the visualizer.
//!
//! Settings come from an optional TOML file. Every key has a default, so a
//! missing file or a partial file is fine; a file that cannot be read,
//! parsed or validated is reported and replaced by the defaults.

use anyhow::{Context, bail};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::engine::EngineSettings;
use crate::engine::event_log::{MAX_CAPACITY, MIN_CAPACITY};
use crate::engine::simulation::SimulationParams;
use crate::engine::topology::GeneratorParams;
use crate::engine::types::LayoutMode;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "gnn-commuter-viz.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Layout shown after start-up.
    pub initial_layout: LayoutMode,
    /// Entries kept in the on-screen kernel log (5..=8).
    pub log_capacity: usize,
    /// Length of one simulation tick in milliseconds.
    pub frame_interval_ms: u64,
    pub simulation: SimulationParams,
    pub topology: GeneratorParams,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            initial_layout: LayoutMode::Gnn,
            log_capacity: MAX_CAPACITY,
            frame_interval_ms: 16,
            simulation: SimulationParams::default(),
            topology: GeneratorParams::default(),
        }
    }
}

impl VisualizerConfig {
    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path).with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", config_path.display()))
    }

    /// Load `config_path` if it exists, otherwise use defaults.
    ///
    /// Errors are logged and never fatal.
    pub fn load_or_default(config_path: &Path) -> Self {
        if !config_path.exists() {
            log::debug!("No config file at {}, using defaults", config_path.display());
            return Self::default();
        }
        match Self::load(config_path) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Check value ranges across all sections.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.log_capacity) {
            bail!("log-capacity must lie in {}..={}, got {}", MIN_CAPACITY, MAX_CAPACITY, self.log_capacity);
        }
        if self.frame_interval_ms == 0 {
            bail!("frame-interval-ms must be positive");
        }
        self.simulation.validate().map_err(anyhow::Error::msg).context("[simulation]")?;
        self.topology.validate().map_err(anyhow::Error::msg).context("[topology]")?;
        Ok(())
    }

    /// Settings handed to the engine at mount time.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            initial_layout: self.initial_layout,
            log_capacity: self.log_capacity,
            frame_interval: Duration::from_millis(self.frame_interval_ms),
            simulation: self.simulation.clone(),
            topology: self.topology.clone(),
        }
    }
}
