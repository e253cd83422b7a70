//! Engine configuration.
//!
//! Settings live in a TOML file with two tables: `[run]` controls the tick
//! driver and loop semantics, `[sensors]` feeds the scripted host. Every key is
//! optional; missing keys take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::host::SensorReadings;
use crate::interpreter::LoopPolicy;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "robo.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub run: RunConfig,
    pub sensors: SensorReadings,
}

/// Driver settings from the `[run]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of times the program is invoked from the root
    pub ticks: u64,
    pub loop_policy: LoopPolicyName,
    /// Pass limit for `loop` under the repeat policy (absent = unbounded)
    pub loop_limit: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 1,
            loop_policy: LoopPolicyName::SinglePass,
            loop_limit: None,
        }
    }
}

impl RunConfig {
    pub fn loop_policy(&self) -> LoopPolicy {
        match self.loop_policy {
            LoopPolicyName::SinglePass => LoopPolicy::SinglePass,
            LoopPolicyName::Repeat => LoopPolicy::Repeat { limit: self.loop_limit },
        }
    }
}

/// Spelling of a [`LoopPolicy`] in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopPolicyName {
    #[default]
    SinglePass,
    Repeat,
}

/// Load the engine configuration, falling back to defaults on any failure.
pub fn load_config(toml_path: &Path) -> EngineConfig {
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("engine configuration loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load engine configuration from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            EngineConfig::default()
        },
    }
}

/// Read and parse an engine configuration file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn try_load_config(toml_path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine configuration from '{}'", toml_path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing engine configuration from '{}'", toml_path.display()))
}

/// Pick the configuration file to use: an explicit path wins, then
/// [`DEFAULT_CONFIG_FILE`] in `dir` if it exists.
pub fn resolve_config_path(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Resolve and load the configuration, or use defaults when no file applies.
pub fn config_for(explicit: Option<&Path>, dir: &Path) -> EngineConfig {
    match resolve_config_path(explicit, dir) {
        Some(path) => load_config(&path),
        None => {
            info!("no engine configuration file; using defaults");
            EngineConfig::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn full_file_parses() {
        let config: EngineConfig = toml::from_str(
            r#"
            [run]
            ticks = 5
            loop_policy = "repeat"
            loop_limit = 3

            [sensors]
            fuel = 40
            wall_distance = 2
            barrels_lr = [1, -2]
            refuel = true
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.run.ticks, 5);
        assert_eq!(config.run.loop_policy(), LoopPolicy::Repeat { limit: Some(3) });
        assert_eq!(config.sensors.fuel, 40);
        assert_eq!(config.sensors.barrels_lr, vec![1, -2]);
        assert!(config.sensors.refuel);
        assert_eq!(config.sensors.fuel_per_move, 0);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config: EngineConfig = toml::from_str("[sensors]\nopponent_lr = -1\n").expect("valid toml");
        assert_eq!(config.run, RunConfig::default());
        assert_eq!(config.run.loop_policy(), LoopPolicy::SinglePass);
        assert_eq!(config.sensors.opponent_lr, -1);
        assert_eq!(config.sensors.fuel, SensorReadings::default().fuel);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(toml::from_str::<EngineConfig>("[run]\nloop_policy = \"forever\"\n").is_err());
    }

    #[test]
    fn load_config_falls_back_on_bad_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[run]\nticks = \"many\"").expect("write");
        assert!(try_load_config(file.path()).is_err());
        assert_eq!(load_config(file.path()), EngineConfig::default());
    }

    #[test]
    fn resolution_prefers_explicit_then_working_dir_file() {
        let dir = tempdir().expect("temp dir");
        assert_eq!(resolve_config_path(None, dir.path()), None);

        let local = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&local, "[run]\nticks = 9\n").expect("write");
        assert_eq!(resolve_config_path(None, dir.path()), Some(local.clone()));
        assert_eq!(config_for(None, dir.path()).run.ticks, 9);

        let explicit = dir.path().join("other.toml");
        assert_eq!(resolve_config_path(Some(&explicit), dir.path()), Some(explicit));
    }
}
