//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Phase durations for the protocol and report presets
//! - Initial values for custom runs
//! - Sound cue settings
//!
//! Configuration is stored at `~/.config/semaforo/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::data_dir;
use crate::cue::{CueTones, Tone};
use crate::error::{ConfigError, Result};
use crate::timer::{Modality, PhaseConfig};

/// Durations for the fixed modalities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetsConfig {
    #[serde(default = "PhaseConfig::standard")]
    pub protocolo: PhaseConfig,
    #[serde(default = "PhaseConfig::standard")]
    pub informe: PhaseConfig,
}

/// Sound cue configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "Tone::change")]
    pub change: Tone,
    #[serde(default = "Tone::finish")]
    pub finish: Tone,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/semaforo/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Modality used when none is given on the command line.
    #[serde(default = "default_modality")]
    pub default_modality: Modality,
    #[serde(default)]
    pub presets: PresetsConfig,
    /// Values a custom run starts from when nothing else is given.
    #[serde(default = "PhaseConfig::custom_defaults")]
    pub custom_defaults: PhaseConfig,
    #[serde(default)]
    pub sound: SoundConfig,
}

fn default_true() -> bool {
    true
}
fn default_modality() -> Modality {
    Modality::Protocolo
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            protocolo: PhaseConfig::standard(),
            informe: PhaseConfig::standard(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            change: Tone::change(),
            finish: Tone::finish(),
        }
    }
}

impl SoundConfig {
    pub fn tones(&self) -> CueTones {
        CueTones {
            change: self.change.clone(),
            finish: self.finish.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_modality: default_modality(),
            presets: PresetsConfig::default(),
            custom_defaults: PhaseConfig::custom_defaults(),
            sound: SoundConfig::default(),
        }
    }
}

/// JSON pointer for a dot-separated key such as `presets.informe.qa`.
fn key_pointer(key: &str) -> Option<String> {
    let valid = !key.is_empty()
        && key
            .split('.')
            .all(|part| !part.is_empty() && !part.contains(|c| c == '/' || c == '~'));
    valid.then(|| format!("/{}", key.replace('.', "/")))
}

/// Parse `raw` as the same kind of value that currently sits at `key`.
///
/// Durations and tone lengths are whole numbers, tone frequencies and gains
/// are floats, and a whole section (e.g. `presets.informe`) takes inline JSON.
fn parse_like(
    current: &serde_json::Value,
    key: &str,
    raw: &str,
) -> Result<serde_json::Value, ConfigError> {
    use serde_json::Value;

    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };
    match current {
        Value::Bool(_) => raw
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|e| invalid(e.to_string())),
        Value::Number(n) if n.is_u64() => raw
            .parse::<u64>()
            .map(Value::from)
            .map_err(|e| invalid(format!("expected a whole number: {e}"))),
        Value::Number(_) => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| invalid(format!("cannot parse '{raw}' as number"))),
        Value::String(_) => Ok(Value::String(raw.to_string())),
        Value::Object(_) | Value::Array(_) | Value::Null => {
            serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.pointer(&key_pointer(key)?)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        let slot = key_pointer(key)
            .and_then(|pointer| json.pointer_mut(&pointer))
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let parsed = parse_like(slot, key, value)?;
        *slot = parsed;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Durations configured for `modality`.
    pub fn phase_config(&self, modality: Modality) -> PhaseConfig {
        match modality {
            Modality::Protocolo => self.presets.protocolo,
            Modality::Informe => self.presets.informe,
            Modality::Custom => self.custom_defaults,
        }
    }
}
