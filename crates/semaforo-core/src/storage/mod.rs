mod config;

pub use config::{Config, PresetsConfig, SoundConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the directory holding `config.toml`.
///
/// `SEMAFORO_CONFIG_DIR` wins when set. Otherwise this is
/// `~/.config/semaforo[-dev]/`, with `SEMAFORO_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if no home directory can be found or if creating the
/// directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("SEMAFORO_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
            let env = std::env::var("SEMAFORO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("semaforo-dev")
            } else {
                base_dir.join("semaforo")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
