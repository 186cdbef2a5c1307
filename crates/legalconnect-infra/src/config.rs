//! Configuration loading and data directory layout.
//!
//! `config.toml` lives in the data directory (`~/.legalconnect` unless
//! `LEGALCONNECT_DATA_DIR` is set). A missing or malformed file yields
//! [`AppConfig::default()`].

use std::path::{Path, PathBuf};

use legalconnect_types::config::AppConfig;

pub const DATA_DIR_ENV: &str = "LEGALCONNECT_DATA_DIR";

/// Load `{data_dir}/config.toml`, falling back to defaults.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", config_path.display());
            AppConfig::default()
        }
    }
}

/// `LEGALCONNECT_DATA_DIR`, else `~/.legalconnect`, else `./.legalconnect`.
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV).ok())
}

fn data_dir_from(env_value: Option<String>) -> PathBuf {
    if let Some(dir) = env_value.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".legalconnect");
    }
    PathBuf::from(".legalconnect")
}

/// Create the data directory if needed.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir).await.map_err(|e| {
        anyhow::anyhow!("failed to create data directory {}: {e}", data_dir.display())
    })
}

/// Upload directory; relative paths resolve against the data directory.
pub fn upload_dir(config: &AppConfig, data_dir: &Path) -> PathBuf {
    let dir = Path::new(&config.uploads.dir);
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        data_dir.join(dir)
    }
}
