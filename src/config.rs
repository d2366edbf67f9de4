use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const BACKEND_URL_ENV: &str = "ETL_LAUNCHER_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the ETL backend, without a trailing slash.
    pub backend_url: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3001".to_string(),
            window_width: 720.0,
            window_height: 640.0,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".etl-launcher"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Defaults, then `~/.etl-launcher/config.json`, then the environment.
    pub fn load() -> Config {
        let mut config = Self::config_path()
            .and_then(|path| Self::from_file(&path))
            .unwrap_or_default();
        config.apply_env(env::var(BACKEND_URL_ENV).ok());
        config
    }

    fn from_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    fn apply_env(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self.backend_url = self.backend_url.trim_end_matches('/').to_string();
    }
}
