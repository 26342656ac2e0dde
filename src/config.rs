use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_VAR: &str = "CATTLESCOPE_CONFIG";
pub const MODEL_ENDPOINT_VAR: &str = "MODEL_ENDPOINT";
pub const BIND_VAR: &str = "CATTLESCOPE_BIND";
pub const LOG_VAR: &str = "CATTLESCOPE_LOG";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
  pub model_endpoint: Option<String>,
  pub bind_addr: String,
  pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      model_endpoint: None,
      bind_addr: "127.0.0.1:8080".to_string(),
      log_path: None,
    }
  }
}

impl AppConfig {
  pub fn load() -> anyhow::Result<AppConfig> {
    let config = match std::env::var_os(CONFIG_PATH_VAR) {
      Some(path) => load_file(Path::new(&path))?,
      None => AppConfig::default(),
    };
    Ok(config.with_overrides(|key| std::env::var(key).ok()))
  }

  pub fn with_overrides<F>(mut self, lookup: F) -> AppConfig
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(endpoint) = lookup(MODEL_ENDPOINT_VAR) {
      self.model_endpoint = Some(endpoint);
    }
    if let Some(bind) = lookup(BIND_VAR) {
      if !bind.trim().is_empty() {
        self.bind_addr = bind.trim().to_string();
      }
    }
    if let Some(log) = lookup(LOG_VAR) {
      if !log.trim().is_empty() {
        self.log_path = Some(PathBuf::from(log.trim()));
      }
    }
    self.model_endpoint = self
      .model_endpoint
      .map(|e| e.trim().to_string())
      .filter(|e| !e.is_empty());
    self
  }
}

pub fn load_file(path: &Path) -> anyhow::Result<AppConfig> {
  let data = std::fs::read_to_string(path)
    .with_context(|| format!("reading config {}", path.display()))?;
  let config: AppConfig = serde_json::from_str(&data)
    .with_context(|| format!("parsing config {}", path.display()))?;
  Ok(config)
}
