//! Layered runtime settings: defaults, then `abr.toml`, then `ABR_*`
//! environment variables. Command-line flags are applied on top by `main`.

use std::{path::Path, time::Duration};

use abr_client::{ClientConfig, DEFAULT_BASE_URL};
use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use config::{ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Authentication GUID issued by the ABR.
  pub guid:         String,
  pub base_url:     String,
  pub timeout_secs: u64,
  /// Bind address for `abr serve`.
  pub host:         String,
  pub port:         u16,
  /// Evaluate current values on this date instead of today.
  pub as_of:        Option<NaiveDate>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      guid:         String::new(),
      base_url:     DEFAULT_BASE_URL.to_string(),
      timeout_secs: 30,
      host:         "127.0.0.1".to_string(),
      port:         8080,
      as_of:        None,
    }
  }
}

impl Settings {
  /// Read `path` (optional) and the `ABR_` environment.
  pub fn load(path: &Path) -> Result<Self> {
    Self::build(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("ABR")),
    )
  }

  fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
    builder
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      base_url: self.base_url.clone(),
      guid:     self.guid.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
