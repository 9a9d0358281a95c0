//! Configuration file loading

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// On-disk client configuration.
///
/// ```toml
/// [api]
/// base_url = "http://hive.example:8081/"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(e.to_string()))
    }
}
