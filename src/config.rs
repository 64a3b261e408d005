// src/config.rs
//! Client configuration for the external analysis service, loaded from
//! `config/analysis.toml` with env overrides. A missing file is not an
//! error; every field has a default.

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_ANALYSIS_CONFIG_PATH: &str = "config/analysis.toml";

pub const ENV_ANALYSIS_CONFIG_PATH: &str = "ANALYSIS_CONFIG_PATH";
pub const ENV_ANALYSIS_API_BASE_URL: &str = "ANALYSIS_API_BASE_URL";

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}
fn default_connect_timeout_secs() -> u64 {
    5
}
fn default_request_timeout_secs() -> u64 {
    // Scrape + three council stages; the service answers in minutes, not ms.
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the analysis service (no trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Base URL of the embedded-charts provider, if charts are wired up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            chart_base_url: None,
        }
    }
}

impl ApiConfig {
    /// Load from the default path (or `ANALYSIS_CONFIG_PATH`), then apply
    /// env overrides. Missing file → defaults.
    pub fn load() -> Self {
        let path = env::var(ENV_ANALYSIS_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_ANALYSIS_CONFIG_PATH.to_string());
        let mut cfg = Self::load_from_file(&path).unwrap_or_default();

        if let Ok(url) = env::var(ENV_ANALYSIS_API_BASE_URL) {
            if !url.trim().is_empty() {
                cfg.base_url = url;
            }
        }

        cfg.sanitize();
        cfg
    }

    /// Load and parse a TOML config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: ApiConfig = toml::from_str(&data)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Keep the config usable: trim trailing slashes, replace zero
    /// timeouts with defaults.
    fn sanitize(&mut self) {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        if self.connect_timeout_secs == 0 {
            self.connect_timeout_secs = default_connect_timeout_secs();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout_secs();
        }
        if let Some(chart) = &mut self.chart_base_url {
            while chart.ends_with('/') {
                chart.pop();
            }
        }
    }
}
