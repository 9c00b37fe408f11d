//! Client configuration with build-time defaults and runtime overrides. The
//! CLI feeds overrides from flags and `SCIREG_*` environment variables so the
//! same binary can target different deployments without rebuilding.
//! Configuration values are public; do not store secrets here.

use crate::errors::AppError;
use std::path::PathBuf;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const STORE_DIR: &str = ".scireg";
const STORE_FILE: &str = "credentials.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub store_path: PathBuf,
}

impl ClientConfig {
    /// Loads defaults from build-time environment variables.
    #[must_use]
    pub fn load() -> Self {
        let api_base_url = option_env!("SCIREG_API_BASE_URL")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_base_url,
            store_path: default_store_path(),
        }
    }

    /// Applies non-empty runtime overrides on top of the loaded defaults.
    #[must_use]
    pub fn with_overrides(mut self, overrides: RuntimeConfig) -> Self {
        apply_runtime_overrides(&mut self, overrides);
        self
    }

    /// Checks that the API base URL is an absolute http(s) URL.
    /// # Errors
    /// Returns `AppError::Config` if the URL cannot be parsed or uses another scheme.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.api_base_url).map_err(|err| {
            AppError::Config(format!("invalid API base URL {}: {err}", self.api_base_url))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::Config(format!(
                "unsupported API base URL scheme: {scheme}"
            ))),
        }
    }
}

/// Optional values collected at runtime; empty strings are ignored.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub store_path: Option<String>,
}

impl RuntimeConfig {
    #[must_use]
    pub fn new(api_base_url: Option<&str>, store_path: Option<&str>) -> Self {
        Self {
            api_base_url: api_base_url.and_then(normalize_runtime_value),
            store_path: store_path.and_then(normalize_runtime_value),
        }
    }
}

fn apply_runtime_overrides(config: &mut ClientConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.store_path {
        config.store_path = PathBuf::from(value);
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn default_store_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(STORE_DIR)
        .join(STORE_FILE)
}
