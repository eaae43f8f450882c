//! Application configuration from environment variables.

use catalog_observability::LogFormat;
use catalog_storage::StorageConfig;
use catalog_toast::ToastConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:3002/bp";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub log_format: LogFormat,
    pub storage: StorageConfig,
    pub toasts: ToastConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            log_format: LogFormat::default(),
            storage: StorageConfig::default(),
            toasts: ToastConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = AppConfig::default();

        if let Some(url) = get("CATALOG_API_URL") {
            cfg.api_url = url;
        }
        cfg.api_token = get("CATALOG_API_TOKEN");
        if let Some(format) = get("CATALOG_LOG_FORMAT") {
            cfg.log_format = LogFormat::parse(&format);
        }

        let storage = &mut cfg.storage;
        if let Some(bucket) = get("CATALOG_S3_BUCKET") {
            storage.bucket = bucket;
        }
        if let Some(region) = get("CATALOG_S3_REGION") {
            storage.region = region;
        }
        if let Some(prefix) = lookup("CATALOG_S3_PREFIX") {
            storage.prefix = prefix.trim().to_string();
        }
        if let Some(raw) = get("CATALOG_S3_MAX_SIZE_MB") {
            storage.max_size_mb = number("CATALOG_S3_MAX_SIZE_MB", raw)?;
        }
        if let Some(types) = get("CATALOG_S3_ALLOWED_TYPES") {
            storage.allowed_types = types
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(base) = get("CATALOG_S3_PUBLIC_BASE_URL") {
            storage.public_base_url = base;
        }
        if let Some(endpoint) = get("CATALOG_S3_UPLOAD_ENDPOINT") {
            storage.upload_endpoint = endpoint;
        }

        if let Some(raw) = get("CATALOG_TOAST_MAX") {
            cfg.toasts.max_toasts = number("CATALOG_TOAST_MAX", raw)?;
        }
        if let Some(raw) = get("CATALOG_TOAST_DEFAULT_MS") {
            cfg.toasts.default_ms = number("CATALOG_TOAST_DEFAULT_MS", raw)?;
        }

        Ok(cfg)
    }
}

fn number<N: std::str::FromStr>(key: &'static str, value: String) -> Result<N, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value })
}
