use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreConfig,
    pub fallback: FallbackConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    /// Serve the fixed sample catalogue from read endpoints when the store fails.
    pub sample_products: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl ProductConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ProductConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("products"), is_prod)?,
            },
            store: StoreConfig {
                backend: get_env("STORE_BACKEND", Some("mongodb"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            },
            fallback: FallbackConfig {
                sample_products: parse_bool(
                    "SAMPLE_FALLBACK_ENABLED",
                    &get_env("SAMPLE_FALLBACK_ENABLED", Some("true"), is_prod)?,
                )?,
            },
            observability: ObservabilityConfig {
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got '{}'",
            key,
            other
        ))),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
