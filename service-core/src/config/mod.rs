use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service: where to listen.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Tried once when `port` is already taken. `0` disables the retry.
    #[serde(default = "default_fallback_port")]
    pub fallback_port: u16,
}

fn default_port() -> u16 {
    3000
}

fn default_fallback_port() -> u16 {
    3001
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// The fallback port, if one is configured and differs from the primary.
    pub fn fallback_port(&self) -> Option<u16> {
        match self.fallback_port {
            0 => None,
            p if p == self.port => None,
            p => Some(p),
        }
    }
}
