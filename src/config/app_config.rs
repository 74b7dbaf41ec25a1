use core::fmt;
use std::{env, time::Duration};

use chrono::TimeDelta;
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub static CONFIG: Lazy<AppConfig> =
    Lazy::new(|| AppConfig::load().unwrap_or_else(|e| panic!("{}", e)));

#[derive(Serialize, Deserialize, Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Runtime::Dev => write!(f, "development"),
            Runtime::Prod => write!(f, "production"),
        }
    }
}

impl From<String> for Runtime {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DEVELOPMENT" => Runtime::Dev,
            "PRODUCTION" => Runtime::Prod,
            _ => Runtime::Prod,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub content: ContentConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_address() -> String {
    "127.0.0.1".into()
}

fn default_port() -> String {
    "3000".into()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_retention_days() -> i64 {
    7
}

fn default_cleanup_interval() -> u64 {
    3600
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentConfig {
    pub api_domain: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

const MAX_RETENTION_DAYS: i64 = 3650;

impl SessionConfig {
    pub fn retention(&self) -> Result<TimeDelta, ConfigError> {
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(ConfigError::Message(format!(
                "session.retention_days must be between 1 and {}, got {}",
                MAX_RETENTION_DAYS, self.retention_days
            )));
        }

        Ok(TimeDelta::days(self.retention_days))
    }

    pub fn cleanup_interval(&self) -> Result<Duration, ConfigError> {
        if self.cleanup_interval_secs == 0 {
            return Err(ConfigError::Message(
                "session.cleanup_interval_secs must be at least 1".into(),
            ));
        }

        Ok(Duration::from_secs(self.cleanup_interval_secs))
    }
}

impl AppConfig {
    fn load() -> Result<Self, ConfigError> {
        let runtime: Runtime = env::var("ENVIRONMENT").unwrap_or_default().into();

        let config: AppConfig = Config::builder()
            .add_source(File::with_name(&format!("src/config/{}.toml", runtime)))
            .add_source(Environment::with_prefix("GUESSING").separator("__"))
            .build()?
            .try_deserialize()?;

        config.session.retention()?;
        config.session.cleanup_interval()?;
        debug!("Loaded {} config: {:?}", runtime, config);

        Ok(config)
    }
}
