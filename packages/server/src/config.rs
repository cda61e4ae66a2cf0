use common::StorageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Answer name searches from the in-process product index instead of SQL.
    #[serde(default = "default_search_enabled")]
    pub enabled: bool,
}

fn default_search_enabled() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_search_enabled(),
        }
    }
}

/// Point amounts credited by the signup flow.
#[derive(Debug, Deserialize, Clone)]
pub struct PointConfig {
    #[serde(default = "default_reward")]
    pub signup_reward: i32,
    #[serde(default = "default_reward")]
    pub referral_reward: i32,
}

fn default_reward() -> i32 {
    5000
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            signup_reward: default_reward(),
            referral_reward: default_reward(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GgPassConfig {
    /// Days a pass renewal stays valid.
    #[serde(default = "default_validity_days")]
    pub validity_days: i64,
}

fn default_validity_days() -> i64 {
    30
}

/// Longest pass window accepted from configuration.
pub const MAX_VALIDITY_DAYS: i64 = 36_500;

impl Default for GgPassConfig {
    fn default() -> Self {
        Self {
            validity_days: default_validity_days(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub point: PointConfig,
    #[serde(default)]
    pub ggpass: GgPassConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://shop.db?mode=rwc")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SHOP__DATABASE__URL)
            .add_source(Environment::with_prefix("SHOP").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let days = self.ggpass.validity_days;
        if !(1..=MAX_VALIDITY_DAYS).contains(&days) {
            return Err(ConfigError::Message(format!(
                "ggpass.validity_days must be between 1 and {MAX_VALIDITY_DAYS}, got {days}"
            )));
        }
        Ok(())
    }
}
