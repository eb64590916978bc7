use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use scholarfolio_interact::Settings;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    /// Handed to the browser build through the settings script tag.
    #[serde(default)]
    pub interact: Settings,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_institution")]
    pub institution: String,
    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            title: default_title(),
            institution: default_institution(),
            email: default_email(),
        }
    }
}

fn default_owner() -> String {
    "Dr. Jordan Avery".to_string()
}

fn default_title() -> String {
    "Associate Professor of Educational Technology".to_string()
}

fn default_institution() -> String {
    "Northfield University".to_string()
}

fn default_email() -> String {
    Settings::default().fallback_email
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SCHOLARFOLIO__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SCHOLARFOLIO")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Config = builder.build()?.try_deserialize()?;

        // the failure notification points at the site's own address unless told otherwise
        if config.interact.fallback_email == Settings::default().fallback_email {
            config.interact.fallback_email = config.site.email.clone();
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !self.interact.endpoint.starts_with('/') {
            return Err("Contact endpoint must be a path starting with '/'".to_string());
        }
        if !self.interact.fallback_email.contains('@') {
            return Err("Fallback email must be an email address".to_string());
        }
        if self.interact.notification_timeout_ms == 0 {
            return Err("Notification timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
