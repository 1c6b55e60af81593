use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite file; the platform data dir is used when unset
    pub path: Option<PathBuf>,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// `false` serves every read from the sample dataset
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            pool_size: default_pool_size(),
            enabled: true,
        }
    }
}

/// Hosted auth service. Without `url` and `anon_key` accounts live in
/// process memory and are lost on restart.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuthConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    /// In-memory accounts only; a hosted service applies its own setting.
    /// Nothing can confirm an in-memory account, so leave this off outside tests.
    #[serde(default)]
    pub require_email_confirmation: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PageConfig {
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            excerpt_length: default_excerpt_length(),
        }
    }
}

fn default_pool_size() -> u32 {
    8
}

fn default_true() -> bool {
    true
}

fn default_excerpt_length() -> usize {
    page_composer::DEFAULT_EXCERPT_LENGTH
}

impl ApiConfig {
    /// Reads the config file, creating it with defaults first if needed.
    /// `CAREERS__SECTION__KEY` environment variables override file values.
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            let default_config = toml::to_string_pretty(&ApiConfig::with_local_cors())
                .map_err(|e| ConfigError::Message(format!("Failed to encode default config: {e}")))?;
            std::fs::write(&config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let config = Self::from_file(&config_path)?;
        Ok((config, config_path))
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .add_source(Environment::with_prefix("CAREERS").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn with_local_cors() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            ..Self::default()
        }
    }

    pub fn hosted_auth(&self) -> Option<(&str, &str)> {
        match (self.auth.url.as_deref(), self.auth.anon_key.as_deref()) {
            (Some(url), Some(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
                Some((url, key))
            }
            _ => None,
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("careers-builder").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
