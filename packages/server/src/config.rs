use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

impl CorsConfig {
    /// Build the CORS middleware. An empty origin list accepts any origin.
    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .max_age(Duration::from_secs(self.max_age));

        if self.allow_origins.is_empty() {
            layer.allow_origin(Any)
        } else {
            let origins: Vec<HeaderValue> = self
                .allow_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
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
    /// Connection pool ceiling.
    pub max_connections: u32,
    /// Connections kept open when idle.
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding full-resolution avatar files.
    pub avatars_dir: PathBuf,
    /// Upload ceiling in bytes. Checked before any side effect.
    pub max_upload_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("storage.avatars_dir", "./avatars")?
            .set_default("storage.max_upload_size", 300 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SCHOOL__DATABASE__URL)
            .add_source(Environment::with_prefix("SCHOOL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
