use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: Option<ServerConfig>,
    pub cors: Option<CorsConfig>,
    pub storage: Option<StorageConfig>,
    pub admin: Option<AdminConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig::default()),
            cors: None,
            storage: Some(StorageConfig::default()),
            admin: None,
        }
    }
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
            port: 3001,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
    Remote,
    Local,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    /// SQLite database file; defaults to the platform data directory.
    pub db_path: Option<PathBuf>,
    /// JSON array file used by the `local` backend.
    pub data_path: Option<PathBuf>,
    /// Endpoint holding the whole record array for the `remote` backend.
    pub remote_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            db_path: None,
            data_path: None,
            remote_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    pub password: String,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_session_ttl_secs() -> u64 {
    3600
}

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            let default_config = r#"
[server]
host = "127.0.0.1"
port = 3001

# Absent [cors] section allows any origin.
# [cors]
# allowed_origins = ["http://localhost:5173"]

[storage]
# One of: "sqlite", "memory", "remote", "local"
backend = "sqlite"
# db_path = "/var/lib/qrhire/applicants.db"
# remote_url = "https://example.com/bins/qrhire"
request_timeout_secs = 10

# Uncomment to require an admin session token on the delete endpoints.
# [admin]
# password = "change-me"
# session_ttl_secs = 3600
"#;
            std::fs::write(&config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("qrhire").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
