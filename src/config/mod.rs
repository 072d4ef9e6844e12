use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the YAML configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "stage")]
    Staging,
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    fn from_name(name: &str) -> Self {
        match name {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub environment: Environment,
    pub port: u16,
}

/// Which persistence gateway backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub storage: Storage,
    /// Full connection URL; takes precedence over the discrete fields below.
    #[serde(default)]
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub dbname: String,
    #[serde(default = "default_sslmode")]
    pub sslmode: String,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

fn default_sslmode() -> String {
    "disable".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub max_request_size_bytes: usize,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    /// When set, log events are also written to this file.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Write the file as JSON lines rather than plain text.
    #[serde(default = "default_json_file")]
    pub json_file: bool,
}

fn default_json_file() -> bool {
    true
}

/// Partial form of [`AppConfig`] as read from YAML: every section may be
/// omitted and falls back to the preset for the configured environment.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    service: Option<ServiceConfig>,
    database: Option<DatabaseConfig>,
    api: Option<ApiConfig>,
    log: Option<LogConfig>,
}

impl AppConfig {
    /// Load configuration: YAML file (if any), then environment overrides.
    ///
    /// An explicitly requested file must exist. The default path is optional;
    /// when it is absent the `APP_ENV` preset is used as-is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let base = if required || path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml { path, source })?
        } else {
            Self::for_environment(Self::env_environment().unwrap_or(Environment::Development))
        };

        Ok(base.with_env_overrides())
    }

    /// Parse a YAML document, filling omitted sections from the environment preset.
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        let file: FileConfig = if raw.trim().is_empty() {
            FileConfig::default()
        } else {
            serde_yaml::from_str(raw)?
        };

        let environment = file
            .service
            .as_ref()
            .map(|s| s.environment)
            .or_else(Self::env_environment)
            .unwrap_or(Environment::Development);
        let preset = Self::for_environment(environment);

        Ok(Self {
            service: file.service.unwrap_or(preset.service),
            database: file.database.unwrap_or(preset.database),
            api: file.api.unwrap_or(preset.api),
            log: file.log.unwrap_or(preset.log),
        })
    }

    fn env_environment() -> Option<Environment> {
        env::var("APP_ENV").ok().map(|v| Environment::from_name(&v))
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("APP_ENV") {
            self.service.environment = Environment::from_name(&v);
        }
        if let Some(v) = env::var("TODO_API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.service.port = v.parse().unwrap_or(self.service.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_STORAGE") {
            match v.to_ascii_lowercase().as_str() {
                "memory" => self.database.storage = Storage::Memory,
                "postgres" => self.database.storage = Storage::Postgres,
                _ => tracing::warn!("ignoring unknown DATABASE_STORAGE value {:?}", v),
            }
        }
        if let Ok(v) = env::var("DATABASE_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DATABASE_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DATABASE_USERNAME") {
            self.database.username = v;
        }
        if let Ok(v) = env::var("DATABASE_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DATABASE_NAME") {
            self.database.dbname = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        // API overrides
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }
        if let Ok(v) = env::var("API_DEFAULT_PAGE_SIZE") {
            self.api.default_page_size = v.parse().unwrap_or(self.api.default_page_size);
        }
        if let Ok(v) = env::var("API_MAX_PAGE_SIZE") {
            self.api.max_page_size = v.parse().unwrap_or(self.api.max_page_size);
        }

        // Log overrides
        if let Ok(v) = env::var("LOG_LEVEL") {
            self.log.level = v;
        }
        if let Ok(v) = env::var("LOG_FILE") {
            self.log.file = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("LOG_JSON_FILE") {
            self.log.json_file = v.parse().unwrap_or(self.log.json_file);
        }

        self
    }

    fn development() -> Self {
        Self {
            service: ServiceConfig {
                environment: Environment::Development,
                port: 8080,
            },
            database: DatabaseConfig {
                storage: Storage::Postgres,
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                username: "postgres".to_string(),
                password: String::new(),
                dbname: "todo".to_string(),
                sslmode: default_sslmode(),
                max_connections: 10,
                connection_timeout_secs: 30,
            },
            api: ApiConfig {
                max_request_size_bytes: 1024 * 1024, // 1MB
                default_page_size: 100,
                max_page_size: 1000,
            },
            log: LogConfig {
                level: "debug".to_string(),
                file: None,
                json_file: default_json_file(),
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.service.environment = Environment::Staging;
        config.database.host = "db".to_string();
        config.database.max_connections = 20;
        config.database.connection_timeout_secs = 10;
        config.api.max_page_size = 500;
        config.log.level = "info".to_string();
        config.log.file = Some(PathBuf::from("todo.log"));
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.service.environment = Environment::Production;
        config.database.host = "db".to_string();
        config.database.sslmode = "require".to_string();
        config.database.max_connections = 50;
        config.database.connection_timeout_secs = 5;
        config.api.max_page_size = 100;
        config.log.level = "info".to_string();
        config.log.file = Some(PathBuf::from("todo.log"));
        config
    }
}

impl DatabaseConfig {
    /// Host to connect to. Development always targets the local machine.
    pub fn effective_host(&self, environment: Environment) -> &str {
        match environment {
            Environment::Development => "localhost",
            _ => &self.host,
        }
    }
}
