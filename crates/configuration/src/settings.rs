use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP server listens and how much it accepts per request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Upper bound on request body size, in bytes.
    pub body_limit_bytes: usize,
}

/// Which store backs the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL through a connection pool.
    #[default]
    Postgres,
    /// Process-local tables; contents are lost on exit.
    Memory,
}

/// Connection parameters for the question store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: StoreBackend,
    /// PostgreSQL connection string. Falls back to `DATABASE_URL`.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub filter: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// This allows a user to omit any section (or the whole file)
// and still have it work with sensible defaults.

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info,trivia=debug,web_server=debug,database=debug".to_string(),
            directory: None,
            file_prefix: "trivia.log".to_string(),
        }
    }
}

impl Settings {
    /// Checks values that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    /// Resolves `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::ValidationError(format!(
                    "invalid server address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_config;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.database.backend, StoreBackend::Postgres);
        assert_eq!(
            settings.server.socket_addr().unwrap().to_string(),
            "0.0.0.0:5000"
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.database.max_connections, 10);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[database]
backend = "memory"
max_connections = 3

[logging]
filter = "warn"
"#
        )
        .unwrap();

        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.backend, StoreBackend::Memory);
        assert_eq!(settings.database.max_connections, 3);
        assert_eq!(settings.logging.filter, "warn");
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[database]\nmax_connections = 0").unwrap();

        match load_config(file.path()) {
            Err(ConfigError::ValidationError(message)) => {
                assert!(message.contains("max_connections"))
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn bad_host_is_reported() {
        let server = ServerSettings {
            host: "not a host".to_string(),
            ..ServerSettings::default()
        };
        assert!(server.socket_addr().is_err());
    }
}
