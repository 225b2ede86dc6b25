use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
    pub logging: LoggingSettings,
}

/// Where the price history is read from.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Path to the daily OHLCV CSV file. It is re-read on every request.
    pub file_path: PathBuf,
}

/// Contains parameters for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    /// Resolves `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ConfigError::ValidationError(format!(
                    "server address '{}:{}' is not a valid socket address",
                    self.host, self.port
                ))
            })
    }
}

/// Defaults for the tabular preview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewSettings {
    /// Rows shown when a request does not ask for a specific count.
    /// `None` shows the whole file.
    pub default_rows: Option<usize>,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `web_server=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// When set, logs go to a daily-rolling file in this directory instead of stdout.
    pub directory: Option<PathBuf>,
}

impl Settings {
    /// Checks the values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.file_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.file_path must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
