use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{DataSettings, LoggingSettings, PreviewSettings, ServerSettings, Settings};
pub use telemetry::init_tracing;

/// Prefix for environment overrides, e.g. `TERCILE_DATA__FILE_PATH`.
pub const ENV_PREFIX: &str = "TERCILE";

/// Loads the application configuration.
///
/// Layers, lowest precedence first:
/// 1. Built-in defaults.
/// 2. The TOML file at `path`, or an optional `config.toml` in the working
///    directory when no path is given.
/// 3. Environment variables prefixed with `TERCILE_`, using `__` between
///    nested keys.
///
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .set_default("data.file_path", "data/prices.csv")?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("logging.filter", "info")?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults_apply_without_a_file() {
        let settings = load_config(None).unwrap();
        assert_eq!(settings.data.file_path, PathBuf::from("data/prices.csv"));
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.preview.default_rows, None);
        assert_eq!(settings.logging.directory, None);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file = write_config(
            r#"
            [data]
            file_path = "/srv/prices/dis.us.txt"

            [server]
            host = "127.0.0.1"
            port = 8080

            [preview]
            default_rows = 50
            "#,
        );

        let settings = load_config(Some(file.path())).unwrap();
        assert_eq!(settings.data.file_path, PathBuf::from("/srv/prices/dis.us.txt"));
        assert_eq!(settings.server.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(settings.preview.default_rows, Some(50));
        assert_eq!(settings.logging.filter, "info");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_zero_port_fails_validation() {
        let file = write_config("[server]\nport = 0\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("port")));
    }

    #[test]
    fn test_empty_data_path_fails_validation() {
        let file = write_config("[data]\nfile_path = \"\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("file_path")));
    }

    #[test]
    fn test_unparsable_host_is_rejected() {
        let server = ServerSettings {
            host: "not a host".to_string(),
            port: 80,
        };
        assert!(server.socket_addr().is_err());
    }
}
