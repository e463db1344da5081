use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use eyre::{Context, Result};

use crate::config::models::ServerConfig;

/// Load configuration from the environment plus an optional file.
///
/// Environment variables (`PORT`, `USERNAME`, `PASSWORD`,
/// `QUERY_TIMEOUT_SECS`, ...) always take precedence over file values.
/// Supports multiple file formats: YAML, JSON, TOML, INI.
pub fn load_config(config_path: Option<&str>) -> Result<ServerConfig> {
    let mut builder = Config::builder();

    if let Some(config_path) = config_path {
        let path = Path::new(config_path);

        // Determine file format based on extension
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            Some("toml") => FileFormat::Toml,
            Some("ini") => FileFormat::Ini,
            _ => FileFormat::Toml, // Default to TOML
        };

        builder = builder.add_source(File::new(
            path.to_str()
                .ok_or_else(|| eyre::eyre!("Invalid UTF-8 path: {}", path.display()))?,
            format,
        ));
    }

    let settings = builder
        .add_source(Environment::default())
        .build()
        .context("Failed to build configuration")?;

    let server_config: ServerConfig = settings
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    Ok(server_config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.query_timeout_secs, 5);
    }

    #[test]
    fn test_load_toml_config() {
        let toml_content = r#"
host = "127.0.0.1"
port = 8080
username = "admin"
password = "hunter2"
"#;

        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert!(config.credentials().is_some());
    }

    #[test]
    fn test_load_json_config() {
        let json_content = r#"
{
  "host": "127.0.0.1",
  "port": 9000,
  "query_timeout_secs": 2
}
"#;

        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        write!(temp_file, "{}", json_content).unwrap();

        let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.query_timeout_secs, 2);
        assert!(config.credentials().is_none());
    }
}
