use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::model::config::Config;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("server url '{0}' cannot be used as a base for /todos")]
    NotABase(String),
}

/// Default config file location, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("td").join("config.toml")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config from `path`. A missing file yields the defaults; an
/// unreadable or malformed one is an error.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config for this invocation: explicit path or the default
/// location, then the `--server` override.
pub fn load_config(
    explicit: Option<&Path>,
    server_override: Option<&str>,
) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };
    let mut config = read_config(&path)?;
    if let Some(url) = server_override {
        config.server.base_url = url.to_string();
    }
    // Fail early on a bad URL rather than on the first request
    parse_base_url(&config.server.base_url)?;
    Ok(config)
}

/// Parse and validate the service root URL
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source: e,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::UpdateBody;
    use tempfile::TempDir;

    #[test]
    fn missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn reads_file_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[server]\nbase_url = \"http://example.test\"\nupdate_body = \"json\"\n",
        )
        .unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.server.base_url, "http://example.test");
        assert_eq!(config.server.update_body, UpdateBody::Json);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn server_override_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[server]\nbase_url = \"http://from-file.test\"\n").unwrap();
        let config = load_config(Some(&path), Some("http://from-flag.test")).unwrap();
        assert_eq!(config.server.base_url, "http://from-flag.test");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("none.toml")), Some("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn non_base_url_is_rejected() {
        let err = parse_base_url("mailto:someone@example.test").unwrap_err();
        assert!(matches!(err, ConfigError::NotABase(_)));
    }
}
