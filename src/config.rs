//! File-based configuration for the listener.

use std::path::Path;

use serde::Deserialize;

use crate::integration::DEFAULT_BUFFER_SIZE;
use crate::tracker::TrackerConfig;

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TuioConfig {
    #[serde(default)]
    pub listener: ListenerConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

/// UDP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenerConfig {
    /// Address:port to bind, TUIO's conventional port is 3333
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Receive buffer size in bytes
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_bind() -> String {
    "0.0.0.0:3333".to_string()
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            buffer_size: default_buffer_size(),
        }
    }
}

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<TuioConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: TuioConfig = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TuioConfig::default();
        assert_eq!(config.listener.bind, "0.0.0.0:3333");
        assert_eq!(config.listener.buffer_size, 4096);
        assert_eq!(config.tracker.max_pending_dead, 1024);
    }

    #[test]
    fn test_partial_toml() {
        let config: TuioConfig = toml::from_str(
            r#"
            [tracker]
            max_pending_dead = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.tracker.max_pending_dead, 16);
        assert_eq!(config.listener, ListenerConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind = \"127.0.0.1:3334\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind, "127.0.0.1:3334");
        assert_eq!(config.listener.buffer_size, 4096);
    }

    #[test]
    fn test_load_config_errors() {
        assert!(matches!(
            load_config("/nonexistent/tuio.toml"),
            Err(ConfigError::Io(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener\nbind = 1").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }
}
