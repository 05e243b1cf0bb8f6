//! Console configuration and data directory layout.
//!
//! ```text
//! ~/.aquadesk/
//!   config.yaml        # backend URL, paging, timeouts
//!   aquadesk.log
//!   storage/
//!     waterSystem_connections.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Backend the console talks to when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("invalid setting {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Settings read from `config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend; `/api/<resource>` is appended
    pub api_url: String,
    /// Rows per page on every list screen; each screen's own default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    pub request_timeout_secs: u64,
    /// Customer shown on the dashboard
    pub customer_id: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: None,
            request_timeout_secs: 10,
            customer_id: 1,
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub page_size: Option<usize>,
    pub customer_id: Option<i64>,
}

impl AppConfig {
    /// Load `config.yaml` from `data_dir`, or the defaults when it does not exist.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: AppConfig =
            serde_saphyr::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        let yaml =
            serde_saphyr::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::create_dir_all(data_dir)
            .and_then(|_| fs::write(&path, yaml))
            .map_err(|source| ConfigError::Write { path, source })
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if overrides.page_size.is_some() {
            self.page_size = overrides.page_size;
        }
        if let Some(id) = overrides.customer_id {
            self.customer_id = id;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "api_url",
                message: format!("'{url}' is not an http(s) URL"),
            });
        }
        if self.page_size == Some(0) {
            return Err(ConfigError::Invalid {
                field: "page_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Default data directory (`~/.aquadesk/`)
#[cfg(feature = "native")]
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aquadesk")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "api_url: https://water.example.org\npage_size: 25\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.api_url, "https://water.example.org");
        assert_eq!(config.page_size, Some(25));
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.customer_id, 1);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            customer_id: 42,
            ..AppConfig::default()
        };
        config.save(dir.path()).unwrap();
        assert_eq!(AppConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "api_url: ftp://nope\n").unwrap();
        assert!(matches!(
            AppConfig::load(dir.path()),
            Err(ConfigError::Invalid { field: "api_url", .. })
        ));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = AppConfig::default()
            .with_overrides(ConfigOverrides {
                api_url: Some("http://10.0.0.5:8080".to_string()),
                page_size: Some(5),
                customer_id: None,
            })
            .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:8080");
        assert_eq!(config.page_size, Some(5));
        assert_eq!(config.customer_id, 1);

        let zero = AppConfig::default().with_overrides(ConfigOverrides {
            page_size: Some(0),
            ..ConfigOverrides::default()
        });
        assert!(zero.is_err());
    }
}
