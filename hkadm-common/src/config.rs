//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable TOML file never terminates the console: it is
//! logged as a warning and compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Backend URL used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Environment variable overriding the backend URL
pub const API_URL_ENV: &str = "HKADM_API_URL";

/// Environment variable overriding the session file location
pub const SESSION_FILE_ENV: &str = "HKADM_SESSION_FILE";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (`info`, `debug`, `hkadm_console=trace`, ...)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; stderr when absent
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// On-disk configuration (`~/.config/hkadm/config.toml`)
///
/// Every field is optional so that a partial file still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api_base_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub logging: LoggingConfig,
}

/// Compiled-in fallbacks
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl CompiledDefaults {
    /// Defaults for the platform the console runs on
    pub fn for_current_platform() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: default_session_file(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: default_log_level(),
        }
    }
}

/// `~/.local/share/hkadm/session.json` on Linux, the platform equivalent elsewhere
fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hkadm"))
        .unwrap_or_else(|| PathBuf::from("./hkadm_data"))
        .join("session.json")
}

/// Default config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hkadm").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the config file, degrading to defaults on any problem
///
/// `path` overrides the default location.
pub fn load_or_default(path: Option<&Path>) -> TomlConfig {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => path,
        None => {
            warn!("No config directory on this platform, using defaults");
            return TomlConfig::default();
        }
    };

    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return TomlConfig::default();
    }

    match load_toml_config(&path) {
        Ok(config) => {
            debug!(path = %path.display(), "Loaded config file");
            config
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            TomlConfig::default()
        }
    }
}

/// Write a TOML config atomically (temp file + rename)
///
/// On Unix the file is created with mode 0600.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    write_atomic(path, content.as_bytes())
}

/// Atomic write helper shared with the session store
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Fully resolved console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL without trailing slash
    pub api_base_url: String,
    /// Where the `user` session entry is persisted
    pub session_file: PathBuf,
    pub request_timeout: Duration,
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Config pointing at `api_base_url` with defaults for everything else
    pub fn new(api_base_url: impl Into<String>, session_file: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: normalize_base_url(&api_base_url.into()),
            session_file: session_file.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            logging: LoggingConfig::default(),
        }
    }
}

/// Resolves [`ConsoleConfig`] from CLI, environment, TOML and defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_api_url: Option<String>,
    cli_session_file: Option<PathBuf>,
    toml: TomlConfig,
}

impl ConfigResolver {
    pub fn new(toml: TomlConfig) -> Self {
        Self {
            toml,
            ..Self::default()
        }
    }

    pub fn with_cli_api_url(mut self, url: Option<String>) -> Self {
        self.cli_api_url = url;
        self
    }

    pub fn with_cli_session_file(mut self, path: Option<PathBuf>) -> Self {
        self.cli_session_file = path;
        self
    }

    /// Resolve the backend URL (CLI → ENV → TOML → default)
    pub fn api_base_url(&self) -> Result<String> {
        let (url, source) = if let Some(url) = &self.cli_api_url {
            (url.clone(), "command line")
        } else if let Some(url) = env_non_empty(API_URL_ENV) {
            (url, "environment")
        } else if let Some(url) = &self.toml.api_base_url {
            (url.clone(), "TOML")
        } else {
            (DEFAULT_API_BASE_URL.to_string(), "compiled default")
        };

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API base URL from {} must start with http:// or https:// (got {:?})",
                source, url
            )));
        }

        debug!(url = %url, source, "Resolved API base URL");
        Ok(normalize_base_url(&url))
    }

    /// Resolve the session file (CLI → ENV → TOML → default)
    pub fn session_file(&self) -> PathBuf {
        self.cli_session_file
            .clone()
            .or_else(|| env_non_empty(SESSION_FILE_ENV).map(PathBuf::from))
            .or_else(|| self.toml.session_file.clone())
            .unwrap_or_else(default_session_file)
    }

    pub fn resolve(&self) -> Result<ConsoleConfig> {
        let timeout_secs = match self.toml.request_timeout_secs {
            Some(0) => {
                return Err(Error::Config(
                    "request_timeout_secs must be greater than zero".to_string(),
                ))
            }
            Some(secs) => secs,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(ConsoleConfig {
            api_base_url: self.api_base_url()?,
            session_file: self.session_file(),
            request_timeout: Duration::from_secs(timeout_secs),
            logging: self.toml.logging.clone(),
        })
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        assert_eq!(normalize_base_url("http://api.local:3000/"), "http://api.local:3000");
        assert_eq!(normalize_base_url(" http://api.local// "), "http://api.local");
    }

    #[test]
    fn test_compiled_defaults() {
        let defaults = CompiledDefaults::for_current_platform();
        assert_eq!(defaults.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(defaults.request_timeout_secs, 30);
        assert!(defaults.session_file.ends_with("session.json"));
    }

    #[test]
    fn test_partial_toml_parses() {
        let config: TomlConfig = toml::from_str("api_base_url = \"http://x\"").unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("http://x"));
        assert_eq!(config.logging.level, "info");
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml = TomlConfig {
            api_base_url: Some("http://x".to_string()),
            request_timeout_secs: Some(0),
            ..TomlConfig::default()
        };
        let resolver = ConfigResolver::new(toml).with_cli_api_url(Some("http://x".into()));
        assert!(matches!(resolver.resolve(), Err(Error::Config(_))));
    }
}
