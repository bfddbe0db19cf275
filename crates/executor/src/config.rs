//! Plugin configuration via `kakbridge.toml`
//!
//! Every execution pass is a fresh process, so configuration is re-read on
//! each run. The file is located through the `KAKBRIDGE_CONFIG` environment
//! variable; without it the defaults apply.

use std::path::{Path, PathBuf};

use kakbridge_core::Env;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::{Error, Result};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "kakbridge.toml";

/// Environment variable holding the config file path
pub const CONFIG_ENV_VAR: &str = "KAKBRIDGE_CONFIG";

/// Plugin configuration loaded from `kakbridge.toml`.
///
/// # Example
///
/// ```toml
/// binary = "/home/me/.cargo/bin/my-plugin"
/// fail_prefix = "my-plugin"
/// log_level = "debug"
/// log_file = "/tmp/my-plugin.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Binary path written into generated scripts.
    /// `None` means the running executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    /// Prefix of failure messages shown in Kakoune
    #[serde(default = "default_fail_prefix")]
    pub fail_prefix: String,
    /// Maximum log level: off, error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Append logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_fail_prefix() -> String {
    "kakbridge".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            binary: None,
            fail_prefix: default_fail_prefix(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl BridgeConfig {
    /// Parse the log level.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for unknown level names.
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level.parse::<LevelFilter>().map_err(|_| Error::Config {
            reason: format!(
                "invalid log_level '{}'. Expected off, error, warn, info, debug or trace.",
                self.log_level
            ),
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# kakbridge plugin configuration
#
# Binary path written into generated scripts (default: the running executable)
# binary = "/usr/local/bin/my-plugin"

# Prefix of failure messages shown in Kakoune
fail_prefix = "kakbridge"

# Log level: "off", "error", "warn" (default), "info", "debug" or "trace".
# Logs never go to stdout, which Kakoune evaluates as commands.
log_level = "warn"

# Append logs to a file instead of stderr (stderr ends up in *debug*)
# log_file = "/tmp/kakbridge.log"
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BridgeConfig = toml::from_str(content).map_err(|e| Error::Config {
            reason: format!("failed to parse config: {}", e),
        })?;
        // Validate the level eagerly
        config.level_filter()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => Error::Config {
                reason: format!("{}: {}", path.display(), reason),
            },
            other => other,
        })
    }

    /// Load the file named by `KAKBRIDGE_CONFIG`, or the defaults when the
    /// variable is unset or empty.
    pub fn from_env(env: &dyn Env) -> Result<Self> {
        match env.get(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Config {
                reason: format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kakbridge_core::MapEnv;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.binary, None);
        assert_eq!(config.fail_prefix, "kakbridge");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::WARN);
    }

    #[test]
    fn default_toml_parses_to_default() {
        let config = BridgeConfig::from_toml_str(BridgeConfig::default_toml()).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let config = BridgeConfig::from_toml_str(
            "binary = \"/opt/plugin\"\nfail_prefix = \"plug\"\nlog_level = \"debug\"\nlog_file = \"/tmp/p.log\"\n",
        )
        .unwrap();
        assert_eq!(config.binary.as_deref(), Some("/opt/plugin"));
        assert_eq!(config.fail_prefix, "plug");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::DEBUG);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/p.log")));
    }

    #[test]
    fn serialized_config_reloads_unchanged() {
        let config = BridgeConfig {
            binary: Some("/opt/plug's bin".to_string()),
            fail_prefix: "plug".to_string(),
            log_level: "trace".to_string(),
            log_file: Some(PathBuf::from("/tmp/plug.log")),
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(BridgeConfig::from_toml_str(&text).unwrap(), config);

        // unset paths are omitted, not written as empty strings
        let text = toml::to_string(&BridgeConfig::default()).unwrap();
        assert!(!text.contains("binary"));
        assert!(!text.contains("log_file"));
        assert_eq!(BridgeConfig::from_toml_str(&text).unwrap(), BridgeConfig::default());
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = BridgeConfig::from_toml_str("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, Error::Config { ref reason } if reason.contains("loud")));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(BridgeConfig::from_toml_str("binnary = \"/x\"").is_err());
    }

    #[test]
    fn from_env_without_variable_uses_defaults() {
        let config = BridgeConfig::from_env(&MapEnv::new()).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn from_env_reads_named_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "fail_prefix = \"demo\"\n").unwrap();

        let env = MapEnv::new().with(CONFIG_ENV_VAR, path.to_string_lossy());
        let config = BridgeConfig::from_env(&env).unwrap();
        assert_eq!(config.fail_prefix, "demo");
    }

    #[test]
    fn from_env_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let env = MapEnv::new().with(CONFIG_ENV_VAR, path.to_string_lossy());
        assert!(matches!(
            BridgeConfig::from_env(&env),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        BridgeConfig::write_default_if_missing(&path).unwrap();
        assert_eq!(BridgeConfig::from_file(&path).unwrap(), BridgeConfig::default());

        std::fs::write(&path, "fail_prefix = \"custom\"\n").unwrap();
        BridgeConfig::write_default_if_missing(&path).unwrap();
        assert_eq!(BridgeConfig::from_file(&path).unwrap().fail_prefix, "custom");
    }
}
