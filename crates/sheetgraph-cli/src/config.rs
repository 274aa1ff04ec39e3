//! Optional `sheetgraph.toml` settings.

use serde::Deserialize;
use sheetgraph_model::ManagedSourceNaming;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "sheetgraph.toml";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const LOG_ENV_VAR: &str = "SHEETGRAPH_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Replaces the project's own generated-source naming when present.
    pub sources: Option<ManagedSourceNaming>,
    pub eligibility: EligibilityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EligibilityConfig {
    pub parallel: bool,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `explicit`, or the default path when it exists.
    ///
    /// Only an explicitly requested file is required to exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Filter directives for the log subscriber. An environment override
    /// wins over the config file.
    pub fn log_filter(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.logging.filter.clone())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        Config::parse(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").expect("empty config should parse");
        assert_eq!(config, Config::default());
        assert!(config.sources.is_none());
        assert!(config.eligibility.parallel);
    }

    #[test]
    fn full_file_parses_every_section() {
        let config = parse(
            r#"
[sources]
directory = "gen"
prefix = "Priv"
extension = "cc"

[eligibility]
parallel = false

[logging]
filter = "sheetgraph=debug"
"#,
        )
        .expect("full config should parse");

        let sources = config.sources.expect("sources section should be present");
        assert_eq!(sources.file_for("7"), "gen/Priv7.cc");
        assert!(!config.eligibility.parallel);
        assert_eq!(config.logging.filter.as_deref(), Some("sheetgraph=debug"));
    }

    #[test]
    fn partial_sources_section_uses_default_naming_for_the_rest() {
        let config = parse("[sources]\ndirectory = \"out\"\n").expect("config should parse");
        let sources = config.sources.expect("sources section should be present");
        assert_eq!(sources.file_for("1"), "out/GDpriv1.cpp");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("[eligibility]\nthreads = 4\n").expect_err("unknown key must fail");
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn misspelled_sources_key_is_rejected() {
        let err = parse("[sources]\nprefx = \"x\"\n").expect_err("unknown key must fail");
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn env_override_wins_over_config_filter() {
        let config = parse("[logging]\nfilter = \"info\"\n").expect("config should parse");
        assert_eq!(config.log_filter(Some("trace".to_string())), "trace");
        assert_eq!(config.log_filter(Some("  ".to_string())), "info");
        assert_eq!(config.log_filter(None), "info");
        assert_eq!(Config::default().log_filter(None), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = std::env::temp_dir().join("sheetgraph-config-does-not-exist.toml");
        let err = Config::load(Some(&path)).expect_err("missing explicit config must fail");
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
