//! Engine configuration: which vocabularies to load and how to log.
//!
//! Persisted as TOML:
//!
//! ```toml
//! vocabularies = ["activitystreams", "toot"]
//!
//! [logging]
//! filter = "info"
//! ```

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::catalogue::Catalogue;
use crate::vocab::Vocabulary;

/// Errors from loading or applying configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(vocab::config::config_read),
        help("Ensure the config file exists and is readable.")
    )]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}")]
    #[diagnostic(
        code(vocab::config::config_parse),
        help("Check the TOML syntax: {message}")
    )]
    ConfigParse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(vocab::config::config_write),
        help("Ensure you have write permissions to the config directory.")
    )]
    ConfigWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown vocabulary \"{name}\"")]
    #[diagnostic(
        code(vocab::config::unknown_vocabulary),
        help("Supported vocabularies are \"activitystreams\" and \"toot\".")
    )]
    UnknownVocabulary { name: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabConfig {
    /// Vocabularies registered in the catalogue, by name.
    #[serde(default = "default_vocabularies")]
    pub vocabularies: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_vocabularies() -> Vec<String> {
    Vocabulary::ALL.iter().map(|v| v.name().to_string()).collect()
}
fn default_filter() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            vocabularies: default_vocabularies(),
            logging: LoggingConfig::default(),
        }
    }
}

impl VocabConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::ConfigWrite {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::ConfigWrite {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Parse the configured vocabulary names, in order, without repeats.
    pub fn enabled_vocabularies(&self) -> ConfigResult<Vec<Vocabulary>> {
        let mut enabled = Vec::with_capacity(self.vocabularies.len());
        for name in &self.vocabularies {
            let vocabulary =
                Vocabulary::from_name(name).ok_or_else(|| ConfigError::UnknownVocabulary {
                    name: name.clone(),
                })?;
            if enabled.contains(&vocabulary) {
                warn!(vocabulary = name.as_str(), "vocabulary listed twice in config");
                continue;
            }
            enabled.push(vocabulary);
        }
        Ok(enabled)
    }

    /// Build the catalogue of the configured vocabularies.
    pub fn catalogue(&self) -> ConfigResult<Catalogue> {
        Ok(Catalogue::with_vocabularies(&self.enabled_vocabularies()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: VocabConfig = toml::from_str("").unwrap();
        assert_eq!(config, VocabConfig::default());
        assert_eq!(config.logging.filter, "info");

        let config: VocabConfig = toml::from_str("vocabularies = [\"as\"]").unwrap();
        assert_eq!(config.enabled_vocabularies().unwrap(), [Vocabulary::ActivityStreams]);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("asv.toml");
        let config = VocabConfig {
            vocabularies: vec!["toot".into()],
            logging: LoggingConfig {
                filter: "activity_vocab=trace".into(),
            },
        };
        config.save(&path).unwrap();
        assert_eq!(VocabConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            VocabConfig::load(&missing),
            Err(ConfigError::ConfigRead { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "vocabularies = [").unwrap();
        assert!(matches!(
            VocabConfig::load(&broken),
            Err(ConfigError::ConfigParse { .. })
        ));
    }

    #[test]
    fn catalogue_follows_vocabularies() {
        let config = VocabConfig {
            vocabularies: vec!["toot".into(), "TOOT".into()],
            ..Default::default()
        };
        let catalogue = config.catalogue().unwrap();
        assert_eq!(catalogue.vocabularies(), &[Vocabulary::Toot]);
        assert!(catalogue.contains("Emoji"));
        assert!(!catalogue.contains("Note"));

        let config = VocabConfig {
            vocabularies: vec!["litepub".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.catalogue(),
            Err(ConfigError::UnknownVocabulary { ref name }) if name == "litepub"
        ));
    }
}
