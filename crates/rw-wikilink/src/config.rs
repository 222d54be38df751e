//! Wikilink configuration.
//!
//! Parses the `[wikilink]` table of an `rw.toml` file:
//!
//! ```toml
//! [wikilink]
//! alias_delimiter = "|"
//! ```
//!
//! Missing tables and keys fall back to the defaults.

use std::path::Path;

use serde::Deserialize;

use crate::extension::DEFAULT_ALIAS_DELIMITER;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Top-level document; only the `[wikilink]` table is read.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    wikilink: WikiLinkConfig,
}

/// Wikilink settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WikiLinkConfig {
    /// Character separating destination and alias.
    pub alias_delimiter: String,
}

impl Default for WikiLinkConfig {
    fn default() -> Self {
        Self {
            alias_delimiter: char::from(DEFAULT_ALIAS_DELIMITER).to_string(),
        }
    }
}

impl WikiLinkConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.wikilink.validate()?;
        Ok(file.wikilink)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate that all fields are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.alias_delimiter_byte().map(|_| ())
    }

    /// Alias delimiter as a single byte.
    ///
    /// The delimiter must be one ASCII character other than `[` and `]`.
    pub fn alias_delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.alias_delimiter.as_bytes() {
            [b'[' | b']'] => Err(ConfigError::Validation(format!(
                "wikilink.alias_delimiter cannot be a bracket, got {:?}",
                self.alias_delimiter
            ))),
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::Validation(format!(
                "wikilink.alias_delimiter must be a single ASCII character, got {:?}",
                self.alias_delimiter
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = WikiLinkConfig::default();
        assert_eq!(config.alias_delimiter, ":");
        assert_eq!(config.alias_delimiter_byte().unwrap(), b':');
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = WikiLinkConfig::from_toml_str("").unwrap();
        assert_eq!(config, WikiLinkConfig::default());
    }

    #[test]
    fn test_other_tables_are_ignored() {
        let config = WikiLinkConfig::from_toml_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config, WikiLinkConfig::default());
    }

    #[test]
    fn test_custom_delimiter() {
        let config = WikiLinkConfig::from_toml_str("[wikilink]\nalias_delimiter = \"|\"\n").unwrap();
        assert_eq!(config.alias_delimiter_byte().unwrap(), b'|');
    }

    #[test]
    fn test_empty_table_uses_defaults() {
        let config = WikiLinkConfig::from_toml_str("[wikilink]\n").unwrap();
        assert_eq!(config.alias_delimiter, ":");
    }

    #[test]
    fn test_rejects_multi_character_delimiter() {
        let err = WikiLinkConfig::from_toml_str("[wikilink]\nalias_delimiter = \"::\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("single ASCII character"));
    }

    #[test]
    fn test_rejects_empty_delimiter() {
        let err = WikiLinkConfig::from_toml_str("[wikilink]\nalias_delimiter = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let err = WikiLinkConfig::from_toml_str("[wikilink]\nalias_delimiter = \"§\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_bracket_delimiter() {
        let err = WikiLinkConfig::from_toml_str("[wikilink]\nalias_delimiter = \"]\"\n").unwrap_err();
        assert!(err.to_string().contains("cannot be a bracket"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = WikiLinkConfig::from_toml_str("[wikilink\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_wrong_type() {
        let err = WikiLinkConfig::from_toml_str("[wikilink]\nalias_delimiter = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[wikilink]\nalias_delimiter = \"#\"").unwrap();

        let config = WikiLinkConfig::load(file.path()).unwrap();
        assert_eq!(config.alias_delimiter_byte().unwrap(), b'#');
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = WikiLinkConfig::load(&dir.path().join("rw.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
