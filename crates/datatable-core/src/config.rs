//! Runtime configuration: store schema names and directive vocabulary.
//!
//! ```toml
//! [store]
//! entity_table = "pages"
//! attribute_table = "data"
//! aggregate = "dedup_concat"
//!
//! [directive]
//! identity_sentinel = "%pageid%"
//! sort_param = "datasrt"
//! ```
//!
//! `Config::validate` only admits plain `[A-Za-z_][A-Za-z0-9_]*` names.
//! The compiler double-quotes them, so keyword names such as `order` are
//! still valid.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub directive: DirectiveConfig,
}

impl Config {
    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;
        self.directive.validate()
    }
}

///
/// StoreConfig
///
/// Names of the entity table, the attribute-value table, and the aggregate
/// function the compiler targets.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub entity_table: String,
    pub entity_id: String,
    pub entity_name: String,
    pub attribute_table: String,
    pub attribute_entity: String,
    pub attribute_key: String,
    pub attribute_value: String,
    pub aggregate: String,
    pub separator: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            entity_table: "pages".to_string(),
            entity_id: "pid".to_string(),
            entity_name: "page".to_string(),
            attribute_table: "data".to_string(),
            attribute_entity: "pid".to_string(),
            attribute_key: "key".to_string(),
            attribute_value: "value".to_string(),
            aggregate: "dedup_concat".to_string(),
            separator: ", ".to_string(),
        }
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("store.entity_table", &self.entity_table),
            ("store.entity_id", &self.entity_id),
            ("store.entity_name", &self.entity_name),
            ("store.attribute_table", &self.attribute_table),
            ("store.attribute_entity", &self.attribute_entity),
            ("store.attribute_key", &self.attribute_key),
            ("store.attribute_value", &self.attribute_value),
            ("store.aggregate", &self.aggregate),
        ];

        for (field, value) in names {
            if !is_identifier(value) {
                return Err(ConfigError::InvalidIdentifier {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }
}

///
/// DirectiveConfig
///
/// Directive-side vocabulary: the identity pseudo-column, its default
/// header, the descending sort marker, and the request parameter used for
/// runtime sort overrides.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DirectiveConfig {
    pub identity_sentinel: String,
    pub page_name_label: String,
    pub descending_marker: char,
    pub sort_param: String,
}

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            identity_sentinel: "%pageid%".to_string(),
            page_name_label: "pagename".to_string(),
            descending_marker: '^',
            sort_param: "datasrt".to_string(),
        }
    }
}

impl DirectiveConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        // the sentinel is compared against trimmed, lowercased, comma-split keys
        let sentinel = &self.identity_sentinel;
        if sentinel.is_empty()
            || sentinel.to_lowercase() != *sentinel
            || sentinel
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, ',' | ':' | '#'))
        {
            return Err(ConfigError::InvalidSentinel(sentinel.clone()));
        }

        let marker = self.descending_marker;
        if marker.is_alphanumeric() || marker.is_whitespace() || marker == '_' {
            return Err(ConfigError::InvalidMarker(marker));
        }

        if self.sort_param.is_empty() {
            return Err(ConfigError::EmptySortParam);
        }

        Ok(())
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be a plain SQL identifier, got '{value}'")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("identity sentinel must be a non-empty lowercase token, got '{0}'")]
    InvalidSentinel(String),

    #[error("descending marker must be punctuation, got '{0}'")]
    InvalidMarker(char),

    #[error("sort parameter name must not be empty")]
    EmptySortParam,
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [store]
            entity_table = "wiki_pages"

            [directive]
            sort_param = "sort"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.entity_table, "wiki_pages");
        assert_eq!(config.store.attribute_table, "data");
        assert_eq!(config.directive.sort_param, "sort");
        assert_eq!(config.directive.descending_marker, '^');
    }

    #[test]
    fn injected_identifier_is_rejected() {
        let err = Config::from_toml_str(
            r#"
            [store]
            attribute_table = "data; DROP TABLE pages"
            "#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidIdentifier {
                field: "store.attribute_table",
                ..
            }
        ));
    }

    #[test]
    fn uppercase_sentinel_is_rejected() {
        let mut config = Config::default();
        config.directive.identity_sentinel = "%PAGEID%".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSentinel(_))
        ));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("pages"));
        assert!(is_identifier("_t1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1pages"));
        assert!(!is_identifier("pa ges"));
        assert!(!is_identifier("pages'"));
    }
}
