//! Stylesheet system for the diagram color palette
//!
//! A stylesheet maps the tokens used by the SVG style block (`node-fill`,
//! `connector`, `relation-fill`, ...) to concrete CSS values. Unset tokens
//! fall back to the default palette.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid value for '{token}': {value:?} (must not contain < > {{ }} or ;)")]
    InvalidValue { token: String, value: String },
}

/// Characters that would end a declaration, a rule or the `<style>` element
const FORBIDDEN_CHARS: [char; 5] = ['<', '>', '{', '}', ';'];

/// Whether `value` can be written into the style block as-is
fn is_safe_value(value: &str) -> bool {
    !value.contains(FORBIDDEN_CHARS)
}

/// A stylesheet mapping palette tokens to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Token name -> CSS value, ordered for stable output
    pub colors: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette - blue nodes with white text, gray connectors
const DEFAULT_PALETTE: &str = r##"
[colors]
node-fill = "#4A90E2"
node-stroke = "#2E5A8A"
node-text = "#ffffff"

connector = "#333333"

relation-fill = "#F5F5F5"
relation-stroke = "#4A90E2"
relation-text = "#333333"

font-family = "Arial, sans-serif"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Resolve a token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a token with fallback to the default palette
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(value) = self.resolve(token) {
            return value.to_string();
        }

        let default = Self::default();
        if let Some(value) = default.resolve(token) {
            return value.to_string();
        }

        "#333333".to_string()
    }

    /// Fill in every default token this stylesheet leaves unset
    pub fn with_defaults(mut self) -> Self {
        for (token, value) in Self::default().colors {
            self.colors.entry(token).or_insert(value);
        }
        self
    }

    /// Drop tokens whose name or value cannot be written into CSS safely
    pub fn sanitized(mut self) -> Self {
        self.colors
            .retain(|token, value| is_safe_value(token) && is_safe_value(value));
        self
    }
}

impl FromStr for Stylesheet {
    type Err = StylesheetError;

    /// Load stylesheet from TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        if let Some((token, value)) = parsed
            .colors
            .iter()
            .find(|(token, value)| !is_safe_value(token) || !is_safe_value(value))
        {
            return Err(StylesheetError::InvalidValue {
                token: token.clone(),
                value: value.clone(),
            });
        }

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        DEFAULT_PALETTE
            .parse()
            .expect("Default palette should be valid TOML")
    }
}
