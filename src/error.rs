//! Error types for reading input documents

use thiserror::Error;

/// Errors raised while reading a tree or configuration document
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tree JSON at line {}, column {}: {0}", .0.line(), .0.column())]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse configuration TOML: {0}")]
    Config(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_reports_location() {
        let err: InputError = serde_json::from_str::<serde_json::Value>("{\n  \"name\": }")
            .unwrap_err()
            .into();
        let message = err.to_string();
        assert!(message.contains("line 2"), "got: {message}");
    }
}
