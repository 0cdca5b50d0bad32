//! Resolution error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment resolution error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvError {
    /// One or more required variables resolved to nothing, after both the
    /// raw source and the declared defaults were consulted. Carries every
    /// missing name, in declared order.
    #[error("The following environment variables are required but not set: {}", render_keys(.keys))]
    MissingRequired {
        /// Missing required key names, in declared order
        keys: Vec<String>,
    },

    /// A resolved environment could not be deserialized into the requested type
    #[error("Failed to deserialize resolved environment into {target}: {message}")]
    Deserialize {
        /// Target type name
        target: String,
        /// Underlying deserialization error
        message: String,
    },
}

impl EnvError {
    /// Create a missing-required-keys error
    pub fn missing_required(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::MissingRequired {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a deserialization error
    pub fn deserialize_error(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Deserialize {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Missing key names carried by this error, if any
    pub fn missing_keys(&self) -> &[String] {
        match self {
            Self::MissingRequired { keys } => keys,
            Self::Deserialize { .. } => &[],
        }
    }
}

/// Render the missing key names as a JSON array
fn render_keys(keys: &[String]) -> String {
    serde_json::to_string(keys).unwrap_or_else(|_| format!("{keys:?}"))
}

/// Result type for environment resolution
pub type EnvResult<T> = Result<T, EnvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_required_message_is_json_array() {
        let err = EnvError::missing_required(["PORT", "DATABASE_URL"]);
        assert_eq!(
            err.to_string(),
            r#"The following environment variables are required but not set: ["PORT","DATABASE_URL"]"#
        );
    }

    #[test]
    fn test_missing_keys_preserve_declared_order() {
        let err = EnvError::missing_required(["B", "A", "B"]);
        assert_eq!(err.missing_keys(), ["B", "A", "B"]);
    }
}
