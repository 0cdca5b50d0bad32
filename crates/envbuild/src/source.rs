//! Raw key/value sources for resolution

use std::collections::{BTreeMap, HashMap};

/// A flat mapping from variable name to optional string value
///
/// Resolution reads every declared key from a source exactly once, using
/// the prefixed external name. The process environment is just one
/// implementation; tests typically resolve against a plain map.
pub trait EnvSource {
    /// Fetch the raw value for a key, or `None` if the key is not set
    ///
    /// An empty string is a present value, not an absent one.
    fn get(&self, key: &str) -> Option<String>;
}

/// The live process environment
///
/// Entries whose value is not valid UTF-8 are reported as unset; the
/// resolver never sees non-unicode data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!("environment variable {} contains invalid UTF-8, treating as unset", key);
                None
            }
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for HashMap<String, Option<String>> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned().flatten()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(|value| (*value).to_string())
    }
}

impl<S: EnvSource> EnvSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_lookup() {
        let source = HashMap::from([("HOST".to_string(), "localhost".to_string())]);
        assert_eq!(EnvSource::get(&source, "HOST"), Some("localhost".to_string()));
        assert_eq!(EnvSource::get(&source, "PORT"), None);
    }

    #[test]
    fn test_empty_string_is_present() {
        let source = HashMap::from([("EMPTY", "")]);
        assert_eq!(EnvSource::get(&source, "EMPTY"), Some(String::new()));
    }

    #[test]
    fn test_optional_valued_map_source() {
        let source = HashMap::from([
            ("SET".to_string(), Some("value".to_string())),
            ("UNSET".to_string(), None),
        ]);
        assert_eq!(EnvSource::get(&source, "SET"), Some("value".to_string()));
        assert_eq!(EnvSource::get(&source, "UNSET"), None);
    }

    #[test]
    fn test_process_env_missing() {
        assert_eq!(ProcessEnv.get("ENVBUILD_TEST_MISSING_VAR_12345"), None);
    }
}
