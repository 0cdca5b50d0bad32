//! Resolution of a builder schema against a raw source

use crate::builder::EnvironmentBuilder;
use crate::error::{EnvError, EnvResult};
use crate::source::{EnvSource, ProcessEnv};
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A fully resolved environment
///
/// Holds one entry per declared key, under its original un-prefixed name,
/// in declaration order. Optional keys absent from the source are present
/// with a null value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEnvironment {
    values: IndexMap<String, Value>,
}

impl ResolvedEnvironment {
    /// Get a resolved value by its declared key name
    ///
    /// Returns `None` for undeclared keys and `Some(&Value::Null)` for
    /// declared optional keys that were unset.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a resolved value as a string slice, if it is one
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Whether a declared key resolved to a present value
    pub fn is_set(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|value| !value.is_null())
    }

    /// Declared key names, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over declared keys and their resolved values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of declared keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys were declared
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Deserialize the resolved values into a typed configuration struct
    ///
    /// The caller's struct is the compile-time schema; its field names must
    /// match the declared key names.
    pub fn deserialize<T: DeserializeOwned>(&self) -> EnvResult<T> {
        let value = serde_json::to_value(&self.values).map_err(|e| {
            EnvError::deserialize_error(std::any::type_name::<T>(), e.to_string())
        })?;
        serde_json::from_value(value).map_err(|e| {
            EnvError::deserialize_error(std::any::type_name::<T>(), e.to_string())
        })
    }
}

impl EnvironmentBuilder {
    /// Resolve the declared schema against a raw key/value source
    ///
    /// Optional keys are resolved first and never fail; required keys are
    /// resolved second, falling back to declared defaults, and a name
    /// declared under both roles keeps the required pass's value. Missing
    /// required keys are collected exhaustively and reported together; on
    /// failure no partial result is returned.
    ///
    /// Resolution is a pure function of the builder and the source
    /// snapshot, so repeated calls yield identical results.
    pub fn resolve<S: EnvSource>(&self, source: &S) -> EnvResult<ResolvedEnvironment> {
        let mut values = IndexMap::new();

        for key in &self.optional_keys {
            let raw = source.get(&self.lookup_name(key));
            let value = self.transformed(key, raw.as_deref());
            self.trace_resolved(key, "optional", raw.as_deref(), &value);
            values.insert(key.clone(), value);
        }

        let mut missing = Vec::new();
        for key in &self.required_keys {
            let raw = source
                .get(&self.lookup_name(key))
                .or_else(|| self.default_values.get(key).cloned());

            match raw {
                Some(raw) => {
                    let value = self.transformed(key, Some(&raw));
                    self.trace_resolved(key, "required", Some(&raw), &value);
                    values.insert(key.clone(), value);
                }
                None => missing.push(key.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(EnvError::missing_required(missing));
        }

        tracing::debug!(
            "resolved {} required and {} optional environment keys",
            self.required_keys.len(),
            self.optional_keys.len()
        );

        Ok(ResolvedEnvironment { values })
    }

    /// Resolve against the live process environment
    pub fn resolve_env(&self) -> EnvResult<ResolvedEnvironment> {
        self.resolve(&ProcessEnv)
    }

    /// Apply the key's transform when a raw value is present
    ///
    /// Transforms are looked up by the declared un-prefixed name and are
    /// never applied to an absent value.
    fn transformed(&self, key: &str, raw: Option<&str>) -> Value {
        match raw {
            Some(raw) => match self.transforms.get(key) {
                Some(transform) => transform.apply(raw),
                None => Value::String(raw.to_string()),
            },
            None => Value::Null,
        }
    }

    fn trace_resolved(&self, key: &str, role: &str, raw: Option<&str>, value: &Value) {
        if is_sensitive_key(key) && !self.log_sensitive {
            tracing::trace!("resolved {} key {} = [REDACTED]", role, key);
        } else {
            tracing::trace!("resolved {} key {} (raw {:?}) = {}", role, key, raw, value);
        }
    }
}

/// Keys whose values should not appear in trace output
fn is_sensitive_key(key: &str) -> bool {
    let key_lower = key.to_lowercase();
    key_lower.contains("password")
        || key_lower.contains("secret")
        || key_lower.contains("token")
        || key_lower.contains("api_key")
        || key_lower.contains("private")
        || key_lower.contains("credential")
}
