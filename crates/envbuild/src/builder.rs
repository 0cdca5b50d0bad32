//! Immutable environment schema builder

use crate::transform::Transform;
use serde_json::Value;
use std::collections::HashMap;

/// Declarative schema for resolving environment variables
///
/// A builder accumulates which keys are required, which are optional,
/// default raw values, per-key transforms, and a lookup prefix. Every
/// chaining method borrows the current builder and returns a fresh one;
/// previously obtained builders stay unchanged and resolvable.
///
/// Required keys are fixed at construction time. Defaults apply only to
/// required keys; a default declared for any other key is inert.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentBuilder {
    /// Required key names, declared order, duplicates preserved
    pub(crate) required_keys: Vec<String>,

    /// Optional key names, appended across calls, duplicates preserved
    pub(crate) optional_keys: Vec<String>,

    /// Fallback raw values for required keys, keyed by un-prefixed name
    pub(crate) default_values: HashMap<String, String>,

    /// Per-key transforms, keyed by un-prefixed name
    pub(crate) transforms: HashMap<String, Transform>,

    /// Prefix prepended to every key when reading from the raw source
    pub(crate) prefix: String,

    /// Whether trace output may include values of sensitive-looking keys
    pub(crate) log_sensitive: bool,
}

impl EnvironmentBuilder {
    /// Create a schema with the given required keys
    ///
    /// Order is preserved and determines error-reporting order. Names are
    /// not deduplicated. An empty set is accepted.
    pub fn new(required: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            required_keys: required.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append optional keys
    ///
    /// Optional keys resolve to null silently when absent from the source
    /// and never cause failure. Repeated calls append; duplicates are kept
    /// and re-resolve idempotently.
    pub fn optionals(&self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut next = self.clone();
        next.optional_keys.extend(keys.into_iter().map(Into::into));
        next
    }

    /// Replace the default value set
    ///
    /// Each call overwrites the whole set, it does not merge with earlier
    /// calls. A default is consulted only for keys declared as required.
    pub fn defaults(
        &self,
        defaults: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut next = self.clone();
        next.default_values = defaults
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        next
    }

    /// Register a transform for each of the given keys
    ///
    /// Merges into the existing transform map; keys not listed keep their
    /// prior transform. A later registration for the same key replaces the
    /// earlier one.
    pub fn transform<F>(
        &self,
        transform_fn: F,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        let transform = Transform::new(transform_fn);
        let mut next = self.clone();
        for key in keys {
            next.transforms.insert(key.into(), transform.clone());
        }
        next
    }

    /// Replace the lookup prefix
    ///
    /// The prefix changes only which external name is read from the raw
    /// source; defaults, transforms and result keys always use the
    /// declared un-prefixed names. Logs an example listing of the declared
    /// keys under the new prefix (see [`Self::prefix_example`]).
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.prefix = prefix.into();
        tracing::debug!(
            "expecting environment variables of the form:\n{}",
            next.prefix_example()
        );
        next
    }

    /// Allow trace output to include values of sensitive-looking keys
    pub fn log_sensitive(&self, enabled: bool) -> Self {
        let mut next = self.clone();
        next.log_sensitive = enabled;
        next
    }

    /// Render every declared key as `<prefix><KEY_UPPERCASED>=example_value`
    ///
    /// Required keys first, then optional keys, one per line. With no keys
    /// declared, renders a single generic placeholder line.
    pub fn prefix_example(&self) -> String {
        let mut lines: Vec<String> = self
            .required_keys
            .iter()
            .chain(&self.optional_keys)
            .map(|key| format!("{}{}=example_value", self.prefix, key.to_uppercase()))
            .collect();

        if lines.is_empty() {
            lines.push(format!("{}EXAMPLE_KEY=example_value", self.prefix));
        }

        lines.join("\n")
    }

    /// Required key names, in declared order
    pub fn required_keys(&self) -> &[String] {
        &self.required_keys
    }

    /// Optional key names, in declared order
    pub fn optional_keys(&self) -> &[String] {
        &self.optional_keys
    }

    /// Current lookup prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// External name a key is read under in the raw source
    pub(crate) fn lookup_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}
