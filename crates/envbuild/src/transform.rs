//! Per-key value transforms

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A stored single-argument transform from raw string to value
///
/// At most one transform is registered per key; registering another one
/// for the same key replaces it. A transform only ever sees present raw
/// values, never an absent key.
#[derive(Clone)]
pub struct Transform {
    transform_fn: Arc<dyn Fn(&str) -> Value + Send + Sync>,
}

impl Transform {
    /// Create a new transform from a closure
    pub fn new<F>(transform_fn: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        Self {
            transform_fn: Arc::new(transform_fn),
        }
    }

    /// Apply the transform to a raw value
    pub fn apply(&self, raw: &str) -> Value {
        (self.transform_fn)(raw)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("transform_fn", &"<function>")
            .finish()
    }
}

/// Best-effort parsers usable as transforms
///
/// All helpers fall back to passing the raw text through as a string when
/// it does not match the expected shape; a transform is infallible.
pub mod parse {
    use serde_json::Value;

    /// Coerce environment text into the closest JSON value
    ///
    /// Recognizes booleans, integers, floats, inline JSON objects and
    /// arrays, and comma-separated lists, in that order.
    pub fn auto(raw: &str) -> Value {
        if raw.is_empty() {
            return Value::String(String::new());
        }

        if raw.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }

        if let Ok(int_val) = raw.parse::<i64>() {
            return Value::Number(serde_json::Number::from(int_val));
        }

        if let Ok(float_val) = raw.parse::<f64>() {
            if let Some(num) = serde_json::Number::from_f64(float_val) {
                return Value::Number(num);
            }
        }

        if (raw.starts_with('{') && raw.ends_with('}'))
            || (raw.starts_with('[') && raw.ends_with(']'))
        {
            if let Ok(json_val) = serde_json::from_str(raw) {
                return json_val;
            }
        }

        if raw.contains(',') && !raw.starts_with('"') {
            return list(raw);
        }

        Value::String(raw.to_string())
    }

    /// Parse as an integer or float, string fallback otherwise
    pub fn number(raw: &str) -> Value {
        if let Ok(int_val) = raw.parse::<i64>() {
            return Value::Number(serde_json::Number::from(int_val));
        }
        if let Ok(float_val) = raw.parse::<f64>() {
            if let Some(num) = serde_json::Number::from_f64(float_val) {
                return Value::Number(num);
            }
        }
        Value::String(raw.to_string())
    }

    /// Parse as a boolean, string fallback otherwise
    ///
    /// Recognizes "true", "1", "yes", "on" and "false", "0", "no", "off",
    /// case-insensitive.
    pub fn boolean(raw: &str) -> Value {
        match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Value::Bool(true),
            "false" | "0" | "no" | "off" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        }
    }

    /// Split on commas into an array, coercing each trimmed item
    pub fn list(raw: &str) -> Value {
        Value::Array(raw.split(',').map(|item| auto(item.trim())).collect())
    }
}
