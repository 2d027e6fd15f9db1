//! Flat key/value parameters with typed reads

use std::collections::BTreeMap;

/// Read-only access to resolved invocation parameters
pub trait ConfigView {
    /// Raw value for a key, if set
    fn get(&self, key: &str) -> Option<&str>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn read_string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Integer value; malformed input falls back to the default
    fn read_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("invalid integer '{}' for '{}', using {}", raw, key, default);
                default
            }),
            None => default,
        }
    }

    /// Boolean value; malformed input falls back to the default
    fn read_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                tracing::warn!("invalid boolean '{}' for '{}', using {}", raw, key, default);
                default
            }),
            None => default,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// In-memory parameter set
///
/// Empty values are never stored; setting one leaves any earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    values: BTreeMap<String, String>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from key/value pairs
    pub fn from_values<K, V, I>(values: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut bag = Self::new();
        for (key, value) in values {
            bag.set(key, value);
        }
        bag
    }

    /// Set a value; empty values are ignored
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.values.insert(key.into(), value);
        }
    }

    /// Set a value only when present
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigView for ParameterBag {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
