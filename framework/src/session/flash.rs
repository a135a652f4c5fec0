use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-keyed bag of flashed values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flash {
    values: BTreeMap<String, serde_json::Value>,
}

impl Flash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    ///
    /// Values that cannot be represented as JSON are dropped with a warning.
    pub fn put<V: Serialize>(&mut self, key: &str, value: V) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.values.insert(key.to_string(), value);
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "dropping unserializable flash value");
            }
        }
    }

    /// Decode the value under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// The value under `key` when it is a string
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|value| value.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fold `other` into this bag; its values win on conflicting keys
    pub fn merge(&mut self, other: Flash) {
        self.values.extend(other.values);
    }
}
