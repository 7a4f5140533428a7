use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An ordered, duplicate-free list of field names permitted through projection.
///
/// Construction never fails. Duplicate names keep their first position, and a
/// dynamic allowlist that is not an array of strings contributes nothing.
///
/// # Examples
///
/// ```
/// use field_projector::Allowlist;
/// use serde_json::json;
///
/// let fields = Allowlist::new(["name", "email", "name"]);
/// assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["name", "email"]);
///
/// // Malformed allowlists degrade to empty
/// assert!(Allowlist::from_value(&json!("name")).is_empty());
/// assert!(Allowlist::from_value(&json!(null)).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Allowlist {
    keys: Vec<String>,
}

impl Allowlist {
    /// Builds an allowlist from field names, dropping repeats.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let keys = keys
            .into_iter()
            .map(|key| key.into())
            .filter(|key: &String| seen.insert(key.clone()))
            .collect();
        Self { keys }
    }

    /// Returns the allowlist that permits nothing.
    pub const fn empty() -> Self {
        Self { keys: Vec::new() }
    }

    /// Normalizes an untrusted dynamic allowlist.
    ///
    /// Only an array is accepted; anything else yields an empty allowlist.
    /// Non-string array entries are skipped, so `[1]` does not match a `"1"` key.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::new(items.iter().filter_map(Value::as_str)),
            other => {
                tracing::debug!(
                    kind = %crate::RecordKind::of(other),
                    "allowlist is not an array; nothing will pass"
                );
                Self::empty()
            }
        }
    }

    /// Iterates over permitted field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Returns `true` if `key` is permitted.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Returns the number of distinct permitted names.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is permitted.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Allowlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// Deserialization goes through `new` so repeats are collapsed here too.
impl<'de> Deserialize<'de> for Allowlist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::new(keys))
    }
}
