use std::fmt;

use serde_json::{Map, Value};

/// The shape of an untrusted dynamic value.
///
/// Projection only ever reads from values classified as [`RecordKind::Object`].
/// Every other kind is treated as a record with no own fields.
///
/// # Examples
///
/// ```
/// use field_projector::RecordKind;
/// use serde_json::json;
///
/// assert_eq!(RecordKind::of(&json!({"a": 1})), RecordKind::Object);
/// assert_eq!(RecordKind::of(&json!([1, 2])), RecordKind::Array);
/// assert_eq!(RecordKind::of(&json!(null)), RecordKind::Null);
/// assert!(!RecordKind::of(&json!("a")).is_object());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// JSON `null`
    Null,
    /// A boolean
    Bool,
    /// A number
    Number,
    /// A string
    String,
    /// An array; never map-like, even though it is indexable
    Array,
    /// A string-keyed map
    Object,
}

impl RecordKind {
    /// Classifies a dynamic value by its tag.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns `true` for the only kind projection reads fields from.
    pub fn is_object(self) -> bool {
        matches!(self, Self::Object)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// Returns the own fields of `value` if it is map-like.
///
/// `serde_json::Map` is a plain dictionary with no inheritance, so every key
/// it reports is an own field.
pub(crate) fn own_fields(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
