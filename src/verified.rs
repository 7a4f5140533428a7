use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A projected payload that is safe to hand to trust-sensitive code.
///
/// `Verified<T>` is only produced by a [`Sanitizer`](crate::Sanitizer), so
/// holding one proves the payload went through an allowlist. Unlike
/// [`Tainted<T>`](crate::Tainted), it gives ergonomic access to its value.
///
/// # Construction Invariants
///
/// There is no public constructor and no `From<T>` implementation.
/// Construction is restricted to crate-internal code through `new_unchecked`.
///
/// # Access
///
/// - [`AsRef::as_ref`]: borrow the projected value
/// - [`into_inner`](Self::into_inner): consume and extract it
/// - [`into_typed`](Self::into_typed): deserialize a projected record into a
///   typed struct, the usual place for value validation
///
/// # Examples
///
/// External callers cannot create `Verified<T>` directly:
///
/// ```compile_fail
/// use field_projector::Verified;
///
/// let verified = Verified::new(serde_json::Map::new());
/// ```
///
/// The usual way to get one:
///
/// ```
/// use field_projector::{Allowlist, FieldProjector, Sanitizer, Tainted};
/// use serde_json::json;
///
/// let projector = FieldProjector::new(Allowlist::new(["title"]));
/// let verified = projector.sanitize(Tainted::new(json!({"title": "Q3", "owner_id": 7})));
///
/// assert_eq!(verified.as_ref().get("title"), Some(&json!("Q3")));
/// assert!(verified.as_ref().get("owner_id").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Creates a `Verified<T>` without projecting anything.
    ///
    /// Only sanitizers call this, after the allowlist has been applied.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the `Verified<T>` and returns the projected value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl Verified<Map<String, Value>> {
    /// Deserializes the projected fields into a typed record.
    ///
    /// Projection does not check field values; this is where a call site
    /// enforces types and shapes.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the fields do not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_projector::{Allowlist, FieldProjector, Sanitizer, Tainted};
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct ClientUpdate {
    ///     name: String,
    /// }
    ///
    /// let projector = FieldProjector::new(Allowlist::new(["name"]));
    /// let verified = projector.sanitize(Tainted::new(json!({"name": "Acme", "tier": "gold"})));
    ///
    /// let update: ClientUpdate = verified.into_typed().expect("fits");
    /// assert_eq!(update.name, "Acme");
    /// ```
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.inner))
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
