use std::fmt;

use serde_json::Value;

/// A wrapper for a caller-supplied payload that has not been projected yet.
///
/// `Tainted<T>` marks data that crossed a trust boundary (request bodies,
/// form submissions, webhook payloads). The inner value cannot be read from
/// outside this crate; the only way out is a [`Sanitizer`](crate::Sanitizer),
/// which yields a [`Verified`](crate::Verified) value.
///
/// # Security Properties
///
/// - Does NOT implement `Deref` or any implicit conversion traits
/// - Inner value is inaccessible without sanitization
/// - Keeps over-posted fields from reaching persistence or authorization code
///
/// # Examples
///
/// ```
/// use field_projector::Tainted;
/// use serde_json::json;
///
/// let body = Tainted::new(json!({"name": "Ada", "is_admin": true}));
///
/// // Debug output shows it's tainted (for development)
/// println!("{:?}", body);
///
/// // But the payload cannot be used directly:
/// // let name = body["name"]; // Won't compile!
/// ```
// BREAKING CHANGE WARNING: Do NOT remove Clone - the same payload may be projected for several endpoints.
#[derive(Clone)]
pub struct Tainted<T> {
    // BREAKING CHANGE WARNING: This field MUST remain private.
    // Making it public lets over-posted fields skip projection (CWE-915).
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value in `Tainted`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Borrows the inner value for projection.
    ///
    /// `pub(crate)`: only sanitizers in this crate may look inside.
    pub(crate) fn peek(&self) -> &T {
        &self.inner
    }

    /// Extracts the inner value for projection.
    ///
    /// BREAKING CHANGE WARNING: Changing visibility to `pub` lets callers read
    /// raw payloads without an allowlist, reopening mass-assignment.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

impl Tainted<Value> {
    /// Parses a raw request body into a tainted JSON payload.
    ///
    /// A body that is not valid JSON becomes `null`, which projects to an
    /// empty record. Parsing never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_projector::{Allowlist, FieldProjector, Sanitizer, Tainted};
    ///
    /// let projector = FieldProjector::new(Allowlist::new(["name"]));
    ///
    /// let body = Tainted::from_json_slice(br#"{"name": "Ada", "role": "owner"}"#);
    /// assert_eq!(projector.sanitize(body).as_ref().len(), 1);
    ///
    /// let garbage = Tainted::from_json_slice(b"{not json");
    /// assert!(projector.sanitize(garbage).as_ref().is_empty());
    /// ```
    pub fn from_json_slice(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => Self::new(value),
            Err(err) => {
                tracing::debug!(
                    line = err.line(),
                    column = err.column(),
                    "payload is not valid JSON; treating as null"
                );
                Self::new(Value::Null)
            }
        }
    }
}

// BREAKING CHANGE WARNING: Do NOT add Deref, AsRef, Borrow, From<T>, Into<T>, or any other
// implicit conversion traits to Tainted<T>. They would let unprojected payloads flow
// straight into persistence or authorization code.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
