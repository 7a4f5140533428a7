use serde_json::{Map, Value};

use crate::{project, project_owned, Allowlist, Tainted, Verified};

/// Trait for turning tainted payloads into verified ones.
///
/// Sanitizers are total: malformed or hostile input produces a smaller
/// verified value (often an empty one), never an error. Callers that need to
/// react to "nothing useful was sent" inspect the output.
///
/// # Invariants
///
/// Implementations MUST:
/// - Apply their policy to the input before wrapping the result
/// - Only call `Verified::new_unchecked` on the policy's output
/// - Produce less data, never more, when the input is malformed
/// - Not panic on any input
pub trait Sanitizer<T> {
    /// The verified representation produced from `T`.
    type Output;

    /// Applies the policy to a tainted value.
    fn sanitize(&self, input: Tainted<T>) -> Verified<Self::Output>;
}

/// A sanitizer that projects JSON payloads onto a fixed allowlist.
///
/// # Examples
///
/// ```
/// use field_projector::{Allowlist, FieldProjector, Sanitizer, Tainted};
/// use serde_json::json;
///
/// let projector = FieldProjector::new(Allowlist::new(["name", "email"]));
/// let payload = Tainted::new(json!({
///     "name": "Ada",
///     "email": "ada@example.com",
///     "is_admin": true,
/// }));
///
/// let verified = projector.sanitize(payload);
/// assert_eq!(verified.as_ref().len(), 2);
/// assert!(!verified.as_ref().contains_key("is_admin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldProjector {
    allowlist: Allowlist,
}

impl FieldProjector {
    /// Creates a projector for the given allowlist.
    pub fn new(allowlist: Allowlist) -> Self {
        Self { allowlist }
    }

    /// Returns the allowlist this projector applies.
    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    /// Projects a tainted payload by reference, leaving it usable afterwards.
    pub fn sanitize_ref(&self, input: &Tainted<Value>) -> Verified<Map<String, Value>> {
        Verified::new_unchecked(project(input.peek(), &self.allowlist).to_map())
    }
}

impl Sanitizer<Value> for FieldProjector {
    type Output = Map<String, Value>;

    fn sanitize(&self, input: Tainted<Value>) -> Verified<Map<String, Value>> {
        Verified::new_unchecked(project_owned(input.into_inner(), &self.allowlist))
    }
}
