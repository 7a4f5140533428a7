//! Allowlist field projection for untrusted records.
//!
//! This crate blocks mass-assignment and over-posting by reducing a
//! caller-supplied record to the fields an endpoint explicitly accepts:
//! - **Projection**: keep only allowlisted fields that the record defines directly
//! - **Fail closed**: malformed records or allowlists let nothing through, and nothing errors
//! - **Trust boundary**: `Tainted` payloads become `Verified` records only through a projector
//!
//! # Core Types
//!
//! - [`Allowlist`]: Ordered, duplicate-free set of permitted field names
//! - [`project`]: Borrowing projection of a record onto an allowlist
//! - [`Tainted<T>`]: Wrapper for caller-supplied payloads
//! - [`Verified<T>`]: Projected payload, safe for trust-sensitive code
//! - [`FieldProjector`]: [`Sanitizer`] applying one allowlist
//! - [`PolicySet`]: Per-endpoint allowlists grouped by [`CapabilityGroup`]
//!
//! # Examples
//!
//! ```
//! use field_projector::{project_value, Allowlist, FieldProjector, Sanitizer, Tainted};
//! use serde_json::json;
//!
//! // Plain projection
//! let record = json!({"a": 1, "b": 2, "c": 3});
//! assert_eq!(project_value(&record, &json!(["a", "c"])), json!({"a": 1, "c": 3}));
//!
//! // At a trust boundary
//! let projector = FieldProjector::new(Allowlist::new(["display_name"]));
//! let payload = Tainted::new(json!({"display_name": "Ada", "is_admin": true}));
//! let verified = projector.sanitize(payload);
//! assert!(!verified.as_ref().contains_key("is_admin"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allowlist;
mod error;
mod policy;
mod policy_set;
mod projector;
mod record;
mod sanitizer;
mod tainted;
#[cfg(test)]
mod test_utils;
mod verified;

pub use allowlist::Allowlist;
pub use error::{ConfigError, ConfigErrorKind, Error};
pub use policy::{CapabilityGroup, EndpointPolicy};
pub use policy_set::{PolicySet, PolicySetBuilder};
pub use projector::{project, project_opt, project_owned, project_value, Projection};
pub use record::RecordKind;
pub use sanitizer::{FieldProjector, Sanitizer};
pub use tainted::Tainted;
pub use verified::Verified;
