use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::{ConfigError, ConfigErrorKind, Error},
    policy::{CapabilityGroup, EndpointPolicy},
    project_owned, Allowlist, Tainted, Verified,
};

static EMPTY_ALLOWLIST: Allowlist = Allowlist::empty();

/// Per-endpoint allowlists for a backend service boundary.
///
/// A `PolicySet` is immutable once built. Unknown endpoints resolve to an
/// empty allowlist, so a missing policy lets nothing through.
///
/// # Examples
///
/// ```
/// use field_projector::{CapabilityGroup, PolicySet, Tainted};
/// use serde_json::json;
///
/// let policies = PolicySet::builder()
///     .endpoint("clients.update", CapabilityGroup::Clients, ["name", "email"])
///     .build()
///     .expect("valid policies");
///
/// let payload = Tainted::new(json!({"name": "Acme", "owner_id": 1}));
/// let verified = policies.project("clients.update", payload);
///
/// assert_eq!(verified.as_ref().len(), 1);
/// assert!(!verified.as_ref().contains_key("owner_id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySet {
    endpoints: BTreeMap<String, EndpointPolicy>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    endpoints: BTreeMap<String, EndpointPolicy>,
}

impl PolicySet {
    /// Starts building a policy set in code.
    pub fn builder() -> PolicySetBuilder {
        PolicySetBuilder::default()
    }

    /// Loads a policy set from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not valid policy JSON, or
    /// if it names an empty endpoint or an empty field.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_projector::PolicySet;
    ///
    /// let policies = PolicySet::from_json_str(r#"{
    ///     "endpoints": {
    ///         "documents.rename": { "group": "documents", "fields": ["title"] }
    ///     }
    /// }"#).expect("valid document");
    ///
    /// assert!(policies.allowlist("documents.rename").contains("title"));
    /// ```
    pub fn from_json_str(document: &str) -> Result<Self, Error> {
        let document: PolicyDocument = serde_json::from_str(document).map_err(|e| {
            ConfigError::new(
                ConfigErrorKind::Parse,
                format!("invalid policy document at line {} column {}", e.line(), e.column()),
            )
        })?;

        let mut builder = PolicySetBuilder::default();
        for (name, policy) in document.endpoints {
            builder = builder.policy(name, policy);
        }
        let set = builder.build()?;

        tracing::info!(endpoints = set.len(), "loaded endpoint policies");
        Ok(set)
    }

    /// Loads a policy set from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or fails
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|e| {
            ConfigError::new(
                ConfigErrorKind::Io,
                format!("read {} failed: {e}", path.display()),
            )
        })?;
        Self::from_json_str(&document)
    }

    /// Returns the policy for `endpoint`, if one is declared.
    pub fn policy(&self, endpoint: &str) -> Option<&EndpointPolicy> {
        self.endpoints.get(endpoint)
    }

    /// Returns the allowlist for `endpoint`.
    ///
    /// Undeclared endpoints get an empty allowlist.
    pub fn allowlist(&self, endpoint: &str) -> &Allowlist {
        self.policy(endpoint)
            .map(|p| &p.fields)
            .unwrap_or(&EMPTY_ALLOWLIST)
    }

    /// Lists the endpoints that belong to `group`, sorted by name.
    pub fn endpoints_in(&self, group: CapabilityGroup) -> Vec<&str> {
        self.endpoints
            .iter()
            .filter(|(_, p)| p.group == group)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns the number of declared endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns `true` if no endpoint is declared.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Projects a caller-supplied payload for `endpoint`.
    ///
    /// This is the step a service runs before merging a payload into, or
    /// authorizing against, an internal record. An undeclared endpoint yields
    /// an empty record.
    pub fn project(&self, endpoint: &str, payload: Tainted<Value>) -> Verified<Map<String, Value>> {
        let Some(policy) = self.policy(endpoint) else {
            tracing::warn!(endpoint, "no field policy declared for endpoint; dropping payload");
            return Verified::new_unchecked(Map::new());
        };

        let record = payload.into_inner();
        let total = record.as_object().map_or(0, Map::len);
        let fields = project_owned(record, &policy.fields);
        tracing::debug!(
            endpoint,
            group = %policy.group,
            kept = fields.len(),
            dropped = total - fields.len(),
            "projected payload for endpoint"
        );
        Verified::new_unchecked(fields)
    }
}

/// Builder for [`PolicySet`].
///
/// Declaring the same endpoint twice keeps the last declaration.
#[derive(Debug, Default)]
pub struct PolicySetBuilder {
    endpoints: BTreeMap<String, EndpointPolicy>,
}

impl PolicySetBuilder {
    /// Declares the allowlist for an endpoint.
    pub fn endpoint<I, S>(self, name: impl Into<String>, group: CapabilityGroup, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy(name, EndpointPolicy::new(group, Allowlist::new(fields)))
    }

    /// Declares an endpoint from a prepared policy.
    pub fn policy(mut self, name: impl Into<String>, policy: EndpointPolicy) -> Self {
        self.endpoints.insert(name.into(), policy);
        self
    }

    /// Validates the declarations and builds the set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for the first blank endpoint name or empty
    /// field name found.
    pub fn build(self) -> Result<PolicySet, ConfigError> {
        for (name, policy) in &self.endpoints {
            validate_endpoint(name, policy)?;
        }
        Ok(PolicySet {
            endpoints: self.endpoints,
        })
    }
}

fn validate_endpoint(name: &str, policy: &EndpointPolicy) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::new(
            ConfigErrorKind::EmptyEndpoint,
            format!("endpoint in group '{}' has a blank name", policy.group),
        ));
    }
    if let Some(position) = policy.fields.keys().position(str::is_empty) {
        return Err(ConfigError::new(
            ConfigErrorKind::EmptyField,
            format!("endpoint '{name}' has an empty field name at position {position}"),
        ));
    }
    Ok(())
}
