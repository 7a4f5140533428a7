use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Allowlist;

/// A backend service area whose endpoints accept caller-supplied payloads.
///
/// Every endpoint policy belongs to exactly one group, which lets services
/// list and audit the allowlists they own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityGroup {
    /// Sign-in, sign-up, and credential management
    Auth,
    /// Workspace creation and settings
    Workspaces,
    /// Client records
    Clients,
    /// Conversations and messages
    Chat,
    /// Activity logging
    Activity,
    /// Document management
    Documents,
    /// Support requests
    Support,
}

impl CapabilityGroup {
    /// Every capability group, in declaration order.
    pub const ALL: [CapabilityGroup; 7] = [
        CapabilityGroup::Auth,
        CapabilityGroup::Workspaces,
        CapabilityGroup::Clients,
        CapabilityGroup::Chat,
        CapabilityGroup::Activity,
        CapabilityGroup::Documents,
        CapabilityGroup::Support,
    ];

    /// Returns the lowercase name used in configuration documents.
    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityGroup::Auth => "auth",
            CapabilityGroup::Workspaces => "workspaces",
            CapabilityGroup::Clients => "clients",
            CapabilityGroup::Chat => "chat",
            CapabilityGroup::Activity => "activity",
            CapabilityGroup::Documents => "documents",
            CapabilityGroup::Support => "support",
        }
    }
}

impl fmt::Display for CapabilityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The allowlist that applies to one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointPolicy {
    /// The service area the endpoint belongs to
    pub group: CapabilityGroup,
    /// Field names the endpoint accepts from callers
    pub fields: Allowlist,
}

impl EndpointPolicy {
    /// Creates a policy for an endpoint in `group`.
    pub fn new(group: CapabilityGroup, fields: Allowlist) -> Self {
        Self { group, fields }
    }
}
