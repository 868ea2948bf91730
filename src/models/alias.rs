//! Alias wire types for the SimpleLogin API.

use serde::{Deserialize, Serialize};

/// An upstream-managed alias record.
///
/// Owned by the provider; the bridge never deletes or disables an alias.
#[derive(Debug, Clone, Deserialize)]
pub struct Alias {
    /// Opaque provider identifier
    pub id: u64,

    /// Full alias address (local part + bridge domain)
    pub email: String,

    /// Whether the alias currently forwards mail
    #[serde(default)]
    pub enabled: bool,

    /// Display name attached to the alias
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text note tagging the alias as phone-derived
    #[serde(default)]
    pub note: Option<String>,
}

impl Alias {
    /// The local part of the alias address.
    pub fn local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Response wrapper for the alias list/search endpoint.
#[derive(Debug, Deserialize)]
pub struct AliasListResponse {
    /// Aliases on the requested page
    pub aliases: Vec<Alias>,
}

/// One entry of the alias options (suffix) endpoint.
///
/// Custom alias creation requires the provider-signed form of the domain
/// suffix, not the plain string.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedSuffix {
    /// Plain suffix, e.g. `@relaysms.me`
    pub suffix: String,

    /// Signed token the provider expects back on creation
    pub signed_suffix: String,
}

/// Response wrapper for the alias options endpoint.
#[derive(Debug, Deserialize)]
pub struct AliasOptionsResponse {
    /// Available suffixes for the requesting account
    #[serde(default)]
    pub suffixes: Vec<SignedSuffix>,
}

/// Request body for creating a custom alias.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAliasRequest {
    /// Local part of the new alias
    pub alias_prefix: String,

    /// Signed suffix obtained from the options endpoint
    pub signed_suffix: String,

    /// Mailboxes the alias forwards to
    pub mailbox_ids: Vec<u64>,

    /// Tagging note, used to recognize phone-derived aliases later
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
