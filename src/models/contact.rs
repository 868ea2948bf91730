//! Alias contact wire types for the SimpleLogin API.
//!
//! A contact is the provider's pairing of an alias with one correspondent.
//! Creating it yields the reverse-alias address: mail involving that
//! address is routed through the provider, so replies reach the operator
//! mailbox while the correspondent only ever sees the alias.

use serde::{Deserialize, Serialize};

/// A provider contact attached to an alias.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasContact {
    /// Provider identifier
    pub id: u64,

    /// The correspondent's real address as registered
    pub contact: String,

    /// Reverse alias in display form, e.g. `"name" <ra+token@sl.local>`
    #[serde(default)]
    pub reverse_alias: Option<String>,

    /// Reverse alias as a bare address, e.g. `ra+token@sl.local`
    pub reverse_alias_address: String,

    /// True when the contact already existed and was returned as-is
    #[serde(default)]
    pub existed: bool,
}

/// Request body for creating a contact on an alias.
#[derive(Debug, Clone, Serialize)]
pub struct CreateContactRequest {
    /// Correspondent address in angle-bracket form
    pub contact: String,
}

impl CreateContactRequest {
    /// Build a request for the given correspondent address.
    pub fn new(email: &str) -> Self {
        Self {
            contact: format!("<{}>", email),
        }
    }
}
