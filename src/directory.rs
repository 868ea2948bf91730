//! Alias directory: lookup and idempotent creation of phone-derived aliases.
//!
//! The upstream provider is the only source of truth for alias existence.
//! Nothing is cached across calls, and a creation conflict is treated as a
//! concurrency signal rather than a failure: whoever loses the race
//! re-reads the directory and adopts the winner's alias.

use crate::client::AliasApi;
use crate::domain::{EmailAddress, PhoneNumber};
use crate::error::{BridgeError, BridgeResult};
use crate::models::{Alias, CreateAliasRequest};
use std::sync::Arc;

/// Outcome of resolving an alias for a phone number.
#[derive(Debug, Clone)]
pub enum AliasResolution {
    /// The alias was created by this call
    Created(Alias),

    /// The alias already existed upstream
    Existing(Alias),
}

impl AliasResolution {
    /// The resolved alias, however it was obtained.
    pub fn alias(&self) -> &Alias {
        match self {
            Self::Created(alias) | Self::Existing(alias) => alias,
        }
    }

    /// Whether this call created the alias.
    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Consume the resolution, yielding the alias.
    pub fn into_alias(self) -> Alias {
        match self {
            Self::Created(alias) | Self::Existing(alias) => alias,
        }
    }
}

/// Directory of phone-derived aliases on the upstream provider.
pub struct AliasDirectory {
    api: Arc<dyn AliasApi>,

    /// Operator mailbox the aliases forward to
    primary_email: EmailAddress,

    /// Domain under which phone-derived aliases live
    primary_domain: String,
}

impl AliasDirectory {
    /// Create a directory over the given provider API.
    pub fn new(api: Arc<dyn AliasApi>, primary_email: EmailAddress, primary_domain: String) -> Self {
        Self {
            api,
            primary_email,
            primary_domain,
        }
    }

    /// The full alias address expected for a phone number.
    fn expected_address(&self, phone: &PhoneNumber) -> String {
        phone.local_part().address_in(&self.primary_domain)
    }

    /// Look up the alias for a phone number, if one exists.
    ///
    /// The provider's search also matches notes and substrings, so results
    /// are disambiguated by exact full-address equality.
    pub fn find_by_phone_number(&self, phone: &PhoneNumber) -> BridgeResult<Option<Alias>> {
        let expected = self.expected_address(phone);
        let aliases = self.api.list_aliases(Some(&expected))?;

        let alias = aliases.into_iter().find(|a| a.email == expected);
        match &alias {
            Some(a) => tracing::debug!(alias = %a.email, id = a.id, "Found existing alias"),
            None => tracing::debug!(address = %expected, "No alias found"),
        }

        Ok(alias)
    }

    /// Create the alias for a phone number.
    ///
    /// Propagates `BridgeError::AliasCreationConflict` when another caller
    /// won the creation race; `resolve_or_create` handles the recovery.
    pub fn create_for_phone_number(&self, phone: &PhoneNumber) -> BridgeResult<Alias> {
        let local_part = phone.local_part();

        let suffix = self
            .api
            .alias_options(&self.primary_domain)?
            .ok_or_else(|| BridgeError::ProviderRejected {
                status: 400,
                message: format!("no alias suffix available for {}", self.primary_domain),
            })?;

        let mailbox = self
            .api
            .mailboxes()?
            .into_iter()
            .find(|m| m.email == self.primary_email.as_str())
            .ok_or_else(|| BridgeError::ProviderRejected {
                status: 400,
                message: format!("primary mailbox {} not registered", self.primary_email),
            })?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
        let request = CreateAliasRequest {
            alias_prefix: local_part.as_str().to_string(),
            signed_suffix: suffix.signed_suffix,
            mailbox_ids: vec![mailbox.id],
            note: Some(format!("Created by RelaySMS email bridge at {}.", timestamp)),
            name: Some(format!("{} via RelaySMS", local_part)),
        };

        self.api.create_alias(&request)
    }

    /// Resolve the alias for a phone number, creating it on first use.
    ///
    /// Repeated calls for the same number, sequential or racing, converge
    /// on one alias: a creation conflict triggers a single re-lookup and
    /// the existing alias is returned instead.
    pub fn resolve_or_create(&self, phone: &PhoneNumber) -> BridgeResult<AliasResolution> {
        if let Some(alias) = self.find_by_phone_number(phone)? {
            return Ok(AliasResolution::Existing(alias));
        }

        match self.create_for_phone_number(phone) {
            Ok(alias) => Ok(AliasResolution::Created(alias)),
            Err(BridgeError::AliasCreationConflict(detail)) => {
                tracing::info!(
                    phone = %phone,
                    "Alias creation raced, re-reading directory"
                );
                match self.find_by_phone_number(phone)? {
                    Some(alias) => Ok(AliasResolution::Existing(alias)),
                    // Conflict without a findable alias: surface it.
                    None => Err(BridgeError::AliasCreationConflict(detail)),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Obtain the reverse-alias address for a recipient of the given alias.
    ///
    /// Replies addressed here are routed back through the provider to the
    /// operator mailbox; the recipient never sees that mailbox.
    pub fn reverse_address(
        &self,
        alias: &Alias,
        recipient: &EmailAddress,
    ) -> BridgeResult<EmailAddress> {
        let contact = self
            .api
            .get_or_create_contact(alias.id, recipient.as_str())?;

        let reverse = EmailAddress::new(contact.reverse_alias_address)?;
        if reverse == self.primary_email {
            return Err(BridgeError::ProviderRejected {
                status: 400,
                message: "provider returned the operator mailbox as reverse alias".to_string(),
            });
        }

        Ok(reverse)
    }
}
