//! Bridge service: the public entry point of the relay pipeline.
//!
//! One invocation runs `validate → resolve alias → compose → send` with no
//! state kept between invocations. Validation happens before any network
//! call, and the only internal recovery is the alias directory's single
//! re-lookup on a creation conflict.

use crate::composer::{compose, Recipients};
use crate::directory::AliasDirectory;
use crate::domain::PhoneNumber;
use crate::error::BridgeResult;
use crate::transport::MailTransport;
use std::sync::Arc;

/// Parameters for one outbound send.
#[derive(Debug, Clone)]
pub struct SendEmailRequest {
    /// Sender identity: phone number in international format
    pub phone_number: String,

    /// Recipients; must not be empty
    pub to: Vec<String>,

    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Receipt returned after a successful dispatch.
#[derive(Debug, Clone)]
pub struct MessageReceipt {
    /// The alias address the message was sent under
    pub alias_address: String,

    /// Whether this send created the alias
    pub alias_created: bool,

    /// Transport-assigned identifier, when the server reported one
    pub message_id: Option<String>,
}

/// Orchestrates alias resolution, composition and dispatch.
pub struct BridgeService {
    directory: AliasDirectory,
    transport: Arc<dyn MailTransport>,
}

impl BridgeService {
    /// Create a new bridge service.
    pub fn new(directory: AliasDirectory, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            directory,
            transport,
        }
    }

    /// Send an email on behalf of a phone number.
    ///
    /// Fails fast on a malformed phone number or recipient address with
    /// zero network calls made. Any later failure aborts the whole call:
    /// no message is sent and no half-configured alias is left behind
    /// (creation either succeeds upstream or the existing alias found by
    /// re-lookup is used).
    pub fn send_email(&self, request: &SendEmailRequest) -> BridgeResult<MessageReceipt> {
        // Local validation first; malformed input never costs a round-trip.
        let phone = PhoneNumber::new(&request.phone_number)?;
        let recipients = Recipients::parse(&request.to, &request.cc, &request.bcc)?;

        tracing::info!(phone = %phone, recipients = recipients.to.len(), "Relaying message");

        let resolution = self.directory.resolve_or_create(&phone)?;
        let alias_created = resolution.was_created();
        let alias = resolution.into_alias();

        let reverse = self.directory.reverse_address(&alias, recipients.primary())?;

        let message = compose(
            &alias,
            reverse,
            recipients,
            request.subject.clone(),
            request.body.clone(),
        )?;

        // Single attempt; retrying is the caller's decision.
        let receipt = self.transport.send(&message)?;

        tracing::info!(alias = %alias.email, created = alias_created, "Message relayed");

        Ok(MessageReceipt {
            alias_address: alias.email,
            alias_created,
            message_id: receipt.message_id,
        })
    }
}
