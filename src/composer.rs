//! Relay composer: builds the outbound message envelope.
//!
//! The composed message presents the phone-derived alias as the sender and
//! carries the provider's reverse-alias address in `Reply-To`, so replies
//! travel back through the provider. The operator's real mailbox appears
//! nowhere in the message.

use crate::domain::EmailAddress;
use crate::error::{BridgeError, BridgeResult};
use crate::models::Alias;
use lettre::message::Mailbox;
use lettre::Message;

/// Validated recipient lists for one outbound message.
#[derive(Debug, Clone)]
pub struct Recipients {
    pub to: Vec<EmailAddress>,
    pub cc: Vec<EmailAddress>,
    pub bcc: Vec<EmailAddress>,
}

impl Recipients {
    /// Validate raw to/cc/bcc entries, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidAddress` if `to` is empty or any entry
    /// is malformed. No partial result is produced, so callers can run
    /// this before touching the network.
    pub fn parse<S: AsRef<str>>(to: &[S], cc: &[S], bcc: &[S]) -> BridgeResult<Self> {
        if to.is_empty() {
            return Err(BridgeError::InvalidAddress(
                "at least one recipient is required".to_string(),
            ));
        }

        let parse_all = |entries: &[S]| -> BridgeResult<Vec<EmailAddress>> {
            entries
                .iter()
                .map(|e| EmailAddress::new(e.as_ref()))
                .collect()
        };

        Ok(Self {
            to: parse_all(to)?,
            cc: parse_all(cc)?,
            bcc: parse_all(bcc)?,
        })
    }

    /// The primary recipient (first `to` entry).
    pub fn primary(&self) -> &EmailAddress {
        // `parse` rejects an empty `to` list.
        &self.to[0]
    }
}

/// A fully composed outbound message, ready for the SMTP transport.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    /// Visible sender: always the alias address
    pub sender: EmailAddress,

    /// Reply routing: the provider-assigned reverse alias
    pub reply_to: EmailAddress,

    pub to: Vec<EmailAddress>,
    pub cc: Vec<EmailAddress>,
    pub bcc: Vec<EmailAddress>,
    pub subject: String,
    pub body: String,
}

impl OutboundMessage {
    /// Render the message as a MIME document for submission.
    pub fn to_mime(&self) -> BridgeResult<Message> {
        let mut builder = Message::builder()
            .from(parse_mailbox(&self.sender)?)
            .reply_to(parse_mailbox(&self.reply_to)?)
            .subject(self.subject.clone());

        for to in &self.to {
            builder = builder.to(parse_mailbox(to)?);
        }
        for cc in &self.cc {
            builder = builder.cc(parse_mailbox(cc)?);
        }
        for bcc in &self.bcc {
            builder = builder.bcc(parse_mailbox(bcc)?);
        }

        builder
            .body(self.body.clone())
            .map_err(|e| BridgeError::ComposeFailed(e.to_string()))
    }
}

fn parse_mailbox(address: &EmailAddress) -> BridgeResult<Mailbox> {
    // Addresses were validated up front; a parse failure here means lettre
    // disagrees on shape and the message must not go out half-formed.
    address
        .as_str()
        .parse()
        .map_err(|_| BridgeError::InvalidAddress(address.as_str().to_string()))
}

/// Compose the outbound message for a resolved alias.
///
/// The visible sender is the alias address, never the operator mailbox;
/// `reverse_address` is the provider-assigned reverse alias for the
/// primary recipient.
pub fn compose(
    alias: &Alias,
    reverse_address: EmailAddress,
    recipients: Recipients,
    subject: impl Into<String>,
    body: impl Into<String>,
) -> BridgeResult<OutboundMessage> {
    let sender = EmailAddress::new(alias.email.clone())?;

    Ok(OutboundMessage {
        sender,
        reply_to: reverse_address,
        to: recipients.to,
        cc: recipients.cc,
        bcc: recipients.bcc,
        subject: subject.into(),
        body: body.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias() -> Alias {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "email": "237123456789@relaysms.me",
            "enabled": true
        }))
        .unwrap()
    }

    fn reverse() -> EmailAddress {
        EmailAddress::new("ra+token@sl.local").unwrap()
    }

    #[test]
    fn test_recipients_parse_rejects_empty_to() {
        let none: [&str; 0] = [];
        let result = Recipients::parse(&none, &none, &none);
        assert!(matches!(result, Err(BridgeError::InvalidAddress(_))));
    }

    #[test]
    fn test_recipients_parse_all_or_nothing() {
        let result = Recipients::parse(
            &["recipient@example.com"],
            &["not-an-email"],
            &[] as &[&str],
        );
        match result {
            Err(BridgeError::InvalidAddress(s)) => assert_eq!(s, "not-an-email"),
            other => panic!("Expected InvalidAddress, got: {:?}", other),
        }
    }

    #[test]
    fn test_compose_sender_is_alias() {
        let recipients = Recipients::parse(
            &["recipient@example.com"],
            &["cc@example.com"],
            &["bcc@example.com"],
        )
        .unwrap();

        let message = compose(&alias(), reverse(), recipients, "Hello", "Body").unwrap();

        assert_eq!(message.sender.as_str(), "237123456789@relaysms.me");
        assert_eq!(message.reply_to.as_str(), "ra+token@sl.local");
        assert_eq!(message.to[0].as_str(), "recipient@example.com");
        assert_eq!(message.subject, "Hello");
    }

    #[test]
    fn test_mime_rendering_carries_alias_identity() {
        let recipients =
            Recipients::parse(&["recipient@example.com"], &[] as &[&str], &[] as &[&str]).unwrap();
        let message = compose(&alias(), reverse(), recipients, "Hello", "Body text").unwrap();

        let mime = message.to_mime().unwrap();
        let rendered = String::from_utf8(mime.formatted()).unwrap();

        assert!(rendered.contains("From: 237123456789@relaysms.me"));
        assert!(rendered.contains("Reply-To: ra+token@sl.local"));
        assert!(rendered.contains("To: recipient@example.com"));
        assert!(rendered.contains("Subject: Hello"));
        // The operator mailbox must not leak into any header.
        assert!(!rendered.contains("operator@example.com"));
    }
}
