//! SMTP transport for composed messages.

use crate::composer::OutboundMessage;
use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use std::time::Duration;

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Server-assigned identifier from the reply line, when present
    pub message_id: Option<String>,
}

/// Transport seam: accepts a composed message and performs the send.
///
/// Tests substitute a recording implementation; production uses
/// `SmtpMailTransport`.
pub trait MailTransport: Send + Sync {
    /// Submit the message. Exactly one attempt; retries are the caller's
    /// decision.
    fn send(&self, message: &OutboundMessage) -> BridgeResult<SendReceipt>;
}

/// SMTP submission via lettre's blocking transport.
pub struct SmtpMailTransport {
    transport: SmtpTransport,
}

impl SmtpMailTransport {
    /// Build a transport from configuration.
    ///
    /// With `smtp_tls` set the connection is upgraded via STARTTLS;
    /// otherwise it stays plaintext (local relays, tests).
    pub fn new(config: &Config) -> BridgeResult<Self> {
        let builder = if config.smtp_tls {
            SmtpTransport::starttls_relay(&config.smtp_host)
                .map_err(|e| BridgeError::TransportUnavailable(e.to_string()))?
        } else {
            SmtpTransport::builder_dangerous(&config.smtp_host)
        };

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let transport = builder
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.request_timeout)))
            .build();

        Ok(Self { transport })
    }
}

impl MailTransport for SmtpMailTransport {
    fn send(&self, message: &OutboundMessage) -> BridgeResult<SendReceipt> {
        let mime = message.to_mime()?;

        let response = self.transport.send(&mime).map_err(map_smtp_error)?;

        let reply: Vec<&str> = response.message().collect();
        let message_id = if reply.is_empty() {
            None
        } else {
            Some(reply.join(" "))
        };

        tracing::info!(
            sender = %message.sender,
            recipients = message.to.len() + message.cc.len() + message.bcc.len(),
            "Message submitted"
        );

        Ok(SendReceipt { message_id })
    }
}

/// Classify an SMTP failure.
///
/// Permanent (5xx) rejections are terminal; transient codes, connection
/// and timeout failures are left to the caller to retry.
fn map_smtp_error(error: lettre::transport::smtp::Error) -> BridgeError {
    if error.is_permanent() {
        BridgeError::TransportRejected(error.to_string())
    } else {
        BridgeError::TransportUnavailable(error.to_string())
    }
}
