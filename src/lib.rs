//! SMS email bridge: send email on behalf of a phone number through a
//! SimpleLogin alias.
//!
//! A phone number maps deterministically to an alias address under the
//! bridge domain. On first use the alias is created upstream; afterwards it
//! is looked up, so repeated and even racing sends converge on one alias
//! per number. Outbound mail presents the alias as the sender and routes
//! replies back through the provider's reverse-alias mechanism.
//!
//! # Architecture
//!
//! - **domain**: phone number / alias local part codec and email validation
//! - **models**: SimpleLogin wire types
//! - **client**: HTTP client for the SimpleLogin API
//! - **directory**: idempotent alias lookup-or-create
//! - **composer**: outbound message assembly
//! - **transport**: SMTP submission
//! - **service**: the `send_email` orchestration pipeline
//! - **config** / **error**: environment configuration and error taxonomy

pub mod client;
pub mod composer;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod models;
pub mod service;
pub mod transport;

pub use client::{AliasApi, SimpleLoginClient};
pub use composer::{compose, OutboundMessage, Recipients};
pub use config::Config;
pub use directory::{AliasDirectory, AliasResolution};
pub use domain::{AliasLocalPart, EmailAddress, PhoneNumber};
pub use error::{BridgeError, BridgeResult, ConfigError, ConfigResult};
pub use models::{Alias, AliasContact, Mailbox, SignedSuffix};
pub use service::{BridgeService, MessageReceipt, SendEmailRequest};
pub use transport::{MailTransport, SendReceipt, SmtpMailTransport};
