//! Shared fakes for integration tests: an in-memory provider API and a
//! recording SMTP transport.

use sms_email_bridge::composer::OutboundMessage;
use sms_email_bridge::error::{BridgeError, BridgeResult};
use sms_email_bridge::models::{
    Alias, AliasContact, CreateAliasRequest, Mailbox, SignedSuffix,
};
use sms_email_bridge::transport::{MailTransport, SendReceipt};
use sms_email_bridge::AliasApi;
use std::sync::Mutex;

pub fn alias(id: u64, email: &str) -> Alias {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "email": email,
        "enabled": true
    }))
    .expect("valid alias json")
}

/// Call counters for asserting how often the provider was touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApiCalls {
    pub list: usize,
    pub create: usize,
    pub contact: usize,
}

/// In-memory stand-in for the SimpleLogin API.
///
/// Aliases live in a table keyed by full address; creating a taken address
/// reports a conflict, which lets tests drive the first-use race.
pub struct FakeAliasApi {
    aliases: Mutex<Vec<Alias>>,
    calls: Mutex<ApiCalls>,
    next_id: Mutex<u64>,
    /// While set, lookups see a stale (empty) directory and the next create
    /// conflicts after the "winner's" alias lands, simulating a lost race.
    race_pending: Mutex<bool>,
}

impl FakeAliasApi {
    pub fn new() -> Self {
        Self {
            aliases: Mutex::new(Vec::new()),
            calls: Mutex::new(ApiCalls::default()),
            next_id: Mutex::new(1),
            race_pending: Mutex::new(false),
        }
    }

    /// Make the next resolve lose the creation race: its find misses, its
    /// create conflicts, and only the re-find sees the winner's alias.
    pub fn begin_lost_race(&self) {
        *self.race_pending.lock().unwrap() = true;
    }

    pub fn with_alias(existing: Alias) -> Self {
        let api = Self::new();
        api.aliases.lock().unwrap().push(existing);
        api
    }

    pub fn calls(&self) -> ApiCalls {
        *self.calls.lock().unwrap()
    }

    fn insert(&self, email: &str) -> Alias {
        let mut id = self.next_id.lock().unwrap();
        let created = alias(*id, email);
        *id += 1;
        self.aliases.lock().unwrap().push(created.clone());
        created
    }
}

impl AliasApi for FakeAliasApi {
    fn list_aliases(&self, query: Option<&str>) -> BridgeResult<Vec<Alias>> {
        self.calls.lock().unwrap().list += 1;
        if *self.race_pending.lock().unwrap() {
            // Stale read: the winner's creation has not become visible yet.
            return Ok(Vec::new());
        }
        let aliases = self.aliases.lock().unwrap();
        Ok(aliases
            .iter()
            .filter(|a| query.map_or(true, |q| a.email.contains(q)))
            .cloned()
            .collect())
    }

    fn alias_options(&self, hostname: &str) -> BridgeResult<Option<SignedSuffix>> {
        Ok(Some(SignedSuffix {
            suffix: format!("@{}", hostname),
            signed_suffix: format!("signed:@{}", hostname),
        }))
    }

    fn create_alias(&self, request: &CreateAliasRequest) -> BridgeResult<Alias> {
        self.calls.lock().unwrap().create += 1;

        let domain = request
            .signed_suffix
            .trim_start_matches("signed:@")
            .to_string();
        let email = format!("{}@{}", request.alias_prefix, domain);

        let taken = {
            let aliases = self.aliases.lock().unwrap();
            aliases.iter().any(|a| a.email == email)
        };

        let mut race = self.race_pending.lock().unwrap();
        if taken || *race {
            if *race && !taken {
                // The winner's creation landed between our find and create.
                self.insert(&email);
            }
            *race = false;
            return Err(BridgeError::AliasCreationConflict(
                "alias already exists".to_string(),
            ));
        }

        Ok(self.insert(&email))
    }

    fn mailboxes(&self) -> BridgeResult<Vec<Mailbox>> {
        Ok(vec![Mailbox {
            id: 7,
            email: "operator@example.com".to_string(),
            default: true,
        }])
    }

    fn get_or_create_contact(&self, alias_id: u64, email: &str) -> BridgeResult<AliasContact> {
        self.calls.lock().unwrap().contact += 1;
        Ok(AliasContact {
            id: 100 + alias_id,
            contact: email.to_string(),
            reverse_alias: Some(format!("\"{}\" <ra+{}@sl.local>", email, alias_id)),
            reverse_alias_address: format!("ra+{}@sl.local", alias_id),
            existed: false,
        })
    }
}

/// Transport that records what would have been sent.
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl MailTransport for RecordingTransport {
    fn send(&self, message: &OutboundMessage) -> BridgeResult<SendReceipt> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(SendReceipt {
            message_id: Some("250 OK queued".to_string()),
        })
    }
}

/// Transport that always fails, for error-propagation tests.
pub struct FailingTransport {
    pub error: fn() -> BridgeError,
}

impl MailTransport for FailingTransport {
    fn send(&self, _message: &OutboundMessage) -> BridgeResult<SendReceipt> {
        Err((self.error)())
    }
}
