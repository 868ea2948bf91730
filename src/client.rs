//! HTTP client for the SimpleLogin aliasing API.
//!
//! The bridge pipeline is a short synchronous chain of at most a handful of
//! network calls, so the client uses `ureq` directly with a bounded
//! per-request timeout. Endpoints follow the official SimpleLogin API
//! (<https://github.com/simple-login/app/blob/master/docs/api.md>).

use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use crate::models::{
    Alias, AliasContact, AliasListResponse, AliasOptionsResponse, CreateAliasRequest,
    CreateContactRequest, Mailbox, MailboxListResponse, SignedSuffix,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Operations the alias directory needs from the provider.
///
/// `SimpleLoginClient` is the production implementation; tests substitute
/// in-memory fakes to exercise the conflict and idempotence paths without
/// a network.
pub trait AliasApi: Send + Sync {
    /// List enabled aliases, optionally filtered by a search query.
    ///
    /// The provider matches the query against alias addresses and notes.
    fn list_aliases(&self, query: Option<&str>) -> BridgeResult<Vec<Alias>>;

    /// Fetch the signed suffix for the given hostname, if the account may
    /// create aliases under it.
    fn alias_options(&self, hostname: &str) -> BridgeResult<Option<SignedSuffix>>;

    /// Create a custom alias.
    ///
    /// Returns `BridgeError::AliasCreationConflict` when the provider
    /// reports the local part as already taken.
    fn create_alias(&self, request: &CreateAliasRequest) -> BridgeResult<Alias>;

    /// List all mailboxes on the account.
    fn mailboxes(&self) -> BridgeResult<Vec<Mailbox>>;

    /// Retrieve or create the contact pairing an alias with a
    /// correspondent, yielding the reverse-alias address.
    fn get_or_create_contact(&self, alias_id: u64, email: &str) -> BridgeResult<AliasContact>;
}

/// HTTP client for the SimpleLogin API.
#[derive(Clone)]
pub struct SimpleLoginClient {
    /// Base URL for the API
    base_url: String,

    /// API key, sent in the `Authentication` header
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl SimpleLoginClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_base_url_and_timeout(
            config.api_base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::with_base_url_and_timeout(base_url, api_key, Duration::from_secs(10))
    }

    fn with_base_url_and_timeout(base_url: String, api_key: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute an authenticated GET request and decode the JSON response.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> BridgeResult<T> {
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .set("Authentication", &self.api_key)
            .call()
            .map_err(map_error)?;

        read_json(response)
    }

    /// Execute an authenticated POST request with a JSON body and decode
    /// the JSON response.
    fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> BridgeResult<T> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .set("Authentication", &self.api_key)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(map_error)?;

        read_json(response)
    }
}

impl AliasApi for SimpleLoginClient {
    fn list_aliases(&self, query: Option<&str>) -> BridgeResult<Vec<Alias>> {
        let mut body = serde_json::Map::new();
        if let Some(q) = query {
            body.insert("query".to_string(), serde_json::Value::from(q));
        }

        let response: AliasListResponse =
            self.post_json("/v2/aliases?page_id=0&enabled", &body.into())?;

        tracing::debug!(count = response.aliases.len(), "Fetched aliases");
        Ok(response.aliases)
    }

    fn alias_options(&self, hostname: &str) -> BridgeResult<Option<SignedSuffix>> {
        let path = format!(
            "/v5/alias/options?hostname={}",
            urlencoding::encode(hostname)
        );
        let response: AliasOptionsResponse = self.get_json(&path)?;

        let wanted = format!("@{}", hostname);
        let suffix = response
            .suffixes
            .into_iter()
            .find(|s| s.suffix == wanted);

        if suffix.is_none() {
            tracing::warn!("No alias suffix available for hostname {}", hostname);
        }

        Ok(suffix)
    }

    fn create_alias(&self, request: &CreateAliasRequest) -> BridgeResult<Alias> {
        tracing::info!(prefix = %request.alias_prefix, "Creating alias");

        let body = serde_json::to_value(request)?;
        let alias: Alias = self.post_json("/v3/alias/custom/new", &body)?;

        tracing::info!(alias = %alias.email, "Alias created");
        Ok(alias)
    }

    fn mailboxes(&self) -> BridgeResult<Vec<Mailbox>> {
        let response: MailboxListResponse = self.get_json("/mailboxes")?;
        Ok(response.mailboxes)
    }

    fn get_or_create_contact(&self, alias_id: u64, email: &str) -> BridgeResult<AliasContact> {
        let request = CreateContactRequest::new(email);
        let body = serde_json::to_value(&request)?;

        let path = format!("/aliases/{}/contacts", alias_id);
        let contact: AliasContact = self.post_json(&path, &body)?;

        tracing::debug!(
            reverse_alias = %contact.reverse_alias_address,
            existed = contact.existed,
            "Resolved alias contact"
        );
        Ok(contact)
    }
}

/// Decode a successful response body as JSON.
fn read_json<T: DeserializeOwned>(response: ureq::Response) -> BridgeResult<T> {
    let body = response
        .into_string()
        .map_err(|e| BridgeError::ProviderUnavailable(e.to_string()))?;

    serde_json::from_str(&body).map_err(BridgeError::Json)
}

/// Map a ureq error to a BridgeError.
///
/// 409/422 carry the provider's "alias already exists" signal and become
/// `AliasCreationConflict`; other 4xx are terminal rejections; transport
/// failures and 5xx are retryable.
fn map_error(error: ureq::Error) -> BridgeError {
    match error {
        ureq::Error::Status(status, response) => {
            let body = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = extract_error_message(&body);

            match status {
                409 | 422 => BridgeError::AliasCreationConflict(message),
                500..=599 => BridgeError::ProviderUnavailable(format!(
                    "server error (status {}): {}",
                    status, message
                )),
                _ => BridgeError::ProviderRejected { status, message },
            }
        }
        ureq::Error::Transport(transport) => {
            BridgeError::ProviderUnavailable(transport.to_string())
        }
    }
}

/// Pull the `error` field out of a provider error body, falling back to
/// the raw body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.to_string())
}
