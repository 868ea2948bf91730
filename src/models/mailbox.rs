//! Mailbox wire types for the SimpleLogin API.

use serde::Deserialize;

/// A real mailbox registered with the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Mailbox {
    /// Provider identifier, referenced when creating aliases
    pub id: u64,

    /// Mailbox address
    pub email: String,

    /// Whether this is the account's default mailbox
    #[serde(default)]
    pub default: bool,
}

/// Response wrapper for the mailboxes endpoint.
#[derive(Debug, Deserialize)]
pub struct MailboxListResponse {
    /// All mailboxes on the account
    pub mailboxes: Vec<Mailbox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailbox_deserialization() {
        let json = r#"{"mailboxes": [
            {"id": 7, "email": "operator@example.com", "default": true},
            {"id": 8, "email": "backup@example.com"}
        ]}"#;

        let response: MailboxListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.mailboxes.len(), 2);
        assert_eq!(response.mailboxes[0].id, 7);
        assert!(response.mailboxes[0].default);
        assert!(!response.mailboxes[1].default);
    }
}
