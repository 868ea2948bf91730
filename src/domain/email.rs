//! EmailAddress value object.

use crate::error::BridgeError;
use std::fmt;

/// A syntactically valid email address.
///
/// Validation is shape-only (one `@`, non-empty local part, dotted domain
/// with non-empty labels, no whitespace); deliverability is the SMTP
/// server's problem. Every to/cc/bcc entry passes through here before any
/// network call is made.
///
/// # Example
///
/// ```
/// use sms_email_bridge::domain::EmailAddress;
///
/// let email = EmailAddress::new("user@example.com").unwrap();
/// assert_eq!(email.local_part(), "user");
/// assert_eq!(email.domain(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidAddress` if the string is not a
    /// plausible address.
    pub fn new(email: impl Into<String>) -> Result<Self, BridgeError> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(BridgeError::InvalidAddress(email));
        }

        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let (local, domain) = match email.split_once('@') {
            Some(parts) => parts,
            None => return false,
        };

        if local.is_empty() || domain.contains('@') {
            return false;
        }

        // Domain needs at least two non-empty dot-separated labels.
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the local part (before '@').
    pub fn local_part(&self) -> &str {
        // Constructor guarantees exactly one '@'.
        self.0.split('@').next().expect("validated address")
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).expect("validated address")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(EmailAddress::new("user@example.com").is_ok());
        assert!(EmailAddress::new("user.name+tag@example.co.uk").is_ok());
        assert!(EmailAddress::new("237123456789@relaysms.me").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("invalid").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@").is_err());
        assert!(EmailAddress::new("user@domain").is_err());
        assert!(EmailAddress::new("user@@example.com").is_err());
        assert!(EmailAddress::new("user@example..com").is_err());
        assert!(EmailAddress::new("user name@example.com").is_err());
    }

    #[test]
    fn test_email_parts() {
        let email = EmailAddress::new("user@example.com").unwrap();
        assert_eq!(email.local_part(), "user");
        assert_eq!(email.domain(), "example.com");
        assert_eq!(format!("{}", email), "user@example.com");
    }

    #[test]
    fn test_invalid_error_carries_input() {
        match EmailAddress::new("not-an-email") {
            Err(BridgeError::InvalidAddress(s)) => assert_eq!(s, "not-an-email"),
            other => panic!("Expected InvalidAddress, got: {:?}", other),
        }
    }
}
