//! PhoneNumber and AliasLocalPart value objects.
//!
//! A phone number and its alias local part are two spellings of the same
//! identity: normalization is total and deterministic, the digit string is
//! the canonical form, and encoding to a local part is injective, so the
//! pair round-trips losslessly in both directions.

use crate::error::BridgeError;
use std::fmt;

/// Fewest significant digits accepted in an international number.
const MIN_DIGITS: usize = 7;

/// E.164 caps international numbers at 15 digits.
const MAX_DIGITS: usize = 15;

/// A phone number in canonical international form: digits only, country
/// code first.
///
/// Construction normalizes human-entered input (`+`, spaces, dashes, dots,
/// parentheses are stripped), so two spellings of the same number always
/// compare equal.
///
/// # Example
///
/// ```
/// use sms_email_bridge::domain::PhoneNumber;
///
/// let a = PhoneNumber::new("+237 123-456-789").unwrap();
/// let b = PhoneNumber::new("237123456789").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "237123456789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, normalizing and validating the input.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidPhoneNumber` if the input contains
    /// characters other than digits and common formatting, or if the digit
    /// count falls outside the 7..=15 range.
    pub fn new(input: impl AsRef<str>) -> Result<Self, BridgeError> {
        let input = input.as_ref();

        let mut digits = String::with_capacity(input.len());
        for (i, c) in input.trim().chars().enumerate() {
            match c {
                '0'..='9' => digits.push(c),
                // Leading '+' only; formatting separators anywhere.
                '+' if i == 0 => {}
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(BridgeError::InvalidPhoneNumber(input.to_string())),
            }
        }

        if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
            return Err(BridgeError::InvalidPhoneNumber(input.to_string()));
        }

        Ok(Self(digits))
    }

    /// The canonical digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode this number as an alias local part.
    ///
    /// Distinct normalized numbers always yield distinct local parts: the
    /// canonical digits *are* the local part.
    pub fn local_part(&self) -> AliasLocalPart {
        AliasLocalPart(self.0.clone())
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The local part of a phone-derived alias address (the part before `@`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasLocalPart(String);

impl AliasLocalPart {
    /// Parse an upstream local part, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidAlias` if the local part is not purely
    /// numeric or its length is implausible for a phone number.
    pub fn parse(local_part: impl AsRef<str>) -> Result<Self, BridgeError> {
        let local_part = local_part.as_ref();

        let numeric = !local_part.is_empty() && local_part.chars().all(|c| c.is_ascii_digit());
        if !numeric || local_part.len() < MIN_DIGITS || local_part.len() > MAX_DIGITS {
            return Err(BridgeError::InvalidAlias(local_part.to_string()));
        }

        Ok(Self(local_part.to_string()))
    }

    /// Decode back to the phone number this local part was derived from.
    pub fn phone_number(&self) -> PhoneNumber {
        // Shape was validated at construction, so this cannot fail.
        PhoneNumber(self.0.clone())
    }

    /// The local part as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full alias address under the given bridge domain.
    pub fn address_in(&self, domain: &str) -> String {
        format!("{}@{}", self.0, domain)
    }
}

impl fmt::Display for AliasLocalPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
