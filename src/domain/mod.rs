//! Domain value objects.
//!
//! Type-safe wrappers validated at construction time: a phone number and
//! its alias local part (the address codec), and a recipient email address.

mod email;
mod phone;

pub use email::EmailAddress;
pub use phone::{AliasLocalPart, PhoneNumber};
