//! Wire types for the SimpleLogin API.

mod alias;
mod contact;
mod mailbox;

pub use alias::{Alias, AliasListResponse, AliasOptionsResponse, CreateAliasRequest, SignedSuffix};
pub use contact::{AliasContact, CreateContactRequest};
pub use mailbox::{Mailbox, MailboxListResponse};
