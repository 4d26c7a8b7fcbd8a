//! Secret Vault - OS-keychain storage for a single named secret
//!
//! Cloak keeps exactly one secret (the chat API key) under a fixed
//! service+key pair. Reads that fail resolve to "absent" so the host can
//! prompt for re-entry; writes surface their error to the user.

mod error;
mod vault;

pub use error::*;
pub use vault::*;
