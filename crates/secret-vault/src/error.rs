//! Vault error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("keychain access failed: {0}")]
    Keychain(#[from] keyring::Error),
}

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
