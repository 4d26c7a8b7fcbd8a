//! Keychain-backed secret storage

use tracing::{error, info};

use crate::VaultResult;

/// One named secret under a fixed service+key pair on the OS keychain
pub struct SecretVault {
    service: String,
    entry: keyring::Entry,
}

impl SecretVault {
    pub fn new(service: &str, name: &str) -> VaultResult<Self> {
        Ok(Self {
            service: service.to_string(),
            entry: keyring::Entry::new(service, name)?,
        })
    }

    /// Store the secret. Write failures surface to the caller.
    pub fn store(&self, value: &str) -> VaultResult<()> {
        self.entry.set_password(value)?;
        info!(service = %self.service, "secret stored in keychain");
        Ok(())
    }

    /// Fetch the secret; `Ok(None)` when no entry exists.
    pub fn retrieve(&self) -> VaultResult<Option<String>> {
        match self.entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read with the host contract applied: any failure is non-fatal and
    /// resolves to absent, which prompts the user for re-entry.
    pub fn retrieve_or_absent(&self) -> Option<String> {
        match self.retrieve() {
            Ok(value) => {
                info!(
                    service = %self.service,
                    present = value.is_some(),
                    "secret fetch"
                );
                value
            }
            Err(e) => {
                error!(service = %self.service, error = %e, "keychain read failed; treating secret as absent");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn use_mock_store() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
    }

    #[test]
    fn test_store_and_retrieve_round_trip() {
        use_mock_store();
        let vault = SecretVault::new("cloak-test", "roundtrip_key").unwrap();
        vault.store("abc123").unwrap();
        assert_eq!(vault.retrieve().unwrap(), Some("abc123".to_string()));
        assert_eq!(vault.retrieve_or_absent(), Some("abc123".to_string()));
    }

    #[test]
    fn test_absent_secret_reads_as_none() {
        use_mock_store();
        let vault = SecretVault::new("cloak-test", "absent_key").unwrap();
        assert_eq!(vault.retrieve().unwrap(), None);
        assert_eq!(vault.retrieve_or_absent(), None);
    }
}
