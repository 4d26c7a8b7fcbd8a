//! Application configuration constants

pub const APP_TITLE: &str = "Cloak";

/// Keychain identifiers for the chat API key
pub const KEYRING_SERVICE: &str = "Cloak";
pub const KEYRING_KEY: &str = "openrouter_api_key";

/// Env var controlling log verbosity (e.g. `CLOAK_LOG=debug`)
pub const LOG_ENV: &str = "CLOAK_LOG";
pub const LOG_FILE: &str = "cloak.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Delay between window creation and the exclusion attempt; handle queries
/// on an unrealized window are unreliable.
pub const EXCLUSION_DELAY_MS: u64 = 600;
