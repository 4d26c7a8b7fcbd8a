//! Application state management

use std::sync::Arc;

use chat_transport::ChatClient;
use parking_lot::RwLock;

/// Application-wide state
pub struct AppState {
    /// Chat client; `None` until an API key is available
    client: RwLock<Option<Arc<ChatClient>>>,
    /// Label of the capture-exclusion mechanism that applied
    capture_status: RwLock<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            client: RwLock::new(None),
            capture_status: RwLock::new("…".to_string()),
        }
    }

    pub fn set_client(&self, client: ChatClient) {
        *self.client.write() = Some(Arc::new(client));
    }

    pub fn client(&self) -> Option<Arc<ChatClient>> {
        self.client.read().clone()
    }

    pub fn has_client(&self) -> bool {
        self.client.read().is_some()
    }

    pub fn set_capture_status(&self, label: &str) {
        *self.capture_status.write() = label.to_string();
    }

    pub fn capture_status(&self) -> String {
        self.capture_status.read().clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_status_updates() {
        let state = AppState::new();
        assert_eq!(state.capture_status(), "…");
        state.set_capture_status("DWM");
        assert_eq!(state.capture_status(), "DWM");
    }

    #[test]
    fn test_client_starts_absent() {
        let state = AppState::new();
        assert!(!state.has_client());
        assert!(state.client().is_none());
    }
}
