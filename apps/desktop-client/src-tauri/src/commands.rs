//! Tauri command handlers

use std::sync::Arc;

use tauri::{State, WebviewWindow};
use tracing::{error, info};

use chat_transport::{ChatClient, ChatConfig};
use secret_vault::SecretVault;

use crate::config::{KEYRING_KEY, KEYRING_SERVICE};
use crate::state::AppState;

/// Error type for commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("{0}")]
    Chat(String),
    #[error("failed to save API key: {0}")]
    KeySave(String),
    #[error("window error: {0}")]
    Window(String),
}

impl serde::Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

type CommandResult<T> = Result<T, CommandError>;

/// Send one user query to the assistant
#[tauri::command]
pub async fn send_query(state: State<'_, Arc<AppState>>, query: String) -> CommandResult<String> {
    let client = state.client().ok_or(CommandError::MissingApiKey)?;

    info!(len = query.len(), "sending chat query");
    client.send_query(&query).await.map_err(|e| {
        error!(error = %e, "chat query failed");
        CommandError::Chat(e.to_string())
    })
}

/// Store the API key in the OS keychain and build the chat client
#[tauri::command]
pub fn save_api_key(state: State<'_, Arc<AppState>>, key: String) -> CommandResult<()> {
    let key = key.trim();
    if key.is_empty() {
        return Err(CommandError::KeySave("key is empty".to_string()));
    }

    let vault = SecretVault::new(KEYRING_SERVICE, KEYRING_KEY)
        .map_err(|e| CommandError::KeySave(e.to_string()))?;
    vault.store(key).map_err(|e| {
        error!(error = %e, "API key save failed");
        CommandError::KeySave(e.to_string())
    })?;

    let client = ChatClient::new(key, ChatConfig::default())
        .map_err(|e| CommandError::Chat(e.to_string()))?;
    state.set_client(client);

    Ok(())
}

/// Whether a chat client is ready (an API key is configured)
#[tauri::command]
pub fn api_key_present(state: State<'_, Arc<AppState>>) -> bool {
    state.has_client()
}

/// Current capture-exclusion status label for the badge
#[tauri::command]
pub fn capture_status(state: State<'_, Arc<AppState>>) -> String {
    state.capture_status()
}

/// Hide or show the window (bound to Ctrl+Alt+I in the frontend)
#[tauri::command]
pub fn toggle_visibility(window: WebviewWindow) -> CommandResult<()> {
    let visible = window
        .is_visible()
        .map_err(|e| CommandError::Window(e.to_string()))?;

    if visible {
        window
            .hide()
            .map_err(|e| CommandError::Window(e.to_string()))?;
        info!("window hidden");
    } else {
        window
            .show()
            .map_err(|e| CommandError::Window(e.to_string()))?;
        window
            .set_focus()
            .map_err(|e| CommandError::Window(e.to_string()))?;
        info!("window shown");
    }

    Ok(())
}
