//! Cloak Desktop Client - Tauri Application
//!
//! Chat window that stays visible to the user while excluded from
//! screenshots, recordings, and screen shares. Capture exclusion is applied
//! once per window, shortly after the first layout pass.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod config;
mod state;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tauri::{Emitter, Manager};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use capture_exclusion::{apply_capture_exclusion, WindowHandle};
use chat_transport::{ChatClient, ChatConfig};
use secret_vault::SecretVault;

use crate::config::{
    APP_TITLE, DEFAULT_LOG_LEVEL, EXCLUSION_DELAY_MS, KEYRING_KEY, KEYRING_SERVICE, LOG_ENV,
    LOG_FILE,
};
use crate::state::AppState;

/// Log next to the executable, or the working directory in dev
fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LOG_FILE)))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}

fn init_logging() -> anyhow::Result<()> {
    let path = log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// HWND of the webview's window, as an opaque handle
fn raw_window(window: &tauri::WebviewWindow) -> WindowHandle {
    #[cfg(target_os = "windows")]
    {
        match window.hwnd() {
            Ok(hwnd) => WindowHandle::from_raw(hwnd.0 as isize),
            Err(e) => {
                warn!(error = %e, "window handle query failed");
                WindowHandle::from_raw(0)
            }
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = window;
        WindowHandle::from_raw(0)
    }
}

/// Apply capture exclusion once the window has had its first layout pass,
/// then surface the resulting label to the state and the frontend badge.
fn schedule_capture_exclusion(app: &tauri::App) {
    let Some(window) = app.get_webview_window("main") else {
        warn!("main window missing; capture exclusion skipped");
        return;
    };

    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(Duration::from_millis(EXCLUSION_DELAY_MS)).await;

        let worker = window.clone();
        // Handle APIs are only valid on the thread that owns the window.
        let hopped = window.run_on_main_thread(move || {
            let report = apply_capture_exclusion(raw_window(&worker));
            if report.is_compatibility() {
                info!("compatibility mode; capture is not actually excluded on this host");
            }

            let label = report.label();
            let state: tauri::State<'_, Arc<AppState>> = worker.state();
            state.set_capture_status(label);
            info!(label, "exclusion status");

            if let Err(e) = worker.emit("capture-status", label) {
                warn!(error = %e, "capture-status event dropped");
            }
        });
        if let Err(e) = hopped {
            warn!(error = %e, "main-thread hop failed; capture exclusion skipped");
        }
    });
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("log init failed: {e:#}");
    }

    info!("starting {APP_TITLE} desktop client");

    tauri::Builder::default()
        .setup(|app| {
            let state = Arc::new(AppState::new());

            // Pre-load the API key; absence is non-fatal and the frontend
            // prompts for re-entry.
            match SecretVault::new(KEYRING_SERVICE, KEYRING_KEY) {
                Ok(vault) => {
                    if let Some(key) = vault.retrieve_or_absent() {
                        match ChatClient::new(key, ChatConfig::default()) {
                            Ok(client) => state.set_client(client),
                            Err(e) => warn!(error = %e, "stored API key unusable"),
                        }
                    }
                }
                Err(e) => warn!(error = %e, "keychain unavailable"),
            }

            app.manage(state);
            schedule_capture_exclusion(app);

            info!("application setup complete");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::send_query,
            commands::save_api_key,
            commands::api_key_present,
            commands::capture_status,
            commands::toggle_visibility,
        ])
        .run(tauri::generate_context!())
        .expect("error running Cloak");
}
