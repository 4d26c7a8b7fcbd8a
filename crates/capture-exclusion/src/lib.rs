//! Capture Exclusion - keeps a window visible to the user while omitting it
//! from screenshots, recordings, and screen shares.
//!
//! Mechanisms, in fallback order:
//! - `DWMWA_EXCLUDED_FROM_CAPTURE` window attribute (Windows 10 2004+)
//! - `SetWindowDisplayAffinity` with `WDA_EXCLUDEFROMCAPTURE` (legacy)
//! - `SetWindowDisplayAffinity` with `WDA_MONITOR` (partial)

mod error;
mod handle;
mod manager;
mod outcome;
mod traits;

#[cfg(target_os = "windows")]
mod win32;

pub use error::*;
pub use handle::*;
pub use manager::*;
pub use outcome::*;
pub use traits::*;

#[cfg(target_os = "windows")]
pub use win32::Win32WindowSystem;

/// Apply capture exclusion to `window`, trying each mechanism in
/// [`MECHANISM_ORDER`] and stopping at the first that applies.
///
/// Call this on the thread that owns the handle, once per window, after the
/// window is realized - handle queries on an unrealized window are
/// unreliable. All failure paths degrade to a report; this never panics or
/// returns an error to the caller.
///
/// On a non-Windows host no platform call is made and the fixed
/// compatibility report is returned; that is a no-op mode, not a guarantee
/// that capture is excluded.
pub fn apply_capture_exclusion(window: WindowHandle) -> ExclusionReport {
    #[cfg(target_os = "windows")]
    {
        ExclusionManager::new(Win32WindowSystem::new()).apply(window)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = window;
        tracing::info!("non-Windows host; reporting compatibility label without platform calls");
        ExclusionReport::compatibility()
    }
}

#[cfg(all(test, not(target_os = "windows")))]
mod tests {
    use super::*;

    #[test]
    fn test_non_capable_host_short_circuits() {
        let report = apply_capture_exclusion(WindowHandle::from_raw(0x1234));
        assert!(report.is_compatibility());
        assert_eq!(report.label(), "DWM");
        assert!(report.attempts.is_empty());
    }
}
