//! Win32 window-system backend
//!
//! Real calls into user32/dwmapi. Everything here must run on the thread
//! that owns the target window.

use std::ffi::c_void;

use tracing::debug;
use windows::core::w;
use windows::Win32::Foundation::{BOOL, HWND};
use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWA_EXCLUDED_FROM_CAPTURE};
use windows::Win32::System::LibraryLoader::LoadLibraryW;
use windows::Win32::UI::WindowsAndMessaging::{
    GetAncestor, SetWindowDisplayAffinity, GA_ROOT, WDA_EXCLUDEFROMCAPTURE, WDA_MONITOR,
    WINDOW_DISPLAY_AFFINITY,
};

use crate::{DisplayAffinity, ExclusionError, ExclusionResult, WindowHandle, WindowSystem};

/// Window system backed by the Win32 APIs
pub struct Win32WindowSystem {
    dwm_available: bool,
}

impl Win32WindowSystem {
    /// Probe capabilities once; the result drives mechanism availability
    /// for the lifetime of this instance.
    pub fn new() -> Self {
        // The module stays loaded for the process lifetime; no FreeLibrary.
        let dwm_available = unsafe { LoadLibraryW(w!("dwmapi.dll")).is_ok() };
        if !dwm_available {
            debug!("dwmapi.dll not loadable; DWM exclusion unavailable");
        }
        Self { dwm_available }
    }
}

impl Default for Win32WindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

impl WindowSystem for Win32WindowSystem {
    fn root_ancestor(&self, window: WindowHandle) -> Option<WindowHandle> {
        let root = unsafe { GetAncestor(hwnd(window), GA_ROOT) };
        if root.is_invalid() {
            None
        } else {
            Some(WindowHandle::from_raw(root.0 as isize))
        }
    }

    fn set_dwm_capture_exclusion(&self, window: WindowHandle) -> ExclusionResult<()> {
        if !self.dwm_available {
            return Err(ExclusionError::CapabilityAbsent("dwmapi.dll"));
        }

        // Payload is exactly one BOOL word, per the attribute contract.
        let excluded = BOOL::from(true);
        unsafe {
            DwmSetWindowAttribute(
                hwnd(window),
                DWMWA_EXCLUDED_FROM_CAPTURE,
                &excluded as *const BOOL as *const c_void,
                std::mem::size_of::<BOOL>() as u32,
            )
        }
        .map_err(|e| ExclusionError::CallRejected {
            code: e.code().0 as u32 as i64,
        })
    }

    fn set_display_affinity(
        &self,
        window: WindowHandle,
        affinity: DisplayAffinity,
    ) -> ExclusionResult<()> {
        let value: WINDOW_DISPLAY_AFFINITY = match affinity {
            DisplayAffinity::ExcludeFromCapture => WDA_EXCLUDEFROMCAPTURE,
            DisplayAffinity::Monitor => WDA_MONITOR,
        };
        unsafe { SetWindowDisplayAffinity(hwnd(window), value) }.map_err(|e| {
            ExclusionError::CallRejected {
                code: e.code().0 as u32 as i64,
            }
        })
    }
}
