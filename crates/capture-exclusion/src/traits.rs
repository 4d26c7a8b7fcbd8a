//! Window-system port abstraction

use crate::{ExclusionResult, WindowHandle};

/// Display-affinity values used by the legacy mechanism tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAffinity {
    /// Omit the window from every capture path
    ExcludeFromCapture,
    /// Omit the window from some capture paths only
    Monitor,
}

/// Port over the platform window system.
///
/// The orchestrator is generic over this trait so the fallback logic exists
/// once; the Win32 implementation performs the real calls and tests use a
/// recording fake.
pub trait WindowSystem {
    /// Root ancestor of `window`, or `None` when the query yields nothing
    /// (invalid handle, API unavailable).
    fn root_ancestor(&self, window: WindowHandle) -> Option<WindowHandle>;

    /// Set the window-composition attribute that omits `window` from
    /// capture surfaces.
    fn set_dwm_capture_exclusion(&self, window: WindowHandle) -> ExclusionResult<()>;

    /// Set a display-affinity value on `window`.
    fn set_display_affinity(
        &self,
        window: WindowHandle,
        affinity: DisplayAffinity,
    ) -> ExclusionResult<()>;
}
