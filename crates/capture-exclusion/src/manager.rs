//! Exclusion orchestrator
//!
//! Folds the fixed mechanism order over a window-system port, stopping at
//! the first mechanism that applies. Failures are recorded and logged, never
//! propagated: every request produces exactly one report.

use tracing::{debug, error, info, warn};

use crate::{
    AttemptRecord, AttemptStatus, DisplayAffinity, ExclusionError, ExclusionReport,
    ExclusionResult, Mechanism, WindowHandle, WindowSystem, MECHANISM_ORDER,
};

/// Applies capture exclusion through a [`WindowSystem`] port
pub struct ExclusionManager<W: WindowSystem> {
    window_system: W,
}

impl<W: WindowSystem> ExclusionManager<W> {
    pub fn new(window_system: W) -> Self {
        Self { window_system }
    }

    /// Resolve `window` to its true top-level ancestor.
    ///
    /// Exclusion only takes reliable effect on top-level windows. A failed
    /// ancestor query falls back to the input handle unchanged; resolution
    /// never aborts the pipeline.
    pub fn resolve_root(&self, window: WindowHandle) -> WindowHandle {
        match self.window_system.root_ancestor(window) {
            Some(root) => {
                debug!(%window, %root, "resolved top-level window");
                root
            }
            None => {
                debug!(%window, "root ancestor query yielded nothing; keeping input handle");
                window
            }
        }
    }

    /// Apply capture exclusion to `window`.
    ///
    /// Resolves the root once, then tries each mechanism in
    /// [`MECHANISM_ORDER`] against it. Idempotent: re-applying to the same
    /// handle re-sets the same attribute.
    pub fn apply(&self, window: WindowHandle) -> ExclusionReport {
        let root = self.resolve_root(window);
        let mut attempts = Vec::with_capacity(MECHANISM_ORDER.len());

        for mechanism in MECHANISM_ORDER {
            match self.attempt(mechanism, root) {
                Ok(()) => {
                    attempts.push(AttemptRecord {
                        mechanism,
                        status: AttemptStatus::Applied,
                    });
                    match mechanism {
                        Mechanism::AffinityMonitor => {
                            warn!(%root, "monitor-only affinity applied; exclusion is partial")
                        }
                        _ => info!(%root, label = mechanism.label(), "capture exclusion applied"),
                    }
                    return ExclusionReport::applied(mechanism, attempts);
                }
                Err(ExclusionError::CapabilityAbsent(library)) => {
                    info!(%mechanism, library, "capability absent; falling through");
                    attempts.push(AttemptRecord {
                        mechanism,
                        status: AttemptStatus::CapabilityAbsent,
                    });
                }
                Err(ExclusionError::CallRejected { code }) => {
                    error!(%mechanism, code, "platform call rejected");
                    attempts.push(AttemptRecord {
                        mechanism,
                        status: AttemptStatus::Rejected(code),
                    });
                }
            }
        }

        error!(%root, "all capture-exclusion mechanisms failed");
        ExclusionReport::none(attempts)
    }

    fn attempt(&self, mechanism: Mechanism, root: WindowHandle) -> ExclusionResult<()> {
        match mechanism {
            Mechanism::Dwm => self.window_system.set_dwm_capture_exclusion(root),
            Mechanism::AffinityExclude => self
                .window_system
                .set_display_affinity(root, DisplayAffinity::ExcludeFromCapture),
            Mechanism::AffinityMonitor => self
                .window_system
                .set_display_affinity(root, DisplayAffinity::Monitor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        RootAncestor(isize),
        Dwm(isize),
        Affinity(isize, DisplayAffinity),
    }

    struct FakeWindowSystem {
        roots: HashMap<isize, isize>,
        dwm: ExclusionResult<()>,
        affinity_exclude: ExclusionResult<()>,
        affinity_monitor: ExclusionResult<()>,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeWindowSystem {
        fn new() -> Self {
            Self {
                roots: HashMap::new(),
                dwm: Ok(()),
                affinity_exclude: Ok(()),
                affinity_monitor: Ok(()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl WindowSystem for FakeWindowSystem {
        fn root_ancestor(&self, window: WindowHandle) -> Option<WindowHandle> {
            self.calls.borrow_mut().push(Call::RootAncestor(window.raw()));
            self.roots.get(&window.raw()).copied().map(WindowHandle::from_raw)
        }

        fn set_dwm_capture_exclusion(&self, window: WindowHandle) -> ExclusionResult<()> {
            self.calls.borrow_mut().push(Call::Dwm(window.raw()));
            self.dwm.clone()
        }

        fn set_display_affinity(
            &self,
            window: WindowHandle,
            affinity: DisplayAffinity,
        ) -> ExclusionResult<()> {
            self.calls
                .borrow_mut()
                .push(Call::Affinity(window.raw(), affinity));
            match affinity {
                DisplayAffinity::ExcludeFromCapture => self.affinity_exclude.clone(),
                DisplayAffinity::Monitor => self.affinity_monitor.clone(),
            }
        }
    }

    #[test]
    fn test_root_resolution_is_idempotent() {
        let mut fake = FakeWindowSystem::new();
        fake.roots.insert(0x11, 0x10);
        fake.roots.insert(0x10, 0x10);
        let manager = ExclusionManager::new(fake);

        let once = manager.resolve_root(WindowHandle::from_raw(0x11));
        let twice = manager.resolve_root(once);
        assert_eq!(once.raw(), 0x10);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_failed_root_query_keeps_input_handle() {
        let manager = ExclusionManager::new(FakeWindowSystem::new());
        let resolved = manager.resolve_root(WindowHandle::from_raw(0x42));
        assert_eq!(resolved.raw(), 0x42);
    }

    #[test]
    fn test_primary_success_short_circuits_legacy() {
        let fake = FakeWindowSystem::new();
        let manager = ExclusionManager::new(fake);

        let report = manager.apply(WindowHandle::from_raw(0x1000));
        assert_eq!(report.label(), "DWM");
        assert!(report.outcome.applied);
        assert_eq!(report.attempts.len(), 1);
        assert!(manager
            .window_system
            .calls()
            .iter()
            .all(|c| !matches!(c, Call::Affinity(..))));
    }

    #[test]
    fn test_mechanism_attempts_use_resolved_root() {
        let mut fake = FakeWindowSystem::new();
        fake.roots.insert(0x11, 0x10);
        let manager = ExclusionManager::new(fake);

        manager.apply(WindowHandle::from_raw(0x11));
        assert!(manager.window_system.calls().contains(&Call::Dwm(0x10)));
    }

    #[test]
    fn test_rejected_primary_falls_through_to_affinity() {
        let mut fake = FakeWindowSystem::new();
        fake.dwm = Err(ExclusionError::CallRejected { code: 0x80070005 });
        let manager = ExclusionManager::new(fake);

        let report = manager.apply(WindowHandle::from_raw(0x2000));
        assert_eq!(report.label(), "Affinity");
        assert_eq!(
            report.attempts,
            vec![
                AttemptRecord {
                    mechanism: Mechanism::Dwm,
                    status: AttemptStatus::Rejected(0x80070005),
                },
                AttemptRecord {
                    mechanism: Mechanism::AffinityExclude,
                    status: AttemptStatus::Applied,
                },
            ]
        );
    }

    #[test]
    fn test_monitor_fallback_when_primary_unavailable_and_exclude_rejected() {
        let mut fake = FakeWindowSystem::new();
        fake.dwm = Err(ExclusionError::CapabilityAbsent("dwmapi.dll"));
        fake.affinity_exclude = Err(ExclusionError::CallRejected { code: 5 });
        let manager = ExclusionManager::new(fake);

        let report = manager.apply(WindowHandle::from_raw(0x2000));
        assert_eq!(report.label(), "Monitor");
        assert!(report.outcome.applied);
        assert_eq!(report.outcome.mechanism, Some(Mechanism::AffinityMonitor));
    }

    #[test]
    fn test_all_mechanisms_fail_reports_none_with_error_codes() {
        let mut fake = FakeWindowSystem::new();
        fake.dwm = Err(ExclusionError::CallRejected { code: 0x80004005 });
        fake.affinity_exclude = Err(ExclusionError::CallRejected { code: 5 });
        fake.affinity_monitor = Err(ExclusionError::CallRejected { code: 87 });
        let manager = ExclusionManager::new(fake);

        let report = manager.apply(WindowHandle::from_raw(0x3000));
        assert_eq!(report.label(), "None");
        assert!(!report.outcome.applied);
        assert_eq!(report.outcome.mechanism, None);

        // Both legacy-tier failures captured their platform error codes.
        let affinity_rejections: Vec<_> = report
            .attempts
            .iter()
            .filter(|a| {
                a.mechanism != Mechanism::Dwm && matches!(a.status, AttemptStatus::Rejected(_))
            })
            .collect();
        assert_eq!(affinity_rejections.len(), 2);
        assert_eq!(affinity_rejections[0].status, AttemptStatus::Rejected(5));
        assert_eq!(affinity_rejections[1].status, AttemptStatus::Rejected(87));
    }

    #[test]
    fn test_reapplying_is_idempotent() {
        let fake = FakeWindowSystem::new();
        let manager = ExclusionManager::new(fake);

        let first = manager.apply(WindowHandle::from_raw(0x1000));
        let second = manager.apply(WindowHandle::from_raw(0x1000));
        assert_eq!(first, second);
    }
}
