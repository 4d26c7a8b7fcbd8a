//! Exclusion outcome and attempt-trace types

/// Capture-exclusion mechanism, one per entry in [`MECHANISM_ORDER`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// `DWMWA_EXCLUDED_FROM_CAPTURE` window attribute
    Dwm,
    /// `SetWindowDisplayAffinity` with the full-exclusion value
    AffinityExclude,
    /// `SetWindowDisplayAffinity` with the monitor-only value (partial:
    /// some capture paths still see the window)
    AffinityMonitor,
}

impl Mechanism {
    /// Short label shown in the UI status badge
    pub fn label(&self) -> &'static str {
        match self {
            Mechanism::Dwm => "DWM",
            Mechanism::AffinityExclude => "Affinity",
            Mechanism::AffinityMonitor => "Monitor",
        }
    }
}

impl std::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed attempt order. Evaluated front to back with early exit on the
/// first mechanism that applies.
pub const MECHANISM_ORDER: [Mechanism; 3] = [
    Mechanism::Dwm,
    Mechanism::AffinityExclude,
    Mechanism::AffinityMonitor,
];

/// Result of one exclusion request. Produced exactly once per request.
///
/// `applied == false` is a degraded state to surface to the user, not an
/// error: the app stays fully usable, capture is simply not suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionOutcome {
    pub applied: bool,
    /// First mechanism in the order that reported success
    pub mechanism: Option<Mechanism>,
}

impl ExclusionOutcome {
    pub fn applied(mechanism: Mechanism) -> Self {
        Self {
            applied: true,
            mechanism: Some(mechanism),
        }
    }

    pub fn none() -> Self {
        Self {
            applied: false,
            mechanism: None,
        }
    }

    /// `"DWM"`, `"Affinity"`, `"Monitor"`, or `"None"`
    pub fn label(&self) -> &'static str {
        match self.mechanism {
            Some(mechanism) if self.applied => mechanism.label(),
            _ => "None",
        }
    }
}

/// How a single mechanism attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Applied,
    /// Required platform library/API missing; fallback trigger
    CapabilityAbsent,
    /// Call executed and was rejected; carries the raw platform status
    Rejected(i64),
}

/// One entry in the attempt trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    pub mechanism: Mechanism,
    pub status: AttemptStatus,
}

/// Outcome plus the ordered trace of every mechanism attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionReport {
    pub outcome: ExclusionOutcome,
    pub attempts: Vec<AttemptRecord>,
    compatibility: bool,
}

impl ExclusionReport {
    pub(crate) fn applied(mechanism: Mechanism, attempts: Vec<AttemptRecord>) -> Self {
        Self {
            outcome: ExclusionOutcome::applied(mechanism),
            attempts,
            compatibility: false,
        }
    }

    pub(crate) fn none(attempts: Vec<AttemptRecord>) -> Self {
        Self {
            outcome: ExclusionOutcome::none(),
            attempts,
            compatibility: false,
        }
    }

    /// Fixed report for hosts without the targeted window system.
    ///
    /// Carries the default `"DWM"` label so the status badge stays quiet,
    /// but no mechanism ran and capture is NOT actually excluded.
    pub fn compatibility() -> Self {
        Self {
            outcome: ExclusionOutcome::applied(Mechanism::Dwm),
            attempts: Vec::new(),
            compatibility: true,
        }
    }

    /// True when this report came from the non-capable-host shortcut
    pub fn is_compatibility(&self) -> bool {
        self.compatibility
    }

    /// UI label for the status badge
    pub fn label(&self) -> &'static str {
        self.outcome.label()
    }
}
