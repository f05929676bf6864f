// ── Slice availability ──

use serde::Serialize;

/// Degraded-availability state machine, one instance per polled slice
/// (each bus, and the system slice itself).
///
/// Online → Stale on a single poll failure, Stale → Offline after the
/// configured number of consecutive failures, anything → Online on the
/// next success. Offline is never terminal while the bridge runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Online,
    Stale,
    Offline,
    /// Never polled successfully yet.
    #[default]
    Unknown,
}

impl Availability {
    /// State after `failures` consecutive poll failures.
    pub(crate) fn after_failures(failures: u32, offline_threshold: u32) -> Self {
        if failures >= offline_threshold {
            Self::Offline
        } else {
            Self::Stale
        }
    }
}
