// ── System-wide state ──
//
// The system slice is polled like the buses and degrades the same way:
// an endpoint-level failure (non-2xx, malformed body) marks it stale
// while the last-known values are retained.

use std::time::Duration;

use serde::Serialize;

use super::availability::Availability;

/// WiFi link state as reported by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WifiStatus {
    Connected,
    Disconnected,
    #[default]
    Unknown,
}

/// Controller-level information, refreshed wholesale each poll cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemInfo {
    pub availability: Availability,
    pub consecutive_failures: u32,
    pub wifi: WifiStatus,
    pub wifi_ssid: Option<String>,
    pub wifi_ip: Option<String>,
    /// Time since the controller booted.
    pub uptime: Duration,
    pub device_name: String,
    pub firmware_version: Option<String>,
    pub model: Option<String>,
    pub free_heap: Option<u64>,
}

impl SystemInfo {
    /// Whether the last poll of the system endpoint succeeded.
    pub fn available(&self) -> bool {
        self.availability == Availability::Online
    }

    /// Advance the availability machine after a failed system poll.
    /// Previous values are retained.
    pub(crate) fn record_failure(&mut self, offline_threshold: u32) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.availability =
            Availability::after_failures(self.consecutive_failures, offline_threshold);
    }
}
