// ── Runtime connection configuration ──
//
// Describes *how* to reach a controller and how aggressively to poll it.
// The CLI (or any other host) constructs a `BridgeConfig` and hands it in;
// core never reads config files.

use std::time::Duration;

/// Configuration for connecting to a single RepelBridge controller.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Controller host: an IP or an mDNS-resolved hostname.
    pub host: String,
    /// HTTP port (the firmware serves on 80).
    pub port: u16,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Scheduled poll interval. `Duration::ZERO` disables the background
    /// poll task; callers then drive [`Bridge::poll`](crate::Bridge::poll)
    /// themselves.
    pub poll_interval: Duration,
    /// Consecutive poll failures before a bus goes from Stale to Offline.
    pub offline_threshold: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "repelbridge.local".into(),
            port: 80,
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_secs(30),
            offline_threshold: 3,
        }
    }
}

impl BridgeConfig {
    /// Convenience constructor for the common "host only" case.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }
}
