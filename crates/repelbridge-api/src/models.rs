// Wire-level payloads as the controller firmware reports them.
//
// Field sets vary slightly between firmware builds, so anything the
// oldest known firmware omits is optional with a serde default.

use serde::{Deserialize, Serialize};

/// `GET /api/system/status`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemStatus {
    pub device_name: String,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub wifi_connected: bool,
    #[serde(default)]
    pub wifi_ssid: Option<String>,
    #[serde(default)]
    pub wifi_ip: Option<String>,
    /// Milliseconds since boot.
    pub uptime_ms: u64,
    #[serde(default)]
    pub free_heap: Option<u64>,
}

/// `GET /api/bus/{id}/status`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusStatus {
    /// Firmware-internal bus state label (e.g. "running", "idle").
    #[serde(default)]
    pub state: Option<String>,
    pub powered: bool,
    /// Device-scale brightness, 0-254.
    pub brightness: u8,
    #[serde(default)]
    pub color: WireColor,
    /// Repellers detected on the RS-485 segment.
    #[serde(default)]
    pub repeller_count: u32,
}

/// RGB triple as the firmware serializes it.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct WireColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// `GET /api/bus/{id}/cartridge`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CartridgeStatus {
    pub runtime_hours: u32,
    /// Remaining cartridge life, 0-100.
    pub percent_left: u8,
    #[serde(default)]
    pub active_seconds: Option<u64>,
    /// Older firmware mirrors the shutoff setting here in seconds.
    #[serde(default)]
    pub auto_shutoff_seconds: Option<u64>,
}

/// `GET /api/bus/{id}/auto_shutoff`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutoShutoff {
    /// 0 disables the timer; the firmware caps this at 960 (16 hours).
    pub auto_shutoff_minutes: u32,
}

/// `GET /api/bus/{id}/warn_at`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WarnAt {
    pub warn_at_hours: u32,
}
