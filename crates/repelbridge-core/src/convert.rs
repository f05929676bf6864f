// ── Wire → domain conversion ──
//
// Translates repelbridge-api payloads into the domain model. Kept out of
// the model files so those stay free of wire-format concerns.

use std::time::Duration;

use repelbridge_api::models::{AutoShutoff, BusStatus, CartridgeStatus, SystemStatus, WarnAt};

use crate::model::{SystemInfo, WifiStatus};

/// The four per-bus payloads fetched together in one poll. A bus slice is
/// only updated when all four arrive, so a snapshot can never mix response
/// bodies from different cycles.
#[derive(Debug, Clone)]
pub struct BusReadings {
    pub status: BusStatus,
    pub cartridge: CartridgeStatus,
    pub auto_shutoff: AutoShutoff,
    pub warn_at: WarnAt,
}

/// Map the system payload to domain values. Availability is the store's
/// concern; it is left at its default here.
pub(crate) fn system_info_from_wire(wire: SystemStatus) -> SystemInfo {
    SystemInfo {
        wifi: if wire.wifi_connected {
            WifiStatus::Connected
        } else {
            WifiStatus::Disconnected
        },
        wifi_ssid: wire.wifi_ssid,
        wifi_ip: wire.wifi_ip,
        uptime: Duration::from_millis(wire.uptime_ms),
        device_name: wire.device_name,
        firmware_version: wire.firmware_version,
        model: wire.model,
        free_heap: wire.free_heap,
        ..SystemInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_info_maps_wifi_and_uptime() {
        let wire = SystemStatus {
            device_name: "RepelBridge".into(),
            firmware_version: Some("1.4.2".into()),
            model: None,
            wifi_connected: true,
            wifi_ssid: Some("garage".into()),
            wifi_ip: Some("192.168.1.40".into()),
            uptime_ms: 90_000,
            free_heap: Some(100_000),
        };

        let info = system_info_from_wire(wire);

        assert_eq!(info.wifi, WifiStatus::Connected);
        assert_eq!(info.uptime, Duration::from_secs(90));
        assert_eq!(info.device_name, "RepelBridge");
    }
}
