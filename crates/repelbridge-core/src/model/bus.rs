// ── Per-bus state and availability ──
//
// One `BusState` per RS-485 segment. Each slice is fetched independently
// and marked stale/offline independently; a degraded bus keeps its
// last-known values so consumers can distinguish "off" from "unknown".

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::availability::Availability;
use crate::convert::BusReadings;

// ── Limits ───────────────────────────────────────────────────────────

/// Consumer-facing brightness ceiling.
pub const BRIGHTNESS_INPUT_MAX: u16 = 255;
/// The device rejects brightness above 254.
pub const BRIGHTNESS_DEVICE_MAX: u8 = 254;
/// 16 hours, the firmware's auto-shutoff cap.
pub const AUTO_SHUTOFF_MAX_MINUTES: u32 = 960;
pub const WARN_AT_MIN_HOURS: u32 = 1;
pub const WARN_AT_MAX_HOURS: u32 = 1000;

// ── Identity ─────────────────────────────────────────────────────────

/// One of the controller's two repeller buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BusId {
    Bus0,
    Bus1,
}

impl BusId {
    pub const ALL: [BusId; 2] = [BusId::Bus0, BusId::Bus1];

    /// Numeric id as used in URL paths.
    pub fn id(self) -> u8 {
        match self {
            Self::Bus0 => 0,
            Self::Bus1 => 1,
        }
    }

    pub fn index(self) -> usize {
        usize::from(self.id())
    }

    /// The other bus.
    pub fn sibling(self) -> Self {
        match self {
            Self::Bus0 => Self::Bus1,
            Self::Bus1 => Self::Bus0,
        }
    }
}

impl TryFrom<u8> for BusId {
    type Error = crate::BridgeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Bus0),
            1 => Ok(Self::Bus1),
            other => Err(crate::BridgeError::Validation {
                field: "bus".into(),
                reason: format!("expected 0 or 1, got {other}"),
            }),
        }
    }
}

impl std::fmt::Display for BusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ── Color ────────────────────────────────────────────────────────────

/// RGB color, each component 0-255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

// ── Bus state ────────────────────────────────────────────────────────

/// Last-known state of one bus.
///
/// Values survive poll failures; check [`available`](Self::available)
/// before trusting them to be current.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BusState {
    pub availability: Availability,
    pub consecutive_failures: u32,
    pub powered: bool,
    /// Device-scale brightness, 0-254.
    pub brightness: u8,
    pub color: RgbColor,
    pub repeller_count: u32,
    /// 0 means the auto-shutoff timer is disabled.
    pub auto_shutoff_minutes: u32,
    pub warn_at_hours: u32,
    pub runtime_hours: u32,
    /// Remaining cartridge life, 0-100.
    pub percent_left: u8,
    /// Firmware-internal state label, if the device reports one.
    pub state_label: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl BusState {
    /// Whether the last poll of this bus succeeded. Distinct from
    /// `powered`: a powered-off bus that answers polls is available.
    pub fn available(&self) -> bool {
        self.availability == Availability::Online
    }

    /// Cartridge is past its warning threshold.
    pub fn cartridge_low(&self) -> bool {
        self.runtime_hours >= self.warn_at_hours && self.warn_at_hours > 0
    }

    /// Apply a full set of fresh readings. All fields of the slice change
    /// together so a reader can never observe a half-applied bus.
    pub(crate) fn apply(&mut self, readings: &BusReadings, now: DateTime<Utc>) {
        self.powered = readings.status.powered;
        self.brightness = readings.status.brightness.min(BRIGHTNESS_DEVICE_MAX);
        self.color = RgbColor::new(
            readings.status.color.red,
            readings.status.color.green,
            readings.status.color.blue,
        );
        self.repeller_count = readings.status.repeller_count;
        self.state_label = readings.status.state.clone();
        self.runtime_hours = readings.cartridge.runtime_hours;
        self.percent_left = readings.cartridge.percent_left.min(100);
        self.auto_shutoff_minutes = readings.auto_shutoff.auto_shutoff_minutes;
        self.warn_at_hours = readings.warn_at.warn_at_hours;
        self.last_updated = Some(now);
        self.consecutive_failures = 0;
        self.availability = Availability::Online;
    }

    /// Advance the availability machine after a failed poll of this bus.
    /// Previous values are retained.
    pub(crate) fn record_failure(&mut self, offline_threshold: u32) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.availability =
            Availability::after_failures(self.consecutive_failures, offline_threshold);
    }
}

// ── Brightness scale ─────────────────────────────────────────────────

/// Convert a consumer brightness (0-255) to the device scale (0-254).
///
/// The only lossy input is 255, which clamps to 254; a set/get round trip
/// is therefore always within one unit.
pub(crate) fn brightness_to_device(value: u16) -> u8 {
    debug_assert!(value <= BRIGHTNESS_INPUT_MAX);
    u8::try_from(value.min(u16::from(BRIGHTNESS_DEVICE_MAX))).unwrap_or(BRIGHTNESS_DEVICE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use repelbridge_api::models::{AutoShutoff, BusStatus, CartridgeStatus, WarnAt, WireColor};

    fn readings(powered: bool, brightness: u8, runtime_hours: u32) -> BusReadings {
        BusReadings {
            status: BusStatus {
                state: Some("running".into()),
                powered,
                brightness,
                color: WireColor {
                    red: 255,
                    green: 0,
                    blue: 0,
                },
                repeller_count: 2,
            },
            cartridge: CartridgeStatus {
                runtime_hours,
                percent_left: 80,
                active_seconds: None,
                auto_shutoff_seconds: None,
            },
            auto_shutoff: AutoShutoff {
                auto_shutoff_minutes: 120,
            },
            warn_at: WarnAt { warn_at_hours: 97 },
        }
    }

    #[test]
    fn brightness_round_trips_within_one_unit() {
        for v in 0..=BRIGHTNESS_INPUT_MAX {
            let device = brightness_to_device(v);
            // Read path passes the device value through unchanged.
            assert!(u16::from(device).abs_diff(v) <= 1, "v={v} device={device}");
        }
    }

    #[test]
    fn single_failure_goes_stale_and_keeps_values() {
        let mut bus = BusState::default();
        bus.apply(&readings(true, 200, 42), Utc::now());
        assert!(bus.available());

        bus.record_failure(3);

        assert_eq!(bus.availability, Availability::Stale);
        assert!(!bus.available());
        // Last-known values survive.
        assert!(bus.powered);
        assert_eq!(bus.brightness, 200);
        assert_eq!(bus.runtime_hours, 42);
    }

    #[test]
    fn offline_after_threshold_without_flapping() {
        let mut bus = BusState::default();
        bus.apply(&readings(true, 10, 0), Utc::now());

        bus.record_failure(3);
        bus.record_failure(3);
        assert_eq!(bus.availability, Availability::Stale);

        bus.record_failure(3);
        assert_eq!(bus.availability, Availability::Offline);

        // Further failures stay Offline -- no flapping.
        bus.record_failure(3);
        bus.record_failure(3);
        assert_eq!(bus.availability, Availability::Offline);
        assert_eq!(bus.consecutive_failures, 5);
    }

    #[test]
    fn one_success_recovers_from_offline() {
        let mut bus = BusState::default();
        for _ in 0..5 {
            bus.record_failure(3);
        }
        assert_eq!(bus.availability, Availability::Offline);

        bus.apply(&readings(false, 0, 7), Utc::now());

        assert_eq!(bus.availability, Availability::Online);
        assert_eq!(bus.consecutive_failures, 0);
        assert!(!bus.powered);
    }

    #[test]
    fn available_is_distinct_from_powered() {
        let mut bus = BusState::default();
        bus.apply(&readings(false, 0, 0), Utc::now());
        assert!(bus.available());
        assert!(!bus.powered);
    }

    #[test]
    fn cartridge_low_threshold() {
        let mut bus = BusState::default();
        bus.apply(&readings(true, 10, 96), Utc::now());
        assert!(!bus.cartridge_low());

        bus.apply(&readings(true, 10, 97), Utc::now());
        assert!(bus.cartridge_low());
    }

    #[test]
    fn bus_id_round_trip() {
        assert_eq!(BusId::try_from(0).unwrap(), BusId::Bus0);
        assert_eq!(BusId::try_from(1).unwrap(), BusId::Bus1);
        assert!(BusId::try_from(2).is_err());
        assert_eq!(BusId::Bus0.sibling(), BusId::Bus1);
    }
}
