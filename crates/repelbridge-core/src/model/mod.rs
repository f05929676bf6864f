// ── Domain model ──
//
// Canonical representation of controller state, independent of the wire
// payloads in repelbridge-api. Consumers (CLI, host-framework adapters)
// depend on these types only.

pub mod availability;
pub mod bus;
pub mod snapshot;
pub mod system;

pub use availability::Availability;
pub use bus::{
    AUTO_SHUTOFF_MAX_MINUTES, BRIGHTNESS_DEVICE_MAX, BRIGHTNESS_INPUT_MAX, BusId, BusState,
    RgbColor, WARN_AT_MAX_HOURS, WARN_AT_MIN_HOURS,
};
pub use snapshot::DeviceSnapshot;
pub use system::{SystemInfo, WifiStatus};
