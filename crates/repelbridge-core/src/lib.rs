// repelbridge-core: Domain layer between repelbridge-api and consumers.
//
// Owns the polled device snapshot, the per-bus availability state machine,
// and the command dispatch path (validate, POST, targeted refresh).

pub mod bridge;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bridge::{Bridge, ConnectionState};
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use store::SnapshotStore;

pub use model::{
    Availability, BusId, BusState, DeviceSnapshot, RgbColor, SystemInfo, WifiStatus,
};
