// ── Aggregate snapshot ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::bus::{BusId, BusState};
use super::system::SystemInfo;

/// The in-memory aggregate of system and per-bus state.
///
/// Owned by the [`SnapshotStore`](crate::SnapshotStore); consumers only
/// ever see it behind an `Arc`, so every read is a consistent point-in-time
/// view. Each bus slice is replaced atomically, never field-by-field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceSnapshot {
    pub system: SystemInfo,
    pub buses: [BusState; 2],
    /// When the last poll cycle completed (successfully or not).
    pub last_refresh: Option<DateTime<Utc>>,
}

impl DeviceSnapshot {
    pub fn bus(&self, id: BusId) -> &BusState {
        &self.buses[id.index()]
    }

    pub(crate) fn bus_mut(&mut self, id: BusId) -> &mut BusState {
        &mut self.buses[id.index()]
    }
}
