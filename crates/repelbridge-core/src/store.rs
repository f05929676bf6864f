// ── Snapshot store ──
//
// Single owner of the mutable `DeviceSnapshot`. Writers replace the whole
// snapshot behind a `watch` channel, so readers either see the previous
// consistent state or the next one -- never a half-applied bus. Mutations
// also notify subscribers, which is what the CLI `watch` command and any
// host-framework adapter hang off.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::convert::BusReadings;
use crate::model::{Availability, BusId, DeviceSnapshot, SystemInfo};

/// Process-scoped store for the polled device snapshot.
pub struct SnapshotStore {
    tx: watch::Sender<Arc<DeviceSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(DeviceSnapshot::default()));
        Self { tx }
    }

    // ── Read access ──────────────────────────────────────────────────

    /// Current snapshot as an immutable point-in-time view.
    pub fn snapshot(&self) -> Arc<DeviceSnapshot> {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DeviceSnapshot>> {
        self.tx.subscribe()
    }

    /// When the last poll cycle completed, or `None` if never polled.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.tx.borrow().last_refresh
    }

    // ── Mutations (crate-internal, called by the Bridge only) ────────

    /// Replace the system slice wholesale from fresh readings.
    pub(crate) fn apply_system(&self, mut info: SystemInfo) {
        info.availability = Availability::Online;
        info.consecutive_failures = 0;
        self.mutate(|snap| snap.system = info);
    }

    /// Record a failed system poll, advancing its availability machine
    /// while retaining last-known values.
    pub(crate) fn record_system_failure(&self, offline_threshold: u32) {
        self.mutate(|snap| snap.system.record_failure(offline_threshold));
    }

    /// Apply a full set of readings to one bus. The other bus and the
    /// system slice are untouched.
    pub(crate) fn apply_bus(&self, bus: BusId, readings: &BusReadings) {
        let now = Utc::now();
        self.mutate(|snap| snap.bus_mut(bus).apply(readings, now));
    }

    /// Record a failed fetch of one bus, advancing its availability
    /// machine while retaining last-known values.
    pub(crate) fn record_bus_failure(&self, bus: BusId, offline_threshold: u32) {
        self.mutate(|snap| snap.bus_mut(bus).record_failure(offline_threshold));
    }

    /// Stamp the end of a poll cycle.
    pub(crate) fn mark_refreshed(&self) {
        let now = Utc::now();
        self.mutate(|snap| snap.last_refresh = Some(now));
    }

    fn mutate(&self, f: impl FnOnce(&mut DeviceSnapshot)) {
        self.tx.send_modify(|current| {
            let mut next = (**current).clone();
            f(&mut next);
            *current = Arc::new(next);
        });
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
