// ── Bridge abstraction ──
//
// Full lifecycle management for one RepelBridge controller connection:
// the scheduled poll loop, per-bus fetch-and-reconcile, and the command
// dispatch path (validate, POST, targeted refresh).

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use repelbridge_api::transport::TransportConfig;
use repelbridge_api::{BridgeClient, Error as ApiError};

use crate::config::BridgeConfig;
use crate::convert::{BusReadings, system_info_from_wire};
use crate::error::BridgeError;
use crate::model::{
    AUTO_SHUTOFF_MAX_MINUTES, BRIGHTNESS_INPUT_MAX, BusId, DeviceSnapshot, RgbColor,
    WARN_AT_MAX_HOURS, WARN_AT_MIN_HOURS, bus::brightness_to_device,
};
use crate::store::SnapshotStore;

// ── ConnectionState ──────────────────────────────────────────────────

/// Whole-device connection state observable by consumers.
///
/// Per-slice degradation lives in [`Availability`](crate::Availability);
/// this tracks the integration as a whole -- `Unreachable` means the system
/// endpoint itself cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Unreachable,
}

// ── Bridge ───────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<BridgeInner>`. Owns the snapshot store and
/// the background poll task; exposes command methods that validate input,
/// POST to the device, and refresh the affected bus immediately.
#[derive(Clone)]
pub struct Bridge {
    inner: Arc<BridgeInner>,
}

struct BridgeInner {
    config: BridgeConfig,
    client: BridgeClient,
    store: SnapshotStore,
    connection_state: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Bridge {
    /// Create a new Bridge from configuration. Does NOT touch the network --
    /// call [`connect()`](Self::connect) to verify reachability and start
    /// the poll task, or drive [`poll()`](Self::poll) manually.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = BridgeClient::new(&config.host, config.port, &transport)?;
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);

        Ok(Self {
            inner: Arc::new(BridgeInner {
                config,
                client,
                store: SnapshotStore::new(),
                connection_state,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the bridge configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &SnapshotStore {
        &self.inner.store
    }

    /// Current snapshot (shorthand for `store().snapshot()`).
    pub fn snapshot(&self) -> Arc<DeviceSnapshot> {
        self.inner.store.snapshot()
    }

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    // ── Connection lifecycle ─────────────────────────────────────────

    /// Connect to the controller.
    ///
    /// Performs an initial poll (failure of the system endpoint here means
    /// the whole integration is unavailable and is returned as an error)
    /// and spawns the scheduled poll task unless the interval is zero.
    pub async fn connect(&self) -> Result<(), BridgeError> {
        self.inner
            .connection_state
            .send_replace(ConnectionState::Connecting);

        self.poll().await?;

        if !self.inner.config.poll_interval.is_zero() {
            let bridge = self.clone();
            let cancel = self.inner.cancel.clone();
            let interval = self.inner.config.poll_interval;
            let mut handles = self.inner.task_handles.lock().await;
            handles.push(tokio::spawn(poll_task(bridge, interval, cancel)));
        }

        info!(host = %self.inner.config.host, "connected to controller");
        Ok(())
    }

    /// Stop the poll task and mark the bridge disconnected.
    ///
    /// In-flight requests are cancelled by dropping the task; device-side
    /// state is authoritative, so partially-applied commands are not
    /// rolled back.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        self.inner
            .connection_state
            .send_replace(ConnectionState::Disconnected);
        debug!("bridge shut down");
    }

    // ── Polling ──────────────────────────────────────────────────────

    /// Run one full poll cycle and return the merged snapshot.
    ///
    /// The system endpoint and both buses are fetched concurrently; each
    /// bus may fail independently without affecting the other. Only
    /// whole-device unreachability (the system endpoint cannot be reached
    /// at the connection level) is returned as an error -- every other
    /// failure is folded into per-bus availability.
    pub async fn poll(&self) -> Result<Arc<DeviceSnapshot>, BridgeError> {
        let client = &self.inner.client;

        let (system_res, bus0_res, bus1_res) = tokio::join!(
            client.get_system_status(),
            self.fetch_bus(BusId::Bus0),
            self.fetch_bus(BusId::Bus1),
        );

        match system_res {
            Ok(wire) => {
                self.inner.store.apply_system(system_info_from_wire(wire));
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Connected);
            }
            Err(e) if e.is_unreachable() => {
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Unreachable);
                // Everything rides on the same socket; count the cycle
                // against all slices so they degrade rather than look
                // fresh.
                self.inner
                    .store
                    .record_system_failure(self.inner.config.offline_threshold);
                for bus in BusId::ALL {
                    self.record_bus_failure(bus);
                }
                return Err(BridgeError::from(e));
            }
            Err(e) => {
                // Device reachable but the system endpoint misbehaved;
                // keep the previous values and mark the slice degraded.
                warn!(error = %e, "system status fetch failed");
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Connected);
                self.inner
                    .store
                    .record_system_failure(self.inner.config.offline_threshold);
            }
        }

        for (bus, result) in BusId::ALL.into_iter().zip([bus0_res, bus1_res]) {
            match result {
                Ok(readings) => self.inner.store.apply_bus(bus, &readings),
                Err(e) => {
                    warn!(bus = %bus, error = %e, "bus fetch failed");
                    self.record_bus_failure(bus);
                }
            }
        }

        self.inner.store.mark_refreshed();
        Ok(self.inner.store.snapshot())
    }

    /// Fetch the four per-bus payloads in one go. All-or-nothing: a bus
    /// slice is only applied from a complete set of readings.
    async fn fetch_bus(&self, bus: BusId) -> Result<BusReadings, ApiError> {
        let client = &self.inner.client;
        let id = bus.id();

        let (status, cartridge, auto_shutoff, warn_at) = tokio::try_join!(
            client.get_bus_status(id),
            client.get_cartridge_status(id),
            client.get_auto_shutoff(id),
            client.get_warn_at(id),
        )?;

        Ok(BusReadings {
            status,
            cartridge,
            auto_shutoff,
            warn_at,
        })
    }

    fn record_bus_failure(&self, bus: BusId) {
        self.inner
            .store
            .record_bus_failure(bus, self.inner.config.offline_threshold);
    }

    /// Refresh a single bus after a successful command so dependent
    /// consumers see the change without waiting for the next cycle.
    async fn refresh_bus(&self, bus: BusId) -> Result<(), BridgeError> {
        match self.fetch_bus(bus).await {
            Ok(readings) => {
                self.inner.store.apply_bus(bus, &readings);
                Ok(())
            }
            Err(e) => {
                self.record_bus_failure(bus);
                Err(BridgeError::from(e))
            }
        }
    }

    // ── Commands ─────────────────────────────────────────────────────
    //
    // Each command validates locally first, POSTs, and refreshes the
    // affected bus. On HTTP failure the cached state is left untouched
    // and no retry is attempted (a duplicate cartridge reset would
    // discard real usage data).

    /// Switch a bus on or off.
    pub async fn set_power(&self, bus: BusId, on: bool) -> Result<(), BridgeError> {
        self.inner.client.set_power(bus.id(), on).await?;
        self.refresh_bus(bus).await
    }

    /// Set bus brightness on the consumer scale (0-255).
    ///
    /// 255 clamps to the device maximum of 254; anything above 255 is a
    /// validation error, rejected before any network call.
    pub async fn set_brightness(&self, bus: BusId, value: u16) -> Result<(), BridgeError> {
        if value > BRIGHTNESS_INPUT_MAX {
            return Err(BridgeError::validation(
                "brightness",
                format!("expected 0-{BRIGHTNESS_INPUT_MAX}, got {value}"),
            ));
        }
        self.inner
            .client
            .set_brightness(bus.id(), brightness_to_device(value))
            .await?;
        self.refresh_bus(bus).await
    }

    /// Set the bus RGB color.
    pub async fn set_color(&self, bus: BusId, color: RgbColor) -> Result<(), BridgeError> {
        self.inner
            .client
            .set_color(bus.id(), color.red, color.green, color.blue)
            .await?;
        self.refresh_bus(bus).await
    }

    /// Set the auto-shutoff timer in minutes (0 disables, max 16 hours).
    pub async fn set_auto_shutoff(&self, bus: BusId, minutes: u32) -> Result<(), BridgeError> {
        if minutes > AUTO_SHUTOFF_MAX_MINUTES {
            return Err(BridgeError::validation(
                "auto_shutoff",
                format!("expected 0-{AUTO_SHUTOFF_MAX_MINUTES} minutes, got {minutes}"),
            ));
        }
        self.inner.client.set_auto_shutoff(bus.id(), minutes).await?;
        self.refresh_bus(bus).await
    }

    /// Set the cartridge warning threshold in runtime hours.
    pub async fn set_cartridge_warning(&self, bus: BusId, hours: u32) -> Result<(), BridgeError> {
        if !(WARN_AT_MIN_HOURS..=WARN_AT_MAX_HOURS).contains(&hours) {
            return Err(BridgeError::validation(
                "warn_at",
                format!("expected {WARN_AT_MIN_HOURS}-{WARN_AT_MAX_HOURS} hours, got {hours}"),
            ));
        }
        self.inner.client.set_warn_at(bus.id(), hours).await?;
        self.refresh_bus(bus).await
    }

    /// Zero the cartridge runtime counter after a cartridge swap.
    pub async fn reset_cartridge(&self, bus: BusId) -> Result<(), BridgeError> {
        self.inner.client.reset_cartridge(bus.id()).await?;
        self.refresh_bus(bus).await
    }
}

// ── Background task ──────────────────────────────────────────────────

/// Poll the controller on a fixed interval until cancelled.
///
/// Poll errors here are whole-device unreachability already reflected in
/// the connection state; they are logged and the loop keeps going so the
/// next cycle can recover.
async fn poll_task(bridge: Bridge, interval: std::time::Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(interval);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = bridge.poll().await {
                    warn!(error = %e, "scheduled poll failed");
                }
            }
        }
    }
}
