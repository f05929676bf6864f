// Settings endpoints
//
// Auto-shutoff timer and cartridge warning threshold. Unlike the command
// POSTs these take JSON bodies.

use serde_json::json;
use tracing::debug;

use crate::client::BridgeClient;
use crate::error::Error;
use crate::models::{AutoShutoff, WarnAt};

impl BridgeClient {
    /// Get the auto-shutoff timer for one bus.
    ///
    /// `GET /api/bus/{id}/auto_shutoff`
    pub async fn get_auto_shutoff(&self, bus_id: u8) -> Result<AutoShutoff, Error> {
        let url = self.bus_url(bus_id, "auto_shutoff")?;
        debug!(bus_id, "fetching auto shutoff");
        self.get(url).await
    }

    /// Set the auto-shutoff timer in minutes (0 disables it).
    ///
    /// `POST /api/bus/{id}/auto_shutoff` with `{"minutes": n}`
    pub async fn set_auto_shutoff(&self, bus_id: u8, minutes: u32) -> Result<(), Error> {
        let url = self.bus_url(bus_id, "auto_shutoff")?;
        debug!(bus_id, minutes, "setting auto shutoff");
        let _: serde_json::Value = self.post_json(url, &json!({ "minutes": minutes })).await?;
        Ok(())
    }

    /// Get the cartridge warning threshold for one bus.
    ///
    /// `GET /api/bus/{id}/warn_at`
    pub async fn get_warn_at(&self, bus_id: u8) -> Result<WarnAt, Error> {
        let url = self.bus_url(bus_id, "warn_at")?;
        debug!(bus_id, "fetching warn threshold");
        self.get(url).await
    }

    /// Set the cartridge warning threshold in runtime hours.
    ///
    /// `POST /api/bus/{id}/warn_at` with `{"hours": n}`
    pub async fn set_warn_at(&self, bus_id: u8, hours: u32) -> Result<(), Error> {
        let url = self.bus_url(bus_id, "warn_at")?;
        debug!(bus_id, hours, "setting warn threshold");
        let _: serde_json::Value = self.post_json(url, &json!({ "hours": hours })).await?;
        Ok(())
    }
}
