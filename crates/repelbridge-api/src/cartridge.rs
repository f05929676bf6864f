// Cartridge endpoints
//
// Consumable tracking: runtime counter reads and the reset command.

use tracing::debug;

use crate::client::BridgeClient;
use crate::error::Error;
use crate::models::CartridgeStatus;

impl BridgeClient {
    /// Get cartridge usage for one bus.
    ///
    /// `GET /api/bus/{id}/cartridge`
    pub async fn get_cartridge_status(&self, bus_id: u8) -> Result<CartridgeStatus, Error> {
        let url = self.bus_url(bus_id, "cartridge")?;
        debug!(bus_id, "fetching cartridge status");
        self.get(url).await
    }

    /// Zero the cartridge runtime counter after a cartridge swap.
    ///
    /// `POST /api/bus/{id}/cartridge/reset`
    ///
    /// Not idempotent from the user's point of view (resetting twice after
    /// one swap discards real usage), so callers must never auto-retry.
    pub async fn reset_cartridge(&self, bus_id: u8) -> Result<(), Error> {
        let url = self.bus_url(bus_id, "cartridge/reset")?;
        debug!(bus_id, "resetting cartridge counter");
        let _: serde_json::Value = self.post_empty(url).await?;
        Ok(())
    }
}
