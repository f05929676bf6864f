// Bus endpoints
//
// Per-bus status reads and the power/brightness/color command POSTs.
// The firmware expects form-encoded bodies for all three commands.

use tracing::debug;

use crate::client::BridgeClient;
use crate::error::Error;
use crate::models::BusStatus;

impl BridgeClient {
    /// Get the status of one bus.
    ///
    /// `GET /api/bus/{id}/status`
    pub async fn get_bus_status(&self, bus_id: u8) -> Result<BusStatus, Error> {
        let url = self.bus_url(bus_id, "status")?;
        debug!(bus_id, "fetching bus status");
        self.get(url).await
    }

    /// Switch a bus on or off.
    ///
    /// `POST /api/bus/{id}/power` with `state=true|false`
    pub async fn set_power(&self, bus_id: u8, on: bool) -> Result<(), Error> {
        let url = self.bus_url(bus_id, "power")?;
        debug!(bus_id, on, "setting bus power");
        let _: serde_json::Value = self
            .post_form(url, &[("state", if on { "true" } else { "false" })])
            .await?;
        Ok(())
    }

    /// Set bus brightness on the device scale (0-254).
    ///
    /// `POST /api/bus/{id}/brightness` with `value={0..254}`
    ///
    /// Scale conversion from the consumer-facing 0-255 range happens in
    /// `repelbridge-core`; this method sends exactly what it is given.
    pub async fn set_brightness(&self, bus_id: u8, value: u8) -> Result<(), Error> {
        let url = self.bus_url(bus_id, "brightness")?;
        debug!(bus_id, value, "setting bus brightness");
        let _: serde_json::Value = self
            .post_form(url, &[("value", value.to_string())])
            .await?;
        Ok(())
    }

    /// Set the bus RGB color.
    ///
    /// `POST /api/bus/{id}/color` with `red`, `green`, `blue` each 0-255
    pub async fn set_color(&self, bus_id: u8, red: u8, green: u8, blue: u8) -> Result<(), Error> {
        let url = self.bus_url(bus_id, "color")?;
        debug!(bus_id, red, green, blue, "setting bus color");
        let _: serde_json::Value = self
            .post_form(
                url,
                &[
                    ("red", red.to_string()),
                    ("green", green.to_string()),
                    ("blue", blue.to_string()),
                ],
            )
            .await?;
        Ok(())
    }
}
