// System endpoint
//
// Controller-level status: WiFi link, uptime, device identity.

use tracing::debug;

use crate::client::BridgeClient;
use crate::error::Error;
use crate::models::SystemStatus;

impl BridgeClient {
    /// Get controller-wide status.
    ///
    /// `GET /api/system/status`
    ///
    /// This call doubles as the reachability check: if it fails with a
    /// connection-level error the whole device is treated as gone, not
    /// just one bus.
    pub async fn get_system_status(&self) -> Result<SystemStatus, Error> {
        let url = self.api_url("system/status")?;
        debug!("fetching system status");
        self.get(url).await
    }
}
