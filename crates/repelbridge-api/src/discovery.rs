// mDNS discovery
//
// Controllers announce themselves as `_repelbridge._tcp.local.`. Browsing
// is best-effort: when the network swallows multicast the caller falls
// back to a manually configured host.

use std::time::Duration;

use mdns_sd::{ServiceDaemon, ServiceEvent};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Error;

/// The mDNS service type the controller firmware registers.
pub const SERVICE_TYPE: &str = "_repelbridge._tcp.local.";

/// A controller found on the local network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredBridge {
    /// Instance name with the service-type suffix stripped.
    pub name: String,
    /// First resolved address, as a string usable in `BridgeClient::new`.
    pub host: String,
    pub port: u16,
}

/// Browse for RepelBridge controllers until `timeout` elapses.
///
/// Returns every distinct controller resolved within the window; an empty
/// vec means nothing answered, which is not an error -- manual host entry
/// is the fallback.
pub async fn discover(timeout: Duration) -> Result<Vec<DiscoveredBridge>, Error> {
    let daemon = ServiceDaemon::new().map_err(|e| Error::Discovery {
        message: format!("failed to start mDNS daemon: {e}"),
    })?;
    let receiver = daemon.browse(SERVICE_TYPE).map_err(|e| Error::Discovery {
        message: format!("failed to browse {SERVICE_TYPE}: {e}"),
    })?;

    let mut found: Vec<DiscoveredBridge> = Vec::new();

    let collect = async {
        while let Ok(event) = receiver.recv_async().await {
            match event {
                ServiceEvent::ServiceResolved(svc_info) => {
                    let Some(addr) = svc_info.get_addresses().iter().next() else {
                        debug!(fullname = svc_info.get_fullname(), "resolved without address");
                        continue;
                    };
                    let bridge = DiscoveredBridge {
                        name: svc_info
                            .get_fullname()
                            .trim_end_matches(SERVICE_TYPE)
                            .trim_end_matches('.')
                            .to_owned(),
                        host: addr.to_string(),
                        port: svc_info.get_port(),
                    };
                    if !found.contains(&bridge) {
                        info!(name = %bridge.name, host = %bridge.host, "discovered controller");
                        found.push(bridge);
                    }
                }
                ServiceEvent::SearchStopped(_) => break,
                other => debug!(?other, "mdns event"),
            }
        }
    };

    // Run out the clock; the browse itself stays open until we stop it.
    let _ = tokio::time::timeout(timeout, collect).await;

    let _ = daemon.stop_browse(SERVICE_TYPE);
    let _ = daemon.shutdown();

    Ok(found)
}
