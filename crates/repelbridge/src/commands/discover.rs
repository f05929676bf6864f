//! mDNS discovery handler.

use std::time::Duration;

use tabled::Tabled;

use repelbridge_api::discovery::{self, DiscoveredBridge};

use crate::cli::{DiscoverArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct BridgeRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Port")]
    port: u16,
}

impl From<&DiscoveredBridge> for BridgeRow {
    fn from(b: &DiscoveredBridge) -> Self {
        Self {
            name: b.name.clone(),
            host: b.host.clone(),
            port: b.port,
        }
    }
}

pub async fn handle(args: &DiscoverArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let found = discovery::discover(Duration::from_secs(args.timeout)).await?;

    if found.is_empty() {
        output::print_output("no controllers found", global.quiet);
        return Ok(());
    }

    let out = output::render(
        &global.output,
        &found,
        || {
            let rows: Vec<BridgeRow> = found.iter().map(BridgeRow::from).collect();
            output::table(&rows)
        },
        || {
            found
                .iter()
                .map(|b| b.host.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
