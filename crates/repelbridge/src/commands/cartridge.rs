//! Cartridge reset handler.

use repelbridge_core::Bridge;

use crate::cli::{BusArg, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::parse_bus;

/// Zero the cartridge runtime counter. Requires `--yes`: resetting twice
/// after a single swap discards real usage data, and the controller offers
/// no undo.
pub async fn reset(bridge: &Bridge, args: &BusArg, global: &GlobalOpts) -> Result<(), CliError> {
    let bus = parse_bus(args.bus)?;

    if !global.yes {
        return Err(CliError::ConfirmationRequired {
            action: format!("reset-cartridge (bus {bus})"),
        });
    }

    bridge.reset_cartridge(bus).await?;

    output::print_output(&format!("bus {bus}: cartridge counter reset"), global.quiet);
    Ok(())
}
