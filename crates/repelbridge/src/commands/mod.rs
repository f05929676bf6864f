//! Command dispatch: bridges CLI args -> core Bridge calls -> output.

pub mod cartridge;
pub mod config_cmd;
pub mod control;
pub mod discover;
pub mod settings_cmd;
pub mod status;

use repelbridge_core::{Bridge, BusId};

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let (mut bridge_config, file_config) = config::resolve_bridge_config(global)?;
    if matches!(cmd, Command::Watch) {
        // Watch is the one command that wants the background poll task.
        bridge_config.poll_interval =
            std::time::Duration::from_secs(file_config.poll_interval_secs.max(1));
    }
    let host = bridge_config.host.clone();
    let bridge = Bridge::new(bridge_config).map_err(CliError::from)?;

    tracing::debug!(command = ?cmd, host = %host, "dispatching command");

    let result = match cmd {
        Command::Status(args) => status::handle(&bridge, &args, global).await,
        Command::Watch => status::watch(&bridge, global).await,
        Command::Power(args) => control::power(&bridge, &args, global).await,
        Command::Brightness(args) => control::brightness(&bridge, &args, global).await,
        Command::Color(args) => control::color(&bridge, &args, global).await,
        Command::Shutoff(args) => settings_cmd::shutoff(&bridge, &args, global).await,
        Command::WarnAt(args) => settings_cmd::warn_at(&bridge, &args, global).await,
        Command::ResetCartridge(args) => cartridge::reset(&bridge, &args, global).await,
        // Discover, Config, and Completions are handled before dispatch
        Command::Discover(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    };

    result.map_err(|e| e.with_host(&host))
}

/// Parse a user-supplied bus number.
pub(crate) fn parse_bus(bus: u8) -> Result<BusId, CliError> {
    BusId::try_from(bus).map_err(CliError::from)
}
