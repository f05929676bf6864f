//! Auto-shutoff and cartridge warning threshold handlers.

use repelbridge_core::Bridge;

use crate::cli::{GlobalOpts, ShutoffArgs, WarnAtArgs};
use crate::error::CliError;
use crate::output;

use super::parse_bus;

pub async fn shutoff(
    bridge: &Bridge,
    args: &ShutoffArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bus = parse_bus(args.bus)?;

    bridge.set_auto_shutoff(bus, args.minutes).await?;

    let desc = if args.minutes == 0 {
        "auto-shutoff disabled".to_owned()
    } else {
        format!("auto-shutoff after {} minutes", args.minutes)
    };
    output::print_output(&format!("bus {bus}: {desc}"), global.quiet);
    Ok(())
}

pub async fn warn_at(
    bridge: &Bridge,
    args: &WarnAtArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bus = parse_bus(args.bus)?;

    bridge.set_cartridge_warning(bus, args.hours).await?;

    output::print_output(
        &format!("bus {bus}: cartridge warning at {} hours", args.hours),
        global.quiet,
    );
    Ok(())
}
