//! Power, brightness, and color command handlers.

use repelbridge_core::{Bridge, RgbColor};

use crate::cli::{BrightnessArgs, ColorArgs, GlobalOpts, PowerArgs, PowerState};
use crate::error::CliError;
use crate::output;

use super::parse_bus;

pub async fn power(bridge: &Bridge, args: &PowerArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let bus = parse_bus(args.bus)?;
    let on = matches!(args.state, PowerState::On);

    bridge.set_power(bus, on).await?;

    output::print_output(
        &format!("bus {bus}: power {}", if on { "on" } else { "off" }),
        global.quiet,
    );
    Ok(())
}

pub async fn brightness(
    bridge: &Bridge,
    args: &BrightnessArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bus = parse_bus(args.bus)?;

    bridge.set_brightness(bus, args.value).await?;

    // Report what the device actually stored, not the raw input.
    let applied = bridge.snapshot().bus(bus).brightness;
    output::print_output(&format!("bus {bus}: brightness {applied}"), global.quiet);
    Ok(())
}

pub async fn color(bridge: &Bridge, args: &ColorArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let bus = parse_bus(args.bus)?;
    let color = RgbColor::new(args.red, args.green, args.blue);

    bridge.set_color(bus, color).await?;

    output::print_output(&format!("bus {bus}: color {color}"), global.quiet);
    Ok(())
}
