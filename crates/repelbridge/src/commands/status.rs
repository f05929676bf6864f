//! Status and watch command handlers.

use tabled::Tabled;

use repelbridge_core::{Bridge, BusId, BusState, DeviceSnapshot};

use crate::cli::{GlobalOpts, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::parse_bus;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct BusRow {
    #[tabled(rename = "Bus")]
    bus: u8,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Brightness")]
    brightness: u8,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Repellers")]
    repellers: u32,
    #[tabled(rename = "Cartridge")]
    cartridge: String,
    #[tabled(rename = "Runtime")]
    runtime: String,
    #[tabled(rename = "Shutoff")]
    shutoff: String,
}

fn bus_row(id: BusId, bus: &BusState) -> BusRow {
    BusRow {
        bus: id.id(),
        state: bus.availability.to_string(),
        power: if bus.powered { "on" } else { "off" }.into(),
        brightness: bus.brightness,
        color: bus.color.to_string(),
        repellers: bus.repeller_count,
        cartridge: format!(
            "{}%{}",
            bus.percent_left,
            if bus.cartridge_low() { " (low!)" } else { "" }
        ),
        runtime: format!("{}h", bus.runtime_hours),
        shutoff: if bus.auto_shutoff_minutes == 0 {
            "off".into()
        } else {
            format!("{}m", bus.auto_shutoff_minutes)
        },
    }
}

// ── Rendering ───────────────────────────────────────────────────────

fn format_snapshot(snap: &DeviceSnapshot) -> String {
    let sys = &snap.system;
    let mut out = String::new();

    out.push_str(&format!(
        "{} ({}, wifi: {}",
        if sys.device_name.is_empty() {
            "RepelBridge"
        } else {
            sys.device_name.as_str()
        },
        sys.availability,
        sys.wifi,
    ));
    if let Some(ref ip) = sys.wifi_ip {
        out.push_str(&format!(", {ip}"));
    }
    out.push_str(&format!(
        ", up {})",
        humantime::format_duration(std::time::Duration::from_secs(sys.uptime.as_secs()))
    ));
    if let Some(refreshed) = snap.last_refresh {
        out.push_str(&format!(
            "  [refreshed {}]",
            refreshed.with_timezone(&chrono::Local).format("%H:%M:%S")
        ));
    }
    out.push('\n');

    let rows: Vec<BusRow> = BusId::ALL
        .into_iter()
        .map(|id| bus_row(id, snap.bus(id)))
        .collect();
    out.push_str(&output::table(&rows));
    out
}

fn render_snapshot(format: &crate::cli::OutputFormat, snap: &DeviceSnapshot) -> String {
    output::render(
        format,
        snap,
        || format_snapshot(snap),
        || snap.system.device_name.clone(),
    )
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    bridge: &Bridge,
    args: &StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snap = bridge.poll().await?;

    let out = if let Some(bus) = args.bus {
        let id = parse_bus(bus)?;
        let state = snap.bus(id);
        output::render(
            &global.output,
            state,
            || output::table(&[bus_row(id, state)]),
            || state.availability.to_string(),
        )
    } else {
        render_snapshot(&global.output, snap.as_ref())
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

/// Poll on the configured interval and reprint the snapshot whenever it
/// changes, until interrupted.
pub async fn watch(bridge: &Bridge, global: &GlobalOpts) -> Result<(), CliError> {
    bridge.connect().await?;
    let mut rx = bridge.store().subscribe();

    // Initial state, then updates as they land.
    let initial = rx.borrow_and_update().clone();
    output::print_output(&render_snapshot(&global.output, &initial), global.quiet);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = rx.borrow_and_update().clone();
                output::print_output(&render_snapshot(&global.output, &snap), global.quiet);
            }
        }
    }

    bridge.shutdown().await;
    Ok(())
}
