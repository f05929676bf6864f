//! Clap derive structures for the `repelbridge` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// repelbridge -- CLI for RepelBridge pest-control controllers
#[derive(Debug, Parser)]
#[command(
    name = "repelbridge",
    version,
    about = "Control RepelBridge repeller buses from the command line",
    long_about = "A CLI for RepelBridge controllers: poll device and bus status,\n\
        switch repeller buses, tune brightness and color, and manage\n\
        cartridge tracking over the controller's REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller host (IP or mDNS hostname, overrides config file)
    #[arg(long, short = 'H', env = "REPELBRIDGE_HOST", global = true)]
    pub host: Option<String>,

    /// Controller HTTP port
    #[arg(long, env = "REPELBRIDGE_PORT", global = true)]
    pub port: Option<u16>,

    /// Request timeout in seconds
    #[arg(long, env = "REPELBRIDGE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "REPELBRIDGE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find controllers on the local network via mDNS
    Discover(DiscoverArgs),

    /// Show controller and bus status
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Poll continuously and print state changes
    Watch,

    /// Switch a bus on or off
    Power(PowerArgs),

    /// Set bus LED brightness (0-255)
    Brightness(BrightnessArgs),

    /// Set bus LED color
    Color(ColorArgs),

    /// Set the auto-shutoff timer
    Shutoff(ShutoffArgs),

    /// Set the cartridge warning threshold
    WarnAt(WarnAtArgs),

    /// Zero the cartridge runtime counter after a cartridge swap
    ResetCartridge(BusArg),

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared argument groups ───────────────────────────────────────────

/// A bare bus selector, used by commands that take nothing else.
#[derive(Debug, Args)]
pub struct BusArg {
    /// Bus number (0 or 1)
    pub bus: u8,
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// How long to browse for controllers, in seconds
    #[arg(long, default_value = "5")]
    pub timeout: u64,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Show only this bus (0 or 1)
    #[arg(long, short = 'b')]
    pub bus: Option<u8>,
}

#[derive(Debug, Args)]
pub struct PowerArgs {
    /// Bus number (0 or 1)
    pub bus: u8,

    /// Desired power state
    pub state: PowerState,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PowerState {
    On,
    Off,
}

#[derive(Debug, Args)]
pub struct BrightnessArgs {
    /// Bus number (0 or 1)
    pub bus: u8,

    /// Brightness, 0-255 (255 maps to the device maximum)
    pub value: u16,
}

#[derive(Debug, Args)]
pub struct ColorArgs {
    /// Bus number (0 or 1)
    pub bus: u8,

    /// Red component (0-255)
    pub red: u8,

    /// Green component (0-255)
    pub green: u8,

    /// Blue component (0-255)
    pub blue: u8,
}

#[derive(Debug, Args)]
pub struct ShutoffArgs {
    /// Bus number (0 or 1)
    pub bus: u8,

    /// Minutes until automatic shutoff; 0 disables the timer (max 960)
    pub minutes: u32,
}

#[derive(Debug, Args)]
pub struct WarnAtArgs {
    /// Bus number (0 or 1)
    pub bus: u8,

    /// Cartridge runtime hours at which to warn (1-1000)
    pub hours: u32,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with the given controller host
    Init {
        /// Controller host to store
        host: String,

        /// Controller HTTP port to store
        #[arg(long, default_value = "80")]
        port: u16,
    },

    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
