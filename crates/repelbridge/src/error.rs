//! CLI error types with miette diagnostics.
//!
//! Maps `BridgeError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use repelbridge_core::BridgeError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const DEVICE: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach controller at {host}")]
    #[diagnostic(
        code(repelbridge::connection_failed),
        help(
            "Check that the controller is powered and on the network.\n\
             Host: {host}\n\
             Try: repelbridge discover"
        )
    )]
    ConnectionFailed { host: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No controller host configured")]
    #[diagnostic(
        code(repelbridge::no_host),
        help(
            "Pass --host, set REPELBRIDGE_HOST, or create a config file with:\n\
             repelbridge config init <host>\n\
             Expected at: {path}"
        )
    )]
    NoHost { path: String },

    #[error(transparent)]
    #[diagnostic(code(repelbridge::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(repelbridge::validation))]
    Validation { field: String, reason: String },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Controller reported an error: {message}")]
    #[diagnostic(code(repelbridge::device_error))]
    Device { message: String },

    #[error("Request failed: {message}")]
    #[diagnostic(code(repelbridge::request_failed))]
    Request { message: String },

    // ── Discovery ────────────────────────────────────────────────────
    #[error("mDNS discovery failed: {message}")]
    #[diagnostic(
        code(repelbridge::discovery_failed),
        help("Discovery needs multicast DNS on the local network segment.")
    )]
    Discovery { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(repelbridge::confirmation_required),
        help("Use --yes (-y) to confirm. A duplicate reset discards real cartridge usage.")
    )]
    ConfirmationRequired { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(repelbridge::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Fill in the actual controller host on connection errors; the
    /// `BridgeError` conversion has no access to it.
    pub fn with_host(self, host: &str) -> Self {
        match self {
            Self::ConnectionFailed { reason, .. } => Self::ConnectionFailed {
                host: host.to_owned(),
                reason,
            },
            other => other,
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Validation { .. } | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            Self::Device { .. } => exit_code::DEVICE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── BridgeError → CliError mapping ───────────────────────────────────

impl From<BridgeError> for CliError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Validation { field, reason } => CliError::Validation { field, reason },

            BridgeError::Unreachable { reason } => CliError::ConnectionFailed {
                host: "(configured controller)".into(),
                reason,
            },

            BridgeError::Disconnected => CliError::ConnectionFailed {
                host: "(configured controller)".into(),
                reason: "bridge is not connected".into(),
            },

            BridgeError::Device { message } => CliError::Device { message },

            BridgeError::Communication { message, status } => CliError::Request {
                message: match status {
                    Some(code) => format!("{message} (HTTP {code})"),
                    None => message,
                },
            },

            BridgeError::Config { message } | BridgeError::Internal(message) => {
                CliError::Request { message }
            }
        }
    }
}

impl From<repelbridge_api::Error> for CliError {
    fn from(err: repelbridge_api::Error) -> Self {
        match err {
            repelbridge_api::Error::Discovery { message } => CliError::Discovery { message },
            other => CliError::from(BridgeError::from(other)),
        }
    }
}
