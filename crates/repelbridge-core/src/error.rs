// ── Core error types ──
//
// User-facing errors from repelbridge-core. Consumers never see reqwest
// errors or raw bodies directly; the `From<repelbridge_api::Error>` impl
// translates wire-layer failures into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum BridgeError {
    // ── Input errors ─────────────────────────────────────────────────
    /// Rejected before any network call was made.
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Communication errors ─────────────────────────────────────────
    /// A single request failed (timeout mid-exchange, non-2xx, malformed
    /// body) while the device itself is still reachable.
    #[error("Communication error: {message}")]
    Communication {
        message: String,
        status: Option<u16>,
    },

    /// The whole device is unreachable (connection refused, DNS failure,
    /// connect timeout on the system endpoint).
    #[error("Controller unreachable: {reason}")]
    Unreachable { reason: String },

    /// The device answered with an explicit error payload.
    #[error("Device error: {message}")]
    Device { message: String },

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("Bridge is not connected")]
    Disconnected,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from wire-layer errors ────────────────────────────────

impl From<repelbridge_api::Error> for BridgeError {
    fn from(err: repelbridge_api::Error) -> Self {
        if err.is_unreachable() {
            return BridgeError::Unreachable {
                reason: err.to_string(),
            };
        }

        match err {
            repelbridge_api::Error::Http { status, message } => BridgeError::Communication {
                message,
                status: Some(status),
            },
            repelbridge_api::Error::Transport(e) => BridgeError::Communication {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            repelbridge_api::Error::Device { message } => BridgeError::Device { message },
            repelbridge_api::Error::Deserialization { message, body: _ } => {
                BridgeError::Communication {
                    message: format!("malformed response body: {message}"),
                    status: None,
                }
            }
            repelbridge_api::Error::InvalidUrl(e) => BridgeError::Config {
                message: format!("invalid URL: {e}"),
            },
            repelbridge_api::Error::Discovery { message } => BridgeError::Internal(message),
        }
    }
}
