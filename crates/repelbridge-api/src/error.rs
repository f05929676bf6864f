use thiserror::Error;

/// Top-level error type for the `repelbridge-api` crate.
///
/// Covers every failure mode of the wire layer: transport, HTTP status,
/// device-reported errors, payload decoding, and mDNS discovery.
/// `repelbridge-core` maps these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The controller answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Device ──────────────────────────────────────────────────────
    /// The controller answered 2xx but carried an explicit error payload.
    #[error("Device error: {message}")]
    Device { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Discovery ───────────────────────────────────────────────────
    /// mDNS browse failed or produced no usable answer.
    #[error("Discovery failed: {message}")]
    Discovery { message: String },
}

impl Error {
    /// Returns `true` if the device as a whole looks unreachable
    /// (connection refused, DNS failure, or request timeout) as opposed
    /// to a single endpoint misbehaving.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status of the failed request, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
