// RepelBridge HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, error-payload
// detection, and body decoding. All endpoint groups (system, bus,
// cartridge, settings) are implemented as inherent methods via separate
// files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the RepelBridge controller REST API.
///
/// The controller answers 2xx with a JSON body on every endpoint; explicit
/// failures come back either as non-2xx or as a 2xx body carrying an
/// `{"error": "..."}` payload. Both are surfaced as typed errors here so
/// callers never have to inspect raw bodies.
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BridgeClient {
    /// Create a new client for a controller host, e.g. `192.168.1.40` or
    /// `repelbridge.local`. The device serves plain HTTP on port 80 unless
    /// told otherwise.
    pub fn new(host: &str, port: u16, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{host}:{port}"))?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` and base URL.
    ///
    /// Used by tests to point at a mock server.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path, e.g. `system/status`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("/api/{path}"))?)
    }

    /// Build a bus-scoped URL: `/api/bus/{id}/{path}`.
    pub(crate) fn bus_url(&self, bus_id: u8, path: &str) -> Result<Url, Error> {
        self.api_url(&format!("bus/{bus_id}/{path}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a POST with a form-encoded body and decode the JSON reply.
    ///
    /// Power, brightness, and color take form bodies; that is the firmware
    /// contract, not a choice made here.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {} (form)", url);
        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a POST with a JSON body and decode the JSON reply.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {} (json)", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a bodiless POST and decode the JSON reply.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Decode a response body, mapping non-2xx statuses and explicit
    /// `{"error": ...}` payloads to typed errors.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: extract_error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_owned()),
            });
        }

        if let Some(message) = extract_error_message(&body) {
            return Err(Error::Device { message });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Pull the `error` field out of a JSON body, if present.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::extract_error_message;

    #[test]
    fn error_field_is_extracted() {
        assert_eq!(
            extract_error_message(r#"{"error": "bus busy"}"#),
            Some("bus busy".to_owned())
        );
    }

    #[test]
    fn plain_payloads_have_no_error() {
        assert_eq!(extract_error_message(r#"{"powered": true}"#), None);
        assert_eq!(extract_error_message("not json"), None);
    }
}
