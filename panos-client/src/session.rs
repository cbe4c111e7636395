//! Session transport for the PAN-OS XML API.

use std::time::Duration;

use async_trait::async_trait;
use panos_core::{PanosError, Result};

/// Normalize a device URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// A connected session capable of issuing operational commands.
///
/// Implementations carry no per-call state; concurrent use is bounded only
/// by the underlying transport. `extra` carries additional form parameters
/// beyond the standard `type`/`cmd`/`key`/`target` set.
#[async_trait]
pub trait Session: Send + Sync {
    /// Issue the serialized command and return the raw XML reply body.
    async fn op(
        &self,
        cmd_xml: &str,
        target: Option<&str>,
        extra: &[(String, String)],
    ) -> Result<String>;
}

/// HTTPS session against a device's `/api/` endpoint.
///
/// Commands go out as `POST {base}/api/` with form fields `type=op`,
/// `cmd=<xml>`, `key=<api key>`, and optionally `target=<serial>`.
#[derive(Debug, Clone)]
pub struct ApiSession {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiSession {
    pub fn builder() -> ApiSessionBuilder {
        ApiSessionBuilder::default()
    }
}

/// Builder for [`ApiSession`].
#[derive(Debug, Default)]
pub struct ApiSessionBuilder {
    host: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl ApiSessionBuilder {
    /// Device base URL, e.g. `https://panorama.example.com`.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// API key used for every request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Per-request timeout (default 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accept self-signed device certificates. Firewalls and orchestration
    /// appliances commonly ship with them; leave this off when the device
    /// carries a real certificate.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<ApiSession> {
        let host = self
            .host
            .ok_or_else(|| PanosError::Config("device host is required".to_string()))?;
        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(PanosError::Config(
                "device host must start with http:// or https://".to_string(),
            ));
        }
        let api_key = self
            .api_key
            .ok_or_else(|| PanosError::Config("API key is required".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(PanosError::Config("API key cannot be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(10)))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| PanosError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(ApiSession {
            http,
            base_url: normalize_url(&host),
            api_key,
        })
    }
}

#[async_trait]
impl Session for ApiSession {
    async fn op(
        &self,
        cmd_xml: &str,
        target: Option<&str>,
        extra: &[(String, String)],
    ) -> Result<String> {
        let url = format!("{}/api/", self.base_url);

        let mut params: Vec<(&str, &str)> = vec![
            ("type", "op"),
            ("cmd", cmd_xml),
            ("key", &self.api_key),
        ];
        if let Some(target) = target {
            params.push(("target", target));
        }
        for (name, value) in extra {
            params.push((name, value));
        }

        let response = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| PanosError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PanosError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(PanosError::Transport(format!(
                "device returned HTTP {status}: {body}"
            )));
        }

        Ok(body)
    }
}
