use std::time::Duration;

use serde_json::Value;

use super::{Endpoint, Transport};
use crate::Result;

/// Upper bound on a single POST so a stalled engine only delays a tick.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Blocking HTTP transport to the engine's local REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(endpoint: &Endpoint) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: endpoint.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, path: &str, body: &Value) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        self.http.post(url).json(body).send()?.error_for_status()?;
        Ok(())
    }
}
