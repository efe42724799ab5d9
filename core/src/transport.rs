//! Executing `HttpRequest`s.
//!
//! # Design
//! `Transport` is the only place the client touches the network. It returns
//! every status as data; interpreting it belongs to `UserApi`. The ureq-backed
//! implementation disables ureq's status-as-error behavior for that reason.

use ureq::Agent;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and blocks until the full response body is read.
///
/// Implementations carry no per-call state, so one instance can be shared.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport over a single reusable `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout()))
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method.as_str(), request.url);

        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        let body = request.body.unwrap_or_default();
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url), headers).send(body.as_bytes()),
            HttpMethod::Put => with_headers(self.agent.put(url), headers).send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| ApiError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        // Bad UTF-8 is replaced, not rejected; judging the body is the parser's job.
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        log::debug!("-> {status} ({} bytes)", body.len());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
