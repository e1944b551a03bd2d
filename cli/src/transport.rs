//! Executes core requests over real HTTP.

use anyhow::Context;
use todo_core::{HttpMethod, HttpRequest, HttpResponse};

pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    /// 4xx/5xx come back as data so the core can interpret them.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> anyhow::Result<HttpResponse> {
        tracing::debug!(method = req.method.as_str(), url = %req.url, "sending request");
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.url), &req.headers).call(),
            (HttpMethod::Delete, _) => {
                with_headers(self.agent.delete(&req.url), &req.headers).call()
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(self.agent.post(&req.url), &req.headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                with_headers(self.agent.put(&req.url), &req.headers).send_empty()
            }
        };
        let mut response = result.with_context(|| format!("request to {} failed", req.url))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .context("reading response body")?;
        Ok(HttpResponse::new(status, body))
    }
}

/// Copy the request's headers (content type included) onto the builder.
fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
