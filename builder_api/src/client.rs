//! HTTP client for the Builder decision-tree execution API.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{classify_response, Error};
use crate::types::{ExecutionBody, Response};

/// Base URL of the production Builder API.
const DEFAULT_API_URL: &str = "https://builder.api.reevolute.com";

/// Request timeout on the HTTP client used by the library.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// User agent sent with every request.
const USER_AGENT: &str = concat!("builder-rs/", env!("CARGO_PKG_VERSION"));

const HEADER_SESSION_ID: &str = "X-Session-Id";
const HEADER_REQUEST_ID: &str = "X-Request-Id";

/// Request body for executions and interactions.
#[derive(Serialize)]
struct ExecutionRequest<'a> {
    parameters: &'a HashMap<String, Value>,
    #[serde(rename = "type")]
    interaction_type: &'a str,
}

/// Status, headers, and body of a response, captured before dispatching
/// to the success or error path. The body is read in full on every path
/// so the pooled connection can be reused.
struct RawResponse {
    status: StatusCode,
    content_type: String,
    session_id: String,
    request_id: String,
    body: String,
}

/// Client for the Builder v2 REST API.
///
/// Holds the tenant-scoped API key and a pooled HTTP client with a
/// 120-second timeout. Construct once and share between calls; every
/// method issues a single request with no retries, and dropping a
/// returned future cancels the request in flight.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    tenant_id: String,
    base_url: String,
}

impl Client {
    /// Creates a client for the production Builder API.
    pub fn new(api_key: String, tenant_id: String) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            tenant_id,
            base_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Creates a client with a custom base URL. Used for testing against
    /// a local stand-in such as wiremock.
    pub fn with_base_url(base_url: &str, api_key: String, tenant_id: String) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            tenant_id,
            base_url: base_url.to_string(),
        })
    }

    /// Creates a client that sends requests through a caller-supplied
    /// `reqwest::Client`, for custom timeout or pool settings.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: String,
        tenant_id: String,
    ) -> Self {
        Self {
            http,
            api_key,
            tenant_id,
            base_url: base_url.to_string(),
        }
    }

    /// Runs a tree release synchronously and waits for the evaluation
    /// result.
    pub async fn add_execution(
        &self,
        tree_id: &str,
        release_id: &str,
        params: &HashMap<String, Value>,
    ) -> Result<Response, Error> {
        let url = format!(
            "{}/v2/tenants/{}/trees/{}/releases/{}/executions",
            self.base_url, self.tenant_id, tree_id, release_id
        );
        let body = serde_json::to_vec(&ExecutionRequest {
            parameters: params,
            interaction_type: "sync",
        })?;

        tracing::debug!("adding execution for tree [{}] release [{}]", tree_id, release_id);
        self.execute_sync(self.http.post(&url).body(body)).await
    }

    /// Queues a tree release execution and returns its tracking token
    /// (the `X-Request-Id` assigned by the service) without waiting for
    /// the evaluation.
    pub async fn add_async_execution(
        &self,
        tree_id: &str,
        release_id: &str,
        params: &HashMap<String, Value>,
    ) -> Result<String, Error> {
        let url = format!(
            "{}/v2/tenants/{}/trees/{}/releases/{}/executions",
            self.base_url, self.tenant_id, tree_id, release_id
        );
        let body = serde_json::to_vec(&ExecutionRequest {
            parameters: params,
            interaction_type: "async",
        })?;

        tracing::debug!(
            "adding async execution for tree [{}] release [{}]",
            tree_id,
            release_id
        );
        self.execute_async(self.http.post(&url).body(body)).await
    }

    /// Submits a follow-up interaction into a running execution session.
    /// The interaction type is understood by the tree, not this library.
    pub async fn add_interaction(
        &self,
        session_id: &str,
        interaction_type: &str,
        params: &HashMap<String, Value>,
    ) -> Result<Response, Error> {
        let url = format!(
            "{}/v2/tenants/{}/executions/{}/interactions",
            self.base_url, self.tenant_id, session_id
        );
        let body = serde_json::to_vec(&ExecutionRequest {
            parameters: params,
            interaction_type,
        })?;

        tracing::debug!("adding interaction for session [{}]", session_id);
        self.execute_sync(self.http.post(&url).body(body)).await
    }

    /// Fetches the current state of an execution session.
    pub async fn get_session_information(&self, session_id: &str) -> Result<Response, Error> {
        let url = format!(
            "{}/v2/tenants/{}/executions/{}",
            self.base_url, self.tenant_id, session_id
        );

        tracing::debug!("fetching session information for [{}]", session_id);
        self.execute_sync(self.http.get(&url)).await
    }

    /// Sends the request with the standard headers attached and captures
    /// status, the consumed headers, and the full body.
    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<RawResponse, Error> {
        let response = request
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        let content_type = header_value(response.headers(), "Content-Type").to_lowercase();
        let session_id = header_value(response.headers(), HEADER_SESSION_ID);
        let request_id = header_value(response.headers(), HEADER_REQUEST_ID);
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            content_type,
            session_id,
            request_id,
            body,
        })
    }

    /// Base path for calls that answer with an evaluation body: decodes
    /// `{tree_version, response_type, data}` and merges in the
    /// header-derived session and request IDs.
    async fn execute_sync(&self, request: reqwest::RequestBuilder) -> Result<Response, Error> {
        let raw = self.dispatch(request).await?;

        if raw.status.as_u16() >= 400 {
            tracing::error!(
                "builder request failed with status {}: {}",
                raw.status,
                truncate_body(&raw.body)
            );
            return Err(classify_response(raw.status, &raw.content_type, &raw.body));
        }

        let parsed: ExecutionBody = serde_json::from_str(&raw.body).map_err(|err| {
            tracing::error!(
                "failed to decode evaluation body: {} | body: {}",
                err,
                truncate_body(&raw.body)
            );
            Error::Serialization(err)
        })?;

        Ok(Response {
            session_id: raw.session_id,
            request_id: raw.request_id,
            tree_version: parsed.tree_version,
            response_type: parsed.response_type,
            data: parsed.data,
        })
    }

    /// Base path for queued executions: the service answers 201 with an
    /// empty body and the tracking token in the `X-Request-Id` header.
    async fn execute_async(&self, request: reqwest::RequestBuilder) -> Result<String, Error> {
        let raw = self.dispatch(request).await?;

        if raw.status.as_u16() >= 400 {
            tracing::error!(
                "builder request failed with status {}: {}",
                raw.status,
                truncate_body(&raw.body)
            );
            return Err(classify_response(raw.status, &raw.content_type, &raw.body));
        }

        Ok(raw.request_id)
    }
}

fn header_value(headers: &reqwest::header::HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
