//! API Client
//!
//! The single request pipeline every page goes through. A request built by a page
//! passes three stages before it reaches the transport:
//!
//! 1. default headers (`Content-Type: application/json`) fill in what the caller left out
//! 2. extra interceptors, in registration order
//! 3. [`BearerAuth`], which reads the token store and attaches `Authorization`
//!
//! The transport is private to the client, so there is no path to the network that
//! skips the pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! let tokens = Arc::new(MemoryTokenStore::with_token("abc123"));
//! let client = ApiClient::new("http://127.0.0.1:8000", ReqwestTransport::default(), tokens);
//!
//! let pacientes = client.get("/pacientes").await?;
//! client.post("/roles", &json!({"name": "admin"})).await?;
//! ```

pub mod error;
pub mod interceptor;
#[cfg(feature = "native")]
pub mod native;
pub mod request;
pub mod transport;

pub use error::{ApiError, ErrorKind, TransportError};
pub use interceptor::{BearerAuth, Interceptor, AUTHORIZATION};
#[cfg(feature = "native")]
pub use native::ReqwestTransport;
pub use request::{ApiRequest, ApiResponse, Headers, Method, OutgoingRequest, RawResponse};
pub use transport::Transport;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::token::TokenStore;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Fixed framing shared by every request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub base_url: String,
    pub default_headers: Headers,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = Headers::new();
        default_headers.set(CONTENT_TYPE, APPLICATION_JSON);

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers,
        }
    }
}

/// Shared backend client
pub struct ApiClient<T> {
    context: RequestContext,
    interceptors: Vec<Box<dyn Interceptor>>,
    auth: BearerAuth,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Create the client. Nothing is contacted.
    pub fn new(base_url: impl Into<String>, transport: T, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            context: RequestContext::new(base_url),
            interceptors: Vec::new(),
            auth: BearerAuth::new(tokens),
            transport,
        }
    }

    /// Add an interceptor; it runs before the bearer stage
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn base_url(&self) -> &str {
        &self.context.base_url
    }

    /// Run the pipeline stages and resolve the target URL
    fn prepare(&self, request: ApiRequest) -> OutgoingRequest {
        let mut request = request;
        for (name, value) in self.context.default_headers.iter() {
            request.headers.set_default(name, value);
        }

        let request = self
            .interceptors
            .iter()
            .fold(request, |request, interceptor| interceptor.intercept(request));
        let request = self.auth.intercept(request);

        OutgoingRequest {
            url: request.url(&self.context.base_url),
            method: request.method,
            headers: request.headers,
            body: request.body,
        }
    }

    /// Issue a request through the pipeline
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request.path.clone();
        let outgoing = self.prepare(request);
        let method = outgoing.method;

        tracing::debug!(
            method = %method,
            path = %path,
            authenticated = outgoing.headers.contains(AUTHORIZATION),
            "Dispatching API request"
        );

        let raw = self.transport.send(outgoing).await.map_err(|e| {
            tracing::warn!(method = %method, path = %path, "API request failed: {}", e);
            ApiError::from(e)
        })?;

        let result = parse_response(raw);
        if let Err(e) = &result {
            tracing::warn!(method = %method, path = %path, "API request failed: {}", e);
        }
        result
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    /// GET and decode into a page model
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.get(path).await?.json()
    }

    /// Probe the backend root and return its greeting
    pub async fn ping(&self) -> Result<String, ApiError> {
        let response = self.get("/").await?;
        Ok(match &response.body {
            serde_json::Value::Object(map) => match map.get("message") {
                Some(serde_json::Value::String(message)) => message.clone(),
                _ => response.body.to_string(),
            },
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn parse_response(raw: RawResponse) -> Result<ApiResponse, ApiError> {
    if !raw.is_success() {
        return Err(ApiError::from_status(raw.status, &raw.body));
    }

    if raw.body.trim().is_empty() {
        return Ok(ApiResponse {
            status: raw.status,
            body: serde_json::Value::Null,
        });
    }

    let body = serde_json::from_str(&raw.body).map_err(|e| ApiError::Malformed {
        status: raw.status,
        message: e.to_string(),
    })?;

    Ok(ApiResponse {
        status: raw.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    #[test]
    fn test_context_trims_base_and_sets_json() {
        let context = RequestContext::new("http://127.0.0.1:8000/");
        assert_eq!(context.base_url, "http://127.0.0.1:8000");
        assert_eq!(context.default_headers.get("content-type"), Some(APPLICATION_JSON));
    }

    #[test]
    fn test_parse_empty_success_is_null() {
        let response = parse_response(RawResponse::new(204, "")).unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_null());
    }

    #[test]
    fn test_parse_invalid_json_is_malformed() {
        let err = parse_response(RawResponse::new(200, "<html>")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn test_parse_non_success_is_status() {
        let err = parse_response(RawResponse::new(400, r#"{"detail":"El paciente ya se encuentra inactivo"}"#))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.status(), Some(400));
    }

    struct Unreachable;

    #[async_trait::async_trait(?Send)]
    impl Transport for Unreachable {
        async fn send(&self, _request: OutgoingRequest) -> Result<RawResponse, TransportError> {
            Err(TransportError::new("connection refused"))
        }
    }

    #[test]
    fn test_prepare_orders_stages() {
        let tokens = Arc::new(MemoryTokenStore::with_token("abc123"));
        let client = ApiClient::new("http://h", Unreachable, tokens)
            .with_interceptor(|request: ApiRequest| request.header("Authorization", "Basic nope"));

        let outgoing = client.prepare(ApiRequest::get("/pacientes"));
        assert_eq!(outgoing.url, "http://h/pacientes");
        assert_eq!(outgoing.headers.get(AUTHORIZATION), Some("Bearer abc123"));
        assert_eq!(outgoing.headers.get(CONTENT_TYPE), Some(APPLICATION_JSON));
    }

    #[test]
    fn test_caller_content_type_wins_over_default() {
        let client = ApiClient::new("http://h", Unreachable, Arc::new(MemoryTokenStore::new()));
        let outgoing = client.prepare(ApiRequest::post("/archivos").header("content-type", "text/csv"));
        assert_eq!(outgoing.headers.get(CONTENT_TYPE), Some("text/csv"));
    }

    #[tokio::test]
    async fn test_network_failure_surfaces() {
        let client = ApiClient::new("http://h", Unreachable, Arc::new(MemoryTokenStore::new()));
        let err = client.get("/").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
