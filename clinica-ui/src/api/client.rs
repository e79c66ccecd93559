//! HTTP API Client
//!
//! The browser side of the request pipeline: a `gloo-net` transport and the shared
//! [`ApiClient`] handed to pages through context.

use async_trait::async_trait;
use clinica::client::{
    ApiClient, Method, OutgoingRequest, RawResponse, Transport, TransportError,
};
use clinica::config::DEFAULT_API_BASE;
use gloo_net::http::{Request, RequestBuilder};
use leptos::*;
use std::rc::Rc;
use std::sync::Arc;

use super::storage::LocalStorageTokenStore;

/// Key under which a custom backend URL is kept
pub const API_URL_KEY: &str = "clinica_api_url";

/// Get the API base URL from local storage, the build environment, or the default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());

    let url = stored
        .or_else(|| option_env!("CLINICA_API_URL").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// `fetch`-backed transport
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let mut builder = builder(request.method, &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        let request = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::new(format!("Request build error: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::new(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response: {}", e)))?;

        Ok(RawResponse::new(status, body))
    }
}

/// The client every page uses
pub type Client = ApiClient<GlooTransport>;

/// Shared client and token store, provided once at the root
#[derive(Clone)]
pub struct ApiCtx {
    pub client: Rc<Client>,
    pub tokens: Arc<LocalStorageTokenStore>,
}

/// Build the client against the current base URL and provide it as context
pub fn provide_api_client() {
    let tokens = Arc::new(LocalStorageTokenStore::default());
    let client = ApiClient::new(get_api_base(), GlooTransport, tokens.clone());

    provide_context(ApiCtx {
        client: Rc::new(client),
        tokens,
    });
}

pub fn use_api() -> ApiCtx {
    use_context::<ApiCtx>().expect("ApiCtx not found")
}
