//! Request interceptors.
//!
//! An interceptor takes the outgoing request and returns a possibly modified one.
//! Interceptors run synchronously, in order, immediately before transmission.

use std::sync::Arc;

use super::request::ApiRequest;
use crate::token::TokenStore;

pub const AUTHORIZATION: &str = "Authorization";

/// Pre-transmission hook
pub trait Interceptor {
    fn intercept(&self, request: ApiRequest) -> ApiRequest;
}

impl<F> Interceptor for F
where
    F: Fn(ApiRequest) -> ApiRequest,
{
    fn intercept(&self, request: ApiRequest) -> ApiRequest {
        self(request)
    }
}

/// Attaches `Authorization: Bearer <token>` from the token store
///
/// The store is read on every call and never written. A caller-supplied
/// `Authorization` header is overwritten when a token exists and left alone otherwise.
pub struct BearerAuth {
    tokens: Arc<dyn TokenStore>,
}

impl BearerAuth {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }
}

impl Interceptor for BearerAuth {
    fn intercept(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(token) = self.tokens.read_token() {
            request
                .headers
                .set(AUTHORIZATION, format!("Bearer {}", token));
        }
        request
    }
}
