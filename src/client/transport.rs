//! Transport seam between the request pipeline and the network.

use async_trait::async_trait;

use super::error::TransportError;
use super::request::{OutgoingRequest, RawResponse};

/// Sends a prepared request and returns whatever came back
///
/// Any received response, whatever its status, is `Ok`. `Err` means nothing usable
/// was received. Transports are `?Send`: the dashboard runs on one event loop.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}
