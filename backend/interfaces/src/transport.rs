use std::sync::Arc;

use common_utils::{errors::CustomResult, request::Request};
use domain_types::{errors::ApiClientError, router_response_types::Response};

/// Sends one request and returns the reply.
///
/// `Ok(Ok(_))` carries a 2xx reply and `Ok(Err(_))` a 4xx/5xx reply. `Err`
/// means no reply was received at all.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn send(&self, request: Request)
        -> CustomResult<Result<Response, Response>, ApiClientError>;
}

#[async_trait::async_trait]
impl<T: ConnectorTransport + ?Sized> ConnectorTransport for Arc<T> {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        (**self).send(request).await
    }
}
