use async_trait::async_trait;
use reqwest::{Request, StatusCode};
use std::sync::Arc;

/// A response as seen by [`crate::octopus_client::OctopusClient`]: the status
/// code and the fully read body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

/// Executes a prepared request.
///
/// This is the only thing the client needs from the network stack. Timeouts,
/// TLS, redirects and connection pooling are the implementation's concern.
/// Errors are handed back to the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> anyhow::Result<TransportResponse>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: Request) -> anyhow::Result<TransportResponse> {
        let response = reqwest::Client::execute(self, request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: Request) -> anyhow::Result<TransportResponse> {
        (**self).execute(request).await
    }
}
