//! The seam between the client and the network.

use crate::error::BoxError;
use crate::request::Request;
use async_trait::async_trait;
use bytes::Bytes;
use http::header::CACHE_CONTROL;
use http::{HeaderMap, HeaderValue, StatusCode};
use std::time::Duration;
use url::Url;

/// What a transport hands back for a completed exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The final URL, after any redirects.
    pub url: Url,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body.
    pub body: Bytes,
}

/// Executes built requests.
///
/// Implementations must be safe to call concurrently. Any status code is a
/// successful exchange; only failures to complete one are errors.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use resourceful::{BoxError, Request, Transport, TransportResponse};
/// use http::{HeaderMap, StatusCode};
///
/// struct Teapot;
///
/// #[async_trait]
/// impl Transport for Teapot {
///     async fn send(&self, request: &Request) -> Result<TransportResponse, BoxError> {
///         Ok(TransportResponse {
///             status: StatusCode::IM_A_TEAPOT,
///             url: request.url().clone(),
///             headers: HeaderMap::new(),
///             body: "short and stout".into(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and waits for the full response body.
    async fn send(&self, request: &Request) -> Result<TransportResponse, BoxError>;
}

/// The default transport, backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest::Client`.
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Builds a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &Request) -> Result<TransportResponse, BoxError> {
        let mut headers = request.headers().clone();
        if let Some(directive) = request.cache_policy().cache_control() {
            headers
                .entry(CACHE_CONTROL)
                .or_insert(HeaderValue::from_static(directive));
        }

        let mut builder = self
            .http_client
            .request(request.method().clone(), request.url().clone())
            .headers(headers);

        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;

        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            url,
            headers,
            body,
        })
    }
}
