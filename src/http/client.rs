//! HTTP transport: sends a built [`Request`] and buffers the raw result.

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use log::debug;
use reqwest::{Client, Response};
use reqwest::header::HeaderMap;

use crate::error::TransportError;
use crate::request::Request;

/// Everything the classifier needs from a response, body left exactly as received.
#[derive(Debug, Clone, Default)]
pub struct RawResult {
    pub status_code: u16,
    pub status_message: String,
    pub url: String,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

/// Sends requests over the network.
///
/// Implementations must not decompress the body; the response classifier
/// undoes `Content-Encoding` itself so it can spot compressed empty payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<RawResult, TransportError>;
}

/// [`Transport`] backed by a reqwest `Client`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport wrapping the given reqwest Client.
    ///
    /// The client must be built without automatic decompression, which is the
    /// case for this crate's reqwest feature set.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &Request) -> Result<RawResult, TransportError> {
        debug!("{} {}...", request.method, request.url);

        let url = request.url.to_string();
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        let status_message = reason_phrase(&response);
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), e))?
            .to_vec();

        debug!(
            "Received {} from {} ({} bytes)",
            status.as_u16(),
            final_url,
            body.len()
        );

        Ok(RawResult {
            status_code: status.as_u16(),
            status_message,
            url: final_url,
            body,
            headers,
        })
    }
}

/// Reason phrase as the server sent it.
///
/// hyper only records the phrase when it differs from the canonical one, so an
/// absent extension means the server used the canonical text.
fn reason_phrase(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
