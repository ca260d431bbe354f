use std::sync::Arc;

use log::debug;
use reqwest::Method;

use super::builder::{self, Request, RequestOptions};
use super::params::{Headers, QueryParams};
use crate::config::{self, InstanceConfig, RequestDefaults};
use crate::error::Result;
use crate::graph::GraphParser;
use crate::http::{ReqwestTransport, Transport};
use crate::response::{self, BaseResponse};

/// Issues requests against the parliamentary data API.
///
/// Each instance combines the shared [`RequestDefaults`] with its own base URL,
/// headers and query parameters. A call runs build, send, classify and then
/// either wraps the parsed body or returns the typed error. Nothing is retried.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use parliament::{BaseRequest, RequestDefaults, RequestOptions};
///
/// let defaults = Arc::new(RequestDefaults::new().with_header("Access-Token", "token"));
/// let request = BaseRequest::new(defaults, my_parser)
///     .with_base_url("http://localhost:3030/people/lookup");
///
/// let response = request
///     .get(RequestOptions::new().with_param("source", "mnisId").with_param("id", "3898"))
///     .await?;
/// println!("{} nodes", response.len());
/// ```
pub struct BaseRequest<P: GraphParser, T: Transport = ReqwestTransport> {
    defaults: Arc<RequestDefaults>,
    instance: InstanceConfig,
    parser: P,
    transport: T,
}

impl<P: GraphParser> BaseRequest<P, ReqwestTransport> {
    /// Creates a request object that sends through a default reqwest client.
    pub fn new(defaults: Arc<RequestDefaults>, parser: P) -> Self {
        Self::with_transport(defaults, parser, ReqwestTransport::default())
    }
}

impl<P: GraphParser, T: Transport> BaseRequest<P, T> {
    pub fn with_transport(defaults: Arc<RequestDefaults>, parser: P, transport: T) -> Self {
        Self {
            defaults,
            instance: InstanceConfig::default(),
            parser,
            transport,
        }
    }

    /// Overrides the default base URL for this instance only.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.instance.base_url = Some(base_url.into());
        self
    }

    /// Effective base URL: the instance value, else the default. Empty values count as unset.
    pub fn base_url(&self) -> Option<&str> {
        self.instance
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or(self.defaults.base_url.as_deref().filter(|url| !url.is_empty()))
    }

    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Instance headers, sent with every call from this object.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.instance.headers
    }

    /// Instance query parameters, sent with every call from this object.
    pub fn query_params_mut(&mut self) -> &mut QueryParams {
        &mut self.instance.query_params
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the request a call with `options` would send, without sending it.
    ///
    /// # Errors
    ///
    /// Returns a configuration, URL or header error if the request cannot be built.
    pub fn build_request(&self, method: Method, options: &RequestOptions) -> Result<Request> {
        let config = config::resolve(&self.defaults, &self.instance)?;
        builder::build(method, &config, options)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`BaseRequest::send`].
    #[tracing::instrument(skip(self, options))]
    pub async fn get(&self, options: RequestOptions) -> Result<BaseResponse> {
        self.send(Method::GET, options).await
    }

    /// Sends a POST request. The body in `options` is sent untouched.
    ///
    /// # Errors
    ///
    /// See [`BaseRequest::send`].
    #[tracing::instrument(skip(self, options))]
    pub async fn post(&self, options: RequestOptions) -> Result<BaseResponse> {
        self.send(Method::POST, options).await
    }

    /// Runs one request cycle.
    ///
    /// # Errors
    ///
    /// - [`Configuration`](crate::ParliamentError::Configuration) when no base URL is set
    /// - [`NoContentResponse`](crate::ParliamentError::NoContentResponse) for an empty 2xx body
    /// - [`Client`](crate::ParliamentError::Client) / [`Server`](crate::ParliamentError::Server)
    ///   for 4xx / 5xx, [`UnknownStatus`](crate::ParliamentError::UnknownStatus) for 600+
    /// - [`Transport`](crate::ParliamentError::Transport) and
    ///   [`Parse`](crate::ParliamentError::Parse) from the collaborators, unchanged
    pub async fn send(&self, method: Method, options: RequestOptions) -> Result<BaseResponse> {
        let request = self.build_request(method, &options)?;
        let raw = self.transport.send(&request).await?;

        let outcome = response::classify(&raw);
        let body = response::raise_for(outcome, &raw)?;

        debug!("Wrapping {} bytes from {}", body.len(), raw.url);
        BaseResponse::wrap(&body, &raw, &self.parser)
    }
}
