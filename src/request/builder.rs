//! Turns resolved configuration and call options into an outgoing [`Request`].

use std::time::Duration;

use log::debug;
use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::Serialize;
use url::Url;

use super::params::{Headers, QueryParams, QueryValue};
use crate::config::EffectiveConfig;
use crate::error::{ParliamentError, Result};

/// Accept header sent unless the caller overrides it.
pub const DEFAULT_ACCEPT: &str = "*/*, application/n-triples";

/// User agent sent unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str = concat!("parliament-rs/", env!("CARGO_PKG_VERSION"));

/// A fully built request, ready to hand to a [`Transport`](crate::http::Transport).
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

/// Call-site options for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub path: Option<String>,
    pub params: QueryParams,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path appended to the base URL.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the raw request body. It is sent exactly as given.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as JSON and uses it as the body.
    ///
    /// No `Content-Type` header is added; set one with [`with_header`](Self::with_header)
    /// if the endpoint needs it.
    ///
    /// # Errors
    ///
    /// Returns [`ParliamentError::Serialize`] if `value` cannot be serialized.
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Builds a request from resolved configuration and call options.
///
/// Call-site query parameters and headers are layered over the configured ones.
/// The default `Accept` and `User-Agent` headers are always present unless one
/// of the layers sets them.
///
/// # Errors
///
/// Returns [`ParliamentError::InvalidUrl`] if the base URL and path do not form a
/// valid URL, or [`ParliamentError::InvalidHeader`] for a malformed header.
pub fn build(method: Method, config: &EffectiveConfig, options: &RequestOptions) -> Result<Request> {
    let mut url = resolve_url(&config.base_url, options.path.as_deref())?;

    let params = config.query_params.merged(&options.params);
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in params.iter() {
            pairs.append_pair(name, &value.to_string());
        }
    }

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    for (name, value) in config.headers.merged(&options.headers).iter() {
        let (name, value) = header_pair(name, value)?;
        headers.insert(name, value);
    }

    debug!(
        "Built {} request for {} ({} headers, body: {} bytes)",
        method,
        url,
        headers.len(),
        options.body.as_ref().map_or(0, Vec::len)
    );

    Ok(Request {
        method,
        url,
        headers,
        body: options.body.clone(),
        timeout: options.timeout,
    })
}

fn resolve_url(base_url: &str, path: Option<&str>) -> Result<Url> {
    let full = match path.filter(|p| !p.is_empty()) {
        Some(path) => format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => base_url.to_string(),
    };

    Url::parse(&full).map_err(|source| ParliamentError::InvalidUrl { url: full, source })
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| ParliamentError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| ParliamentError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> EffectiveConfig {
        EffectiveConfig {
            base_url: base_url.to_string(),
            headers: Headers::new(),
            query_params: QueryParams::new(),
        }
    }

    #[test]
    fn test_build_sets_default_headers() {
        let request = build(
            Method::GET,
            &config("http://localhost:3030/people"),
            &RequestOptions::new(),
        )
        .unwrap();

        assert_eq!(request.headers.get(ACCEPT).unwrap(), DEFAULT_ACCEPT);
        assert_eq!(request.headers.get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
        assert_eq!(request.url.as_str(), "http://localhost:3030/people");
        assert!(request.body.is_none());
        assert!(request.timeout.is_none());
    }

    #[test]
    fn test_build_keeps_custom_header_alongside_defaults() {
        let mut config = config("http://localhost:3030/people");
        config.headers.insert("Access-Token", "Test-Token");

        let request = build(Method::GET, &config, &RequestOptions::new()).unwrap();

        assert_eq!(request.headers.get("access-token").unwrap(), "Test-Token");
        assert_eq!(request.headers.get(ACCEPT).unwrap(), DEFAULT_ACCEPT);
        assert!(request.headers.contains_key(USER_AGENT));
    }

    #[test]
    fn test_build_allows_overriding_defaults() {
        let options = RequestOptions::new()
            .with_header("accept", "application/json")
            .with_header("User-Agent", "custom-agent");

        let request = build(Method::GET, &config("http://test.com"), &options).unwrap();

        assert_eq!(request.headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(request.headers.get(USER_AGENT).unwrap(), "custom-agent");
        assert_eq!(request.headers.get_all(ACCEPT).iter().count(), 1);
    }

    #[test]
    fn test_build_call_headers_override_configured_headers() {
        let mut config = config("http://test.com");
        config.headers.insert("Access-Token", "Configured");

        let options = RequestOptions::new().with_header("Access-Token", "Call");
        let request = build(Method::GET, &config, &options).unwrap();

        assert_eq!(request.headers.get("Access-Token").unwrap(), "Call");
    }

    #[test]
    fn test_build_query_params_in_order() {
        let options = RequestOptions::new()
            .with_param("source", "mnisId")
            .with_param("id", "3898");

        let request = build(
            Method::GET,
            &config("http://localhost:3030/people/lookup"),
            &options,
        )
        .unwrap();

        assert_eq!(
            request.url.as_str(),
            "http://localhost:3030/people/lookup?source=mnisId&id=3898"
        );
    }

    #[test]
    fn test_build_merges_configured_params_right_biased() {
        let mut config = config("http://localhost:3030/people/lookup");
        config.query_params.insert("test", true);
        config.query_params.insert("id", "old");

        let options = RequestOptions::new()
            .with_param("source", "mnisId")
            .with_param("id", "3898");

        let request = build(Method::GET, &config, &options).unwrap();

        assert_eq!(
            request.url.as_str(),
            "http://localhost:3030/people/lookup?test=true&id=3898&source=mnisId"
        );
    }

    #[test]
    fn test_build_encodes_param_values() {
        let options = RequestOptions::new().with_param("name", "Diane Abbott & co");
        let request = build(Method::GET, &config("http://test.com/people"), &options).unwrap();

        assert_eq!(
            request.url.query(),
            Some("name=Diane+Abbott+%26+co")
        );
    }

    #[test]
    fn test_build_joins_path_onto_base_url() {
        let options = RequestOptions::new().with_path("/parties/current");

        let request = build(Method::GET, &config("http://localhost:3030/"), &options).unwrap();
        assert_eq!(request.url.as_str(), "http://localhost:3030/parties/current");

        let options = RequestOptions::new().with_path("parties/current");
        let request = build(Method::GET, &config("http://localhost:3030"), &options).unwrap();
        assert_eq!(request.url.as_str(), "http://localhost:3030/parties/current");
    }

    #[test]
    fn test_build_passes_body_and_timeout_through() {
        let body = r#"{"foo":"bar","test":true,"number":1}"#;
        let options = RequestOptions::new()
            .with_body(body)
            .with_timeout(Duration::from_secs(1));

        let request = build(Method::POST, &config("http://test.com/people"), &options).unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body.as_deref(), Some(body.as_bytes()));
        assert_eq!(request.timeout, Some(Duration::from_secs(1)));
        assert!(!request.headers.contains_key("content-type"));
    }

    #[test]
    fn test_with_json_body_serializes_compactly() {
        #[derive(Serialize)]
        struct Payload<'a> {
            foo: &'a str,
            test: bool,
            number: u32,
        }

        let options = RequestOptions::new()
            .with_json_body(&Payload {
                foo: "bar",
                test: true,
                number: 1,
            })
            .unwrap();

        assert_eq!(
            options.body.as_deref(),
            Some(br#"{"foo":"bar","test":true,"number":1}"#.as_slice())
        );
    }

    #[test]
    fn test_build_rejects_invalid_url() {
        let result = build(Method::GET, &config("not a url"), &RequestOptions::new());
        assert!(matches!(result, Err(ParliamentError::InvalidUrl { .. })));
    }

    #[test]
    fn test_build_rejects_invalid_header_name() {
        let options = RequestOptions::new().with_header("Bad Header", "value");
        let result = build(Method::GET, &config("http://test.com"), &options);

        match result {
            Err(ParliamentError::InvalidHeader { name, .. }) => assert_eq!(name, "Bad Header"),
            other => panic!("Expected InvalidHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_invalid_header_value() {
        let options = RequestOptions::new().with_header("X-Token", "line\nbreak");
        let result = build(Method::GET, &config("http://test.com"), &options);
        assert!(matches!(result, Err(ParliamentError::InvalidHeader { .. })));
    }
}
