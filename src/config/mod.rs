//! Request configuration: shared defaults, per-instance overrides and their resolution.
//!
//! [`RequestDefaults`] plays the role of process-wide configuration. It is built
//! once, wrapped in an `Arc` and handed to every [`BaseRequest`](crate::BaseRequest)
//! that should share it. Once shared it is never mutated; reconfiguring means
//! building a new value, so concurrent requests always see a consistent snapshot.
//! [`InstanceConfig`] is the mutable store owned by a single request object.

mod env;

use log::debug;

use crate::error::{ParliamentError, Result};
use crate::request::{Headers, QueryParams, QueryValue};

pub use env::{ACCESS_TOKEN_ENV, ACCESS_TOKEN_HEADER, BASE_URL_ENV};

/// Defaults shared by every request built from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDefaults {
    pub base_url: Option<String>,
    pub headers: Headers,
    pub query_params: QueryParams,
}

impl RequestDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query_params.insert(name, value);
        self
    }
}

/// Per-instance configuration layered over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceConfig {
    pub base_url: Option<String>,
    pub headers: Headers,
    pub query_params: QueryParams,
}

/// Configuration after defaults and instance values have been combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub base_url: String,
    pub headers: Headers,
    pub query_params: QueryParams,
}

/// Combines defaults with instance overrides.
///
/// The instance base URL wins over the default one; an empty value counts as
/// unset. Headers and query parameters are merged with instance values
/// replacing defaults on key collision. Neither input is modified.
///
/// # Errors
///
/// Returns [`ParliamentError::Configuration`] when neither side provides a base URL.
pub fn resolve(defaults: &RequestDefaults, instance: &InstanceConfig) -> Result<EffectiveConfig> {
    let base_url = instance
        .base_url
        .as_ref()
        .filter(|url| !url.is_empty())
        .or(defaults.base_url.as_ref().filter(|url| !url.is_empty()))
        .cloned()
        .ok_or_else(|| {
            ParliamentError::Configuration(
                "base_url must be set on the request or in the defaults".to_string(),
            )
        })?;

    debug!("Resolved base URL {}", base_url);

    Ok(EffectiveConfig {
        base_url,
        headers: defaults.headers.merged(&instance.headers),
        query_params: defaults.query_params.merged(&instance.query_params),
    })
}
