//! Request side: ordered parameter maps, request assembly and the [`BaseRequest`] orchestrator.

mod base;
mod builder;
mod params;

pub use base::BaseRequest;
pub use builder::{DEFAULT_ACCEPT, DEFAULT_USER_AGENT, Request, RequestOptions, build};
pub use params::{Headers, OrderedMap, QueryParams, QueryValue};
