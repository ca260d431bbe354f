//! Client for the UK Parliament linked-data API.
//!
//! A [`BaseRequest`] resolves its base URL, headers and query parameters
//! against a shared [`RequestDefaults`] snapshot, sends one request through a
//! [`Transport`], classifies the status and body, and either hands the body to
//! a [`GraphParser`] or returns a typed [`ParliamentError`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use parliament::{BaseRequest, RequestDefaults, RequestOptions};
//!
//! let defaults = Arc::new(RequestDefaults::from_env());
//! let people = BaseRequest::new(defaults, parser).with_base_url("http://localhost:3030/people");
//! let response = people.get(RequestOptions::new()).await?;
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod http;
pub mod request;
pub mod response;

pub use config::RequestDefaults;
pub use error::{ParliamentError, ParseError, ResponseContext, Result, TransportError};
pub use graph::{AttributeValue, GraphParser, Node};
pub use http::{RawResult, ReqwestTransport, Transport};
pub use request::{BaseRequest, QueryValue, RequestOptions};
pub use response::BaseResponse;
