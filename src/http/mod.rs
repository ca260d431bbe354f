//! HTTP transport with raw, undecoded response capture.

mod client;

pub use client::{RawResult, ReqwestTransport, Transport};

#[cfg(test)]
pub use client::MockTransport;
