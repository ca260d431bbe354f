//! Status code and body classification of raw responses.

use std::io::Read;

use flate2::read::{GzDecoder, ZlibDecoder};
use log::{debug, warn};
use reqwest::header::{CONTENT_ENCODING, CONTENT_LENGTH, HeaderMap};

use crate::http::RawResult;

/// Upper bound on a body after content decoding.
const MAX_DECODED_LEN: u64 = 64 * 1024 * 1024;

/// What a raw response means to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Success status with content; holds the body after any content encoding was undone.
    Success(Vec<u8>),
    /// Success status but nothing to parse.
    EmptySuccess,
    /// 400..=499
    ClientError,
    /// 500..=599
    ServerError,
    /// 600 and above.
    UnknownStatus,
}

/// Classifies a raw result by status code and effective body content.
///
/// Status ranges are checked first. Anything below 400 is treated as success,
/// where the body counts as empty if it has no bytes, if `Content-Length` is
/// `0`, or if it decodes to nothing under its declared `Content-Encoding`.
pub fn classify(raw: &RawResult) -> Outcome {
    let outcome = match raw.status_code {
        400..=499 => Outcome::ClientError,
        500..=599 => Outcome::ServerError,
        600.. => Outcome::UnknownStatus,
        _ => match effective_body(raw) {
            Some(body) => Outcome::Success(body),
            None => Outcome::EmptySuccess,
        },
    };

    debug!(
        "Classified {} from {} as {:?}",
        raw.status_code,
        raw.url,
        OutcomeKind(&outcome)
    );

    outcome
}

/// Returns the decoded body, or `None` when there is no content.
fn effective_body(raw: &RawResult) -> Option<Vec<u8>> {
    if raw.body.is_empty() || declares_zero_length(&raw.headers) {
        return None;
    }

    let decoded = decode_body(&raw.body, &raw.headers);
    if decoded.is_empty() { None } else { Some(decoded) }
}

fn declares_zero_length(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        == Some(0)
}

/// Undoes the declared content encodings, last applied first.
///
/// If a coding is unknown, the stream is corrupt or it inflates past
/// [`MAX_DECODED_LEN`], the raw bytes are returned unchanged; that body is not
/// empty and the parser gets to report the problem.
fn decode_body(body: &[u8], headers: &HeaderMap) -> Vec<u8> {
    let codings: Vec<String> = headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|coding| coding.trim().to_ascii_lowercase())
        .filter(|coding| !coding.is_empty() && coding != "identity")
        .collect();

    let mut decoded = body.to_vec();
    for coding in codings.iter().rev() {
        match decode_one(&decoded, coding, MAX_DECODED_LEN) {
            Ok(bytes) => decoded = bytes,
            Err(e) => {
                warn!("Could not undo '{}' content encoding: {}", coding, e);
                return body.to_vec();
            }
        }
    }
    decoded
}

fn decode_one(body: &[u8], coding: &str, limit: u64) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    match coding {
        "gzip" | "x-gzip" => {
            GzDecoder::new(body).take(limit + 1).read_to_end(&mut out)?;
        }
        "deflate" => {
            ZlibDecoder::new(body).take(limit + 1).read_to_end(&mut out)?;
        }
        other => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("unsupported content encoding '{}'", other),
            ));
        }
    }
    if out.len() as u64 > limit {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("decoded body exceeds {} bytes", limit),
        ));
    }
    Ok(out)
}

// Keeps body bytes out of debug logs.
struct OutcomeKind<'a>(&'a Outcome);

impl std::fmt::Debug for OutcomeKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Outcome::Success(body) => write!(f, "Success({} bytes)", body.len()),
            other => write!(f, "{:?}", other),
        }
    }
}
