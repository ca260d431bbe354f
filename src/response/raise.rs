use log::debug;

use super::classify::Outcome;
use crate::error::{ParliamentError, ResponseContext, Result};
use crate::http::RawResult;

/// Turns a failed [`Outcome`] into its typed error, or hands back the body on success.
///
/// # Errors
///
/// Returns the [`ParliamentError`] matching the outcome for everything but
/// [`Outcome::Success`].
pub fn raise_for(outcome: Outcome, raw: &RawResult) -> Result<Vec<u8>> {
    let context = || ResponseContext::new(raw.status_code, &raw.url, &raw.status_message);

    let error = match outcome {
        Outcome::Success(body) => return Ok(body),
        Outcome::EmptySuccess => ParliamentError::NoContentResponse(context()),
        Outcome::ClientError => ParliamentError::Client(context()),
        Outcome::ServerError => ParliamentError::Server(context()),
        Outcome::UnknownStatus => ParliamentError::UnknownStatus(context()),
    };

    debug!("Raising {}", error);
    Err(error)
}
