//! Response handling: classify the raw result, raise typed errors, wrap successes.

mod base;
mod classify;
mod raise;

pub use base::BaseResponse;
pub use classify::{Outcome, classify};
pub use raise::raise_for;
