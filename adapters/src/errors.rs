//! Custom error types specific to the `adapters` crate.
//!
//! Every failure to obtain a usable reply from the upstream collapses into one of
//! these variants. Callers treat all of them as an internal error and never show
//! the detail to the browser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned a body that is not JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
}
