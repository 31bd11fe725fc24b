//! Error types for AnkiConnect calls.
//!
//! Every failure falls into one of two groups:
//!
//! - **transport**: the request never produced a usable response
//!   (connection refused, timeout, malformed body);
//! - **remote**: AnkiConnect answered, but with an `error` or without a result.
//!
//! Callers that only care whether a value came back can use [`Lenient`] to
//! log the failure and collapse it into `None`.
//!
//! # Example
//!
//! ```no_run
//! use deckcopy_connect::{AnkiClient, Error};
//!
//! # async fn example() {
//! let client = AnkiClient::new();
//!
//! match client.decks().names().await {
//!     Ok(decks) => println!("{} decks", decks.len()),
//!     Err(Error::ConnectionRefused) => eprintln!("Is Anki running?"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;
use tracing::warn;

/// The error type for AnkiConnect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest, including timeouts.
    ///
    /// For connection issues, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection refused - Anki is likely not running.
    #[error("Could not connect to Anki. Is Anki running with AnkiConnect installed?")]
    ConnectionRefused,

    /// AnkiConnect returned an error message.
    ///
    /// Common messages include:
    /// - "cannot create note because it is a duplicate"
    /// - "deck was not found"
    /// - "model was not found"
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    /// Response carried neither a result nor an error.
    #[error("AnkiConnect returned empty response")]
    EmptyResponse,

    /// The response body was not the JSON envelope we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the request failed before AnkiConnect produced a usable answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::ConnectionRefused | Error::Json(_)
        )
    }

    /// Whether AnkiConnect answered but reported a failure or no result.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::AnkiConnect(_) | Error::EmptyResponse)
    }
}

/// A specialized Result type for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Collapse a failed call into "no result", logging why.
///
/// ```
/// use deckcopy_connect::{Error, Lenient};
///
/// let failed: deckcopy_connect::Result<i64> = Err(Error::EmptyResponse);
/// assert_eq!(failed.lenient("createDeck"), None);
/// ```
pub trait Lenient<T> {
    /// Returns the value on success; logs the error and returns `None` otherwise.
    fn lenient(self, action: &str) -> Option<T>;
}

impl<T> Lenient<T> for Result<T> {
    fn lenient(self, action: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                let kind = if e.is_transport() { "transport" } else { "remote" };
                warn!(action, kind, error = %e, "API call failed");
                None
            }
        }
    }
}
