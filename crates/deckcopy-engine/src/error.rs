//! Error types for deckcopy-engine.
//!
//! Errors from the copy workflow fall into two categories:
//!
//! 1. **Client errors**: Wrapped from the underlying [`deckcopy_connect::Error`] type
//! 2. **Precondition errors**: a step found nothing to work with (e.g. the
//!    source deck is missing) and the run stopped before copying anything
//!
//! # Example
//!
//! ```no_run
//! use deckcopy_engine::{Engine, Error, TransferConfig};
//!
//! # async fn example() {
//! let engine = Engine::new();
//!
//! match engine.transfer().copy_deck(&TransferConfig::default(), |_| {}).await {
//!     Ok(report) => println!("copied {}", report.succeeded),
//!     Err(Error::Unreachable) => eprintln!("Is Anki running?"),
//!     Err(Error::DeckNotFound(name)) => eprintln!("Deck '{}' not found", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use std::fmt;

/// Result type for deckcopy-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during the copy workflow.
#[derive(Debug)]
pub enum Error {
    /// An error from the underlying AnkiConnect client.
    Client(deckcopy_connect::Error),

    /// The connectivity check got no answer.
    Unreachable,

    /// The source deck does not exist (or the deck list was unavailable).
    DeckNotFound(String),

    /// No notes matched the source deck query.
    NoNotesFound(String),

    /// Note ids were found but their details could not be fetched.
    NoteDetailsUnavailable,

    /// A note has no model of its own and no target model was resolved.
    MissingModel {
        /// The source note ID, if known.
        note_id: Option<i64>,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(e) => write!(f, "{}", e),
            Error::Unreachable => write!(f, "cannot connect to AnkiConnect"),
            Error::DeckNotFound(name) => write!(f, "deck not found: {}", name),
            Error::NoNotesFound(deck) => write!(f, "no notes found in deck: {}", deck),
            Error::NoteDetailsUnavailable => write!(f, "could not fetch note details"),
            Error::MissingModel { note_id } => match note_id {
                Some(id) => write!(f, "note {} has no model name", id),
                None => write!(f, "note has no model name"),
            },
        }
    }
}

impl From<deckcopy_connect::Error> for Error {
    fn from(err: deckcopy_connect::Error) -> Self {
        Error::Client(err)
    }
}
