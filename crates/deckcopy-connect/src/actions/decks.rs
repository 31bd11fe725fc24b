//! Deck-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use deckcopy_connect::AnkiClient;
//!
//! # async fn example() -> deckcopy_connect::Result<()> {
//! let client = AnkiClient::new();
//!
//! let decks = client.decks().names().await?;
//! if !decks.iter().any(|d| d == "print-jlpt") {
//!     client.decks().create("print-jlpt").await?;
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to deck-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct CreateDeckParams<'a> {
    deck: &'a str,
}

impl<'a> DeckActions<'a> {
    /// Get all deck names.
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.request_without_params("deckNames").await
    }

    /// Create a new deck.
    ///
    /// Returns the deck ID. AnkiConnect does not fail for a deck that already
    /// exists, but some versions answer with a null result, which surfaces
    /// here as [`Error::EmptyResponse`](crate::Error::EmptyResponse).
    pub async fn create(&self, name: &str) -> Result<i64> {
        self.client
            .request("createDeck", CreateDeckParams { deck: name })
            .await
    }
}
