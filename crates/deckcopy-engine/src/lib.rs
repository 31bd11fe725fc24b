//! Deck-to-deck note copy for Anki via AnkiConnect.
//!
//! Built on the [`deckcopy_connect`] client: where that crate maps 1:1 onto
//! AnkiConnect actions, this one strings them together into the copy
//! workflow and reports how it went.
//!
//! # Quick Start
//!
//! ```no_run
//! use deckcopy_engine::{Engine, TransferConfig};
//!
//! # async fn example() -> deckcopy_engine::Result<()> {
//! let engine = Engine::new();
//!
//! let config = TransferConfig {
//!     source_deck: "NEW-JLPT".to_string(),
//!     destination_deck: "print-jlpt".to_string(),
//!     target_model: Some("print-JLPT".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = engine.transfer().copy_deck(&config, |_| {}).await?;
//! println!("Copied {} notes, {} failed", report.succeeded, report.failed);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod transfer;

pub use error::{Error, Result};
pub use transfer::{ModelChange, TransferConfig, TransferEvent, TransferReport};

// Re-export client types for convenience
pub use deckcopy_connect::{AnkiClient, ClientBuilder, Note, NoteBuilder, NoteInfo};

use transfer::TransferEngine;

/// Workflow engine for Anki operations.
///
/// Wraps an [`AnkiClient`] and hands out workflow modules borrowing it.
///
/// # Example
///
/// ```no_run
/// use deckcopy_engine::Engine;
///
/// let client = deckcopy_engine::AnkiClient::builder()
///     .endpoint("localhost", 8765)
///     .build();
/// let engine = Engine::from_client(client);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    client: AnkiClient,
}

impl Engine {
    /// Create a new engine with default client settings.
    ///
    /// Connects to AnkiConnect at `http://localhost:8765`.
    pub fn new() -> Self {
        Self {
            client: AnkiClient::new(),
        }
    }

    /// Create an engine from an existing client.
    pub fn from_client(client: AnkiClient) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }

    /// Access the deck copy workflow.
    pub fn transfer(&self) -> TransferEngine<'_> {
        TransferEngine::new(&self.client)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
