//! A small async client for the AnkiConnect API.
//!
//! Covers the handful of actions needed to copy notes between decks, in two
//! flavours:
//!
//! - typed action groups ([`AnkiClient::decks()`], [`AnkiClient::notes()`], ...)
//!   that return [`Result`] and surface every failure as an [`Error`];
//! - the lenient [`AnkiClient::invoke()`] and the [`Lenient`] extension, which
//!   log a failure and hand back `None` so callers can treat "no result" as
//!   their only failure signal.
//!
//! # Quick Start
//!
//! ```no_run
//! use deckcopy_connect::{AnkiClient, Lenient};
//!
//! # async fn example() {
//! let client = AnkiClient::builder().endpoint("localhost", 8765).build();
//!
//! match client.misc().version().await.lenient("version") {
//!     Some(version) => println!("AnkiConnect version: {}", version),
//!     None => println!("AnkiConnect is not reachable"),
//! }
//! # }
//! ```
//!
//! # Requirements
//!
//! - Anki must be running with the [AnkiConnect](https://ankiweb.net/shared/info/2055492159) add-on installed
//! - By default, the client connects to `http://localhost:8765`

pub mod actions;
pub mod client;
pub mod error;
mod request;
pub mod types;

pub use client::{AnkiClient, ClientBuilder};
pub use error::{Error, Lenient, Result};
pub use types::{FieldContent, Note, NoteBuilder, NoteEntry, NoteInfo};
