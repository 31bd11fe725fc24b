//! Note-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use deckcopy_connect::{AnkiClient, NoteBuilder};
//!
//! # async fn example() -> deckcopy_connect::Result<()> {
//! let client = AnkiClient::new();
//!
//! let note_ids = client.notes().find("deck:\"NEW-JLPT\"").await?;
//! for info in client.notes().info(&note_ids).await? {
//!     let model = info.model_name.clone().unwrap_or_else(|| "Basic".to_string());
//!     let note = NoteBuilder::new("print-jlpt", model)
//!         .fields(info.field_values())
//!         .tags(info.tags)
//!         .build();
//!     client.notes().add(&note).await?;
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::{Note, NoteEntry, NoteInfo};

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct AddNoteParams<'a> {
    note: &'a Note,
}

#[derive(Serialize)]
struct FindNotesParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct NotesInfoParams<'a> {
    notes: &'a [i64],
}

impl<'a> NoteActions<'a> {
    /// Add a new note.
    ///
    /// Returns the ID of the created note. AnkiConnect rejects duplicates
    /// with an error.
    pub async fn add(&self, note: &Note) -> Result<i64> {
        self.client
            .request("addNote", AddNoteParams { note })
            .await
    }

    /// Find notes matching a query.
    ///
    /// Uses Anki's search syntax, e.g. `deck:"NEW-JLPT"` for every note in a
    /// deck. Use [`info()`](Self::info) to get full note details.
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .request("findNotes", FindNotesParams { query })
            .await
    }

    /// Get detailed information about notes, in one call.
    pub async fn info(&self, note_ids: &[i64]) -> Result<Vec<NoteInfo>> {
        self.client
            .request("notesInfo", NotesInfoParams { notes: note_ids })
            .await
    }

    /// Get note details without parsing the individual entries.
    ///
    /// Only the envelope and the list have to be well-formed; each
    /// [`NoteEntry`] is parsed by the caller.
    pub async fn info_entries(&self, note_ids: &[i64]) -> Result<Vec<NoteEntry>> {
        self.client
            .request("notesInfo", NotesInfoParams { notes: note_ids })
            .await
    }
}

/// Build an Anki search query selecting every note in `deck`.
///
/// ```
/// assert_eq!(deckcopy_connect::actions::deck_query("NEW-JLPT"), "deck:\"NEW-JLPT\"");
/// ```
pub fn deck_query(deck: &str) -> String {
    format!("deck:\"{}\"", deck)
}
