//! Domain types for AnkiConnect.

mod note;

pub use note::{FieldContent, Note, NoteBuilder, NoteEntry, NoteInfo};
