//! Note-related types.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A new note to be added to Anki.
///
/// Use [`NoteBuilder`] for a more ergonomic way to construct notes.
///
/// Field values are HTML. Field names are case-sensitive and must match the
/// model's field names exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// The deck to add the note to.
    pub deck_name: String,
    /// The note type (model) name.
    pub model_name: String,
    /// Field values, keyed by field name.
    pub fields: HashMap<String, String>,
    /// Tags for the note.
    pub tags: Vec<String>,
}

/// Information about an existing note, as returned by `notesInfo`.
///
/// Parsed leniently: every key may be missing, `tags` and `fields` may be
/// null, and the caller decides what a missing id or model means.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    /// The note ID.
    #[serde(default)]
    pub note_id: Option<i64>,
    /// The note type (model) name.
    #[serde(default)]
    pub model_name: Option<String>,
    /// Tags on the note.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Field contents, keyed by field name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: HashMap<String, FieldContent>,
}

impl NoteInfo {
    /// Field values as plain strings, the shape `addNote` expects.
    pub fn field_values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|(name, content)| (name.clone(), content.value().to_string()))
            .collect()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of a `notesInfo` reply, kept as raw JSON until it is parsed.
///
/// Lets a caller handle a malformed entry on its own instead of losing the
/// whole reply to one bad note.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct NoteEntry(serde_json::Value);

impl NoteEntry {
    /// The `noteId` of the entry, if it has a readable one.
    pub fn note_id(&self) -> Option<i64> {
        self.0.get("noteId").and_then(serde_json::Value::as_i64)
    }

    /// Parse the entry into a [`NoteInfo`].
    pub fn parse(&self) -> crate::Result<NoteInfo> {
        Ok(NoteInfo::deserialize(&self.0)?)
    }
}

impl From<serde_json::Value> for NoteEntry {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// A field's content.
///
/// AnkiConnect reports `{"value": ..., "order": ...}`; a bare string is
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldContent {
    /// A field with its position in the note type.
    Detailed {
        /// The field value (HTML).
        value: String,
        /// The field's position in the note type.
        #[serde(default)]
        order: i32,
    },
    /// Just the value.
    Plain(String),
}

impl FieldContent {
    /// The field value (HTML).
    pub fn value(&self) -> &str {
        match self {
            FieldContent::Detailed { value, .. } => value,
            FieldContent::Plain(value) => value,
        }
    }
}

/// Builder for creating notes with a fluent API.
///
/// # Example
///
/// ```
/// use deckcopy_connect::NoteBuilder;
///
/// let note = NoteBuilder::new("print-jlpt", "Basic")
///     .field("Front", "猫")
///     .field("Back", "cat")
///     .tag("N5")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteBuilder {
    deck_name: String,
    model_name: String,
    fields: HashMap<String, String>,
    tags: Vec<String>,
}

impl NoteBuilder {
    /// Create a new note builder.
    ///
    /// # Arguments
    ///
    /// * `deck` - The deck name to add the note to
    /// * `model` - The note type (model) name
    pub fn new(deck: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            deck_name: deck.into(),
            model_name: model.into(),
            ..Default::default()
        }
    }

    /// Set a field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set every field at once, replacing any set so far.
    pub fn fields(mut self, fields: HashMap<String, String>) -> Self {
        self.fields = fields;
        self
    }

    /// Add a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags to the note.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Build the note.
    pub fn build(self) -> Note {
        Note {
            deck_name: self.deck_name,
            model_name: self.model_name,
            fields: self.fields,
            tags: self.tags,
        }
    }
}
