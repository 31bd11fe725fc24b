//! Deck-to-deck note copy.
//!
//! The workflow is a fixed sequence of AnkiConnect calls: check the
//! connection, verify the source deck, create the destination, resolve the
//! target model, find and fetch the source notes, re-create each one in the
//! destination, then optionally switch the copies to the target model.
//!
//! Failed calls are logged and treated as "no result"; whether that stops
//! the run depends on the step. A note that fails to copy is counted and the
//! loop moves on.

use deckcopy_connect::actions::deck_query;
use deckcopy_connect::{AnkiClient, Lenient, Note, NoteBuilder, NoteEntry, NoteInfo};
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Default source deck.
pub const DEFAULT_SOURCE_DECK: &str = "NEW-JLPT";
/// Default destination deck.
pub const DEFAULT_DESTINATION_DECK: &str = "print-jlpt";
/// Default target model.
pub const DEFAULT_TARGET_MODEL: &str = "print-JLPT";
/// Default number of notes between progress events.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;

/// Configuration for a deck copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    /// Deck to copy notes from.
    pub source_deck: String,
    /// Deck to create and copy notes into.
    pub destination_deck: String,
    /// Model the copies should use, if it exists. `None` keeps each note's own.
    pub target_model: Option<String>,
    /// Emit a progress event every this many notes (0 disables).
    pub progress_interval: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            source_deck: DEFAULT_SOURCE_DECK.to_string(),
            destination_deck: DEFAULT_DESTINATION_DECK.to_string(),
            target_model: Some(DEFAULT_TARGET_MODEL.to_string()),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl TransferConfig {
    /// Whether a success at `index` (0-based loop position) should report progress.
    ///
    /// Keyed to the position in the note list, not to the number of
    /// successes so far.
    fn progress_due(&self, index: usize) -> bool {
        self.progress_interval > 0 && (index + 1) % self.progress_interval == 0
    }
}

/// Status updates emitted while a copy runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    /// AnkiConnect answered the version check.
    Connected {
        /// Reported API version.
        version: u16,
    },
    /// The source deck exists.
    SourceFound {
        /// Source deck name.
        deck: String,
    },
    /// About to create the destination deck.
    CreatingDeck {
        /// Destination deck name.
        deck: String,
    },
    /// The destination deck was created.
    DeckCreated {
        /// Destination deck name.
        deck: String,
        /// The new deck ID.
        id: i64,
    },
    /// `createDeck` gave no result; the deck probably exists already.
    DeckMayExist {
        /// Destination deck name.
        deck: String,
    },
    /// The requested target model exists and will be used.
    TargetModelFound {
        /// Model name.
        model: String,
    },
    /// The requested target model does not exist; notes keep their own.
    TargetModelMissing {
        /// Model name.
        model: String,
    },
    /// Source notes were found.
    NotesFound {
        /// Number of note ids.
        count: usize,
    },
    /// About to fetch note details.
    FetchingDetails,
    /// The per-note copy loop is starting.
    CopyStarted,
    /// Periodic progress through the note list.
    Progress {
        /// Notes processed so far (loop position).
        processed: usize,
        /// Notes to process.
        total: usize,
    },
    /// A note could not be copied.
    NoteFailed {
        /// The source note ID, if known.
        note_id: Option<i64>,
        /// Why it failed.
        reason: String,
    },
    /// The copy loop is done.
    CopyFinished {
        /// Notes copied.
        succeeded: usize,
        /// Notes that failed.
        failed: usize,
        /// Notes attempted.
        total: usize,
    },
    /// About to switch the copies to the target model.
    ApplyingModel {
        /// Model name.
        model: String,
    },
    /// Outcome of the model switch.
    ModelChanged(ModelChange),
}

/// Outcome of switching the copied notes to the target model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelChange {
    /// Not attempted: no target model, or nothing was copied.
    #[default]
    NotAttempted,
    /// `changeModel` returned a result.
    Applied,
    /// `changeModel` returned null; it may or may not have worked.
    Unconfirmed,
    /// No notes were found in the destination deck.
    NoNotesFound,
    /// `changeModel` failed.
    Failed(String),
}

/// Report of a deck copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Source deck name.
    pub source: String,
    /// Destination deck name.
    pub destination: String,
    /// The target model, if it was found.
    pub target_model: Option<String>,
    /// Number of notes copied.
    pub succeeded: usize,
    /// Number of notes that failed to copy.
    pub failed: usize,
    /// Number of notes attempted.
    pub total: usize,
    /// What happened when switching copies to the target model.
    pub model_change: ModelChange,
}

impl TransferReport {
    /// Whether at least one note was copied.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }
}

/// Build the copy of `info` for `destination`.
///
/// Uses `target_model` when given, otherwise the note's own model. Fields
/// are sent as their string content, not the `{value, order}` objects
/// `notesInfo` reports.
pub fn build_copy(info: &NoteInfo, destination: &str, target_model: Option<&str>) -> Result<Note> {
    let model = target_model
        .or(info.model_name.as_deref())
        .ok_or(Error::MissingModel {
            note_id: info.note_id,
        })?;

    Ok(NoteBuilder::new(destination, model)
        .fields(info.field_values())
        .tags(info.tags.iter().cloned())
        .build())
}

/// Deck copy workflow engine.
#[derive(Debug)]
pub struct TransferEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> TransferEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Copy every note of the source deck into the destination deck.
    ///
    /// Returns an error only when a precondition fails before any note is
    /// copied; per-note failures are counted in the report instead.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use deckcopy_engine::{Engine, TransferConfig};
    /// # async fn example() -> deckcopy_engine::Result<()> {
    /// let engine = Engine::new();
    /// let report = engine
    ///     .transfer()
    ///     .copy_deck(&TransferConfig::default(), |event| println!("{:?}", event))
    ///     .await?;
    /// println!("Copied {} of {} notes", report.succeeded, report.total);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn copy_deck<F>(&self, config: &TransferConfig, mut on_event: F) -> Result<TransferReport>
    where
        F: FnMut(&TransferEvent),
    {
        let version = self
            .client
            .misc()
            .version()
            .await
            .lenient("version")
            .ok_or(Error::Unreachable)?;
        on_event(&TransferEvent::Connected { version });

        let decks = self
            .client
            .decks()
            .names()
            .await
            .lenient("deckNames")
            .unwrap_or_default();
        if !decks.contains(&config.source_deck) {
            return Err(Error::DeckNotFound(config.source_deck.clone()));
        }
        on_event(&TransferEvent::SourceFound {
            deck: config.source_deck.clone(),
        });

        self.provision_destination(&config.destination_deck, &mut on_event)
            .await;

        let target_model = self.resolve_target_model(config, &mut on_event).await;

        let query = deck_query(&config.source_deck);
        let note_ids = self
            .client
            .notes()
            .find(&query)
            .await
            .lenient("findNotes")
            .unwrap_or_default();
        if note_ids.is_empty() {
            return Err(Error::NoNotesFound(config.source_deck.clone()));
        }
        on_event(&TransferEvent::NotesFound {
            count: note_ids.len(),
        });

        on_event(&TransferEvent::FetchingDetails);
        let notes = self
            .client
            .notes()
            .info_entries(&note_ids)
            .await
            .lenient("notesInfo")
            .filter(|notes| !notes.is_empty())
            .ok_or(Error::NoteDetailsUnavailable)?;

        let mut report = TransferReport {
            source: config.source_deck.clone(),
            destination: config.destination_deck.clone(),
            target_model: target_model.clone(),
            total: notes.len(),
            ..Default::default()
        };

        on_event(&TransferEvent::CopyStarted);
        for (index, entry) in notes.iter().enumerate() {
            match self
                .copy_note(entry, &config.destination_deck, target_model.as_deref())
                .await
            {
                Ok(new_id) => {
                    debug!(source_id = ?entry.note_id(), new_id, "Copied note");
                    report.succeeded += 1;
                    if config.progress_due(index) {
                        on_event(&TransferEvent::Progress {
                            processed: index + 1,
                            total: report.total,
                        });
                    }
                }
                Err(e) => {
                    warn!(note_id = ?entry.note_id(), error = %e, "Failed to copy note");
                    report.failed += 1;
                    on_event(&TransferEvent::NoteFailed {
                        note_id: entry.note_id(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            total = report.total,
            "Copy finished"
        );
        on_event(&TransferEvent::CopyFinished {
            succeeded: report.succeeded,
            failed: report.failed,
            total: report.total,
        });

        if let Some(model) = target_model.as_deref() {
            if report.succeeded > 0 {
                report.model_change = self
                    .apply_target_model(&config.destination_deck, model, &mut on_event)
                    .await;
            }
        }

        Ok(report)
    }

    async fn provision_destination<F>(&self, deck: &str, on_event: &mut F)
    where
        F: FnMut(&TransferEvent),
    {
        on_event(&TransferEvent::CreatingDeck {
            deck: deck.to_string(),
        });

        match self.client.decks().create(deck).await.lenient("createDeck") {
            Some(id) => on_event(&TransferEvent::DeckCreated {
                deck: deck.to_string(),
                id,
            }),
            None => on_event(&TransferEvent::DeckMayExist {
                deck: deck.to_string(),
            }),
        }
    }

    async fn resolve_target_model<F>(
        &self,
        config: &TransferConfig,
        on_event: &mut F,
    ) -> Option<String>
    where
        F: FnMut(&TransferEvent),
    {
        let requested = config.target_model.as_ref()?;

        let models = self
            .client
            .models()
            .names()
            .await
            .lenient("modelNames")
            .unwrap_or_default();

        if models.contains(requested) {
            on_event(&TransferEvent::TargetModelFound {
                model: requested.clone(),
            });
            Some(requested.clone())
        } else {
            on_event(&TransferEvent::TargetModelMissing {
                model: requested.clone(),
            });
            None
        }
    }

    async fn copy_note(
        &self,
        entry: &NoteEntry,
        destination: &str,
        target_model: Option<&str>,
    ) -> Result<i64> {
        let info = entry.parse()?;
        let note = build_copy(&info, destination, target_model)?;
        Ok(self.client.notes().add(&note).await?)
    }

    async fn apply_target_model<F>(
        &self,
        destination: &str,
        model: &str,
        on_event: &mut F,
    ) -> ModelChange
    where
        F: FnMut(&TransferEvent),
    {
        on_event(&TransferEvent::ApplyingModel {
            model: model.to_string(),
        });

        let note_ids = self
            .client
            .notes()
            .find(&deck_query(destination))
            .await
            .lenient("findNotes")
            .unwrap_or_default();

        let outcome = if note_ids.is_empty() {
            ModelChange::NoNotesFound
        } else {
            match self.client.models().change(&note_ids, model).await {
                Ok(Some(_)) => ModelChange::Applied,
                Ok(None) => ModelChange::Unconfirmed,
                Err(e) => {
                    warn!(model, error = %e, "Failed to apply target model");
                    ModelChange::Failed(e.to_string())
                }
            }
        };

        on_event(&TransferEvent::ModelChanged(outcome.clone()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckcopy_connect::FieldContent;
    use std::collections::HashMap;

    fn note_info(id: Option<i64>, model: Option<&str>) -> NoteInfo {
        let mut fields = HashMap::new();
        fields.insert(
            "Front".to_string(),
            FieldContent::Detailed {
                value: "猫".to_string(),
                order: 0,
            },
        );
        NoteInfo {
            note_id: id,
            model_name: model.map(str::to_string),
            tags: vec!["N5".to_string()],
            fields,
        }
    }

    #[test]
    fn build_copy_prefers_target_model() {
        let note = build_copy(&note_info(Some(1), Some("Basic")), "print-jlpt", Some("print-JLPT"))
            .unwrap();

        assert_eq!(note.model_name, "print-JLPT");
        assert_eq!(note.deck_name, "print-jlpt");
        assert_eq!(note.fields["Front"], "猫");
        assert_eq!(note.tags, vec!["N5"]);
    }

    #[test]
    fn build_copy_falls_back_to_own_model() {
        let note = build_copy(&note_info(Some(1), Some("Basic")), "print-jlpt", None).unwrap();
        assert_eq!(note.model_name, "Basic");
    }

    #[test]
    fn build_copy_without_any_model_fails() {
        let err = build_copy(&note_info(Some(9), None), "print-jlpt", None).unwrap_err();
        assert!(matches!(err, Error::MissingModel { note_id: Some(9) }));
    }

    #[test]
    fn progress_is_keyed_to_loop_position() {
        let config = TransferConfig {
            progress_interval: 50,
            ..Default::default()
        };

        assert!(!config.progress_due(0));
        assert!(config.progress_due(49));
        assert!(!config.progress_due(50));
        assert!(config.progress_due(99));
    }

    #[test]
    fn zero_interval_disables_progress() {
        let config = TransferConfig {
            progress_interval: 0,
            ..Default::default()
        };
        assert!(!config.progress_due(0));
    }

    #[test]
    fn default_config_matches_jlpt_decks() {
        let config = TransferConfig::default();
        assert_eq!(config.source_deck, "NEW-JLPT");
        assert_eq!(config.destination_deck, "print-jlpt");
        assert_eq!(config.target_model.as_deref(), Some("print-JLPT"));
    }
}
