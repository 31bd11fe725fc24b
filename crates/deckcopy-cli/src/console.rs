//! Console rendering of workflow events and outcomes.

use deckcopy_engine::{Error, ModelChange, TransferConfig, TransferEvent, TransferReport};

/// Width of the banner underline.
const RULE_WIDTH: usize = 40;

/// The header printed before anything else.
pub fn banner(config: &TransferConfig) -> String {
    format!(
        "{} -> {} deck copy\n{}",
        config.source_deck,
        config.destination_deck,
        "=".repeat(RULE_WIDTH)
    )
}

/// The line(s) printed for an event, if any.
pub fn render_event(event: &TransferEvent) -> Option<String> {
    let line = match event {
        TransferEvent::Connected { version } => format!("AnkiConnect version: {}", version),
        TransferEvent::SourceFound { deck } => format!("Copying deck {}...", deck),
        TransferEvent::CreatingDeck { deck } => format!("Creating destination deck {}...", deck),
        TransferEvent::DeckCreated { .. } => "Deck created".to_string(),
        TransferEvent::DeckMayExist { .. } => {
            "Creating the deck may have failed, it probably exists already".to_string()
        }
        TransferEvent::TargetModelFound { model } => format!("Found target note type: {}", model),
        TransferEvent::TargetModelMissing { model } => format!(
            "Warning: note type {} not found, keeping each note's own note type",
            model
        ),
        TransferEvent::NotesFound { count } => format!("Found {} notes to copy", count),
        TransferEvent::FetchingDetails => "Fetching note details...".to_string(),
        TransferEvent::CopyStarted => "Copying notes...".to_string(),
        TransferEvent::Progress { processed, total } => {
            format!("Processed {}/{} notes", processed, total)
        }
        TransferEvent::NoteFailed { note_id, reason } => match note_id {
            Some(id) => format!("Failed to copy note {}: {}", id, reason),
            None => format!("Failed to copy note unknown: {}", reason),
        },
        TransferEvent::CopyFinished {
            succeeded,
            failed,
            total,
        } => format!(
            "\nCopy finished!\nCopied: {} notes\nFailed: {} notes\nTotal: {} notes",
            succeeded, failed, total
        ),
        TransferEvent::ApplyingModel { model } => format!("\nApplying note type {}...", model),
        TransferEvent::ModelChanged(change) => return render_model_change(change),
    };
    Some(line)
}

fn render_model_change(change: &ModelChange) -> Option<String> {
    match change {
        ModelChange::NotAttempted | ModelChange::NoNotesFound => None,
        ModelChange::Applied => Some("Note type applied".to_string()),
        ModelChange::Unconfirmed => Some("Applying the note type may have failed".to_string()),
        ModelChange::Failed(reason) => Some(format!("Error while applying note type: {}", reason)),
    }
}

/// Print an event to stdout.
pub fn print_event(event: &TransferEvent) {
    if let Some(line) = render_event(event) {
        println!("{}", line);
    }
}

/// The closing lines for a finished (or stopped) run.
pub fn render_outcome(
    config: &TransferConfig,
    result: &deckcopy_engine::Result<TransferReport>,
) -> String {
    match result {
        Ok(report) if report.is_success() => format!(
            "\nCopy complete! Check the {} deck in Anki",
            config.destination_deck
        ),
        Ok(_) => failed_footer(),
        Err(Error::Unreachable) => [
            "Error: cannot connect to AnkiConnect",
            "Please make sure:",
            "1. Anki is running",
            "2. the AnkiConnect add-on is installed and enabled",
        ]
        .join("\n"),
        Err(
            e @ (Error::DeckNotFound(_)
            | Error::NoNotesFound(_)
            | Error::NoteDetailsUnavailable),
        ) => format!("Error: {}{}", e, failed_footer()),
        Err(e) => format!("\nProgram error: {}", e),
    }
}

fn failed_footer() -> String {
    "\nCopy failed, check the messages above".to_string()
}
