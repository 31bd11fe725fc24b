//! Model-related AnkiConnect actions.

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to model-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::models()`].
#[derive(Debug)]
pub struct ModelActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeModelParams<'a> {
    notes: &'a [i64],
    model_name: &'a str,
}

impl<'a> ModelActions<'a> {
    /// Get all model (note type) names.
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.request_without_params("modelNames").await
    }

    /// Switch a batch of notes to another model in one call.
    ///
    /// Returns whatever the action answers with; `None` means a null result,
    /// which does not by itself tell success from failure.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use deckcopy_connect::AnkiClient;
    /// # async fn example() -> deckcopy_connect::Result<()> {
    /// let client = AnkiClient::new();
    /// let notes = client.notes().find("deck:\"print-jlpt\"").await?;
    /// client.models().change(&notes, "print-JLPT").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn change(
        &self,
        note_ids: &[i64],
        model_name: &str,
    ) -> Result<Option<serde_json::Value>> {
        self.client
            .request_nullable(
                "changeModel",
                ChangeModelParams {
                    notes: note_ids,
                    model_name,
                },
            )
            .await
    }
}
