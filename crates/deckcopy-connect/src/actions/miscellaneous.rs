//! Miscellaneous AnkiConnect actions.

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to miscellaneous AnkiConnect operations.
///
/// Obtained via [`AnkiClient::misc()`].
#[derive(Debug)]
pub struct MiscActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

impl<'a> MiscActions<'a> {
    /// Get the AnkiConnect API version.
    ///
    /// Doubles as a connectivity check.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use deckcopy_connect::AnkiClient;
    ///
    /// # async fn example() -> deckcopy_connect::Result<()> {
    /// let client = AnkiClient::new();
    /// let version = client.misc().version().await?;
    /// assert_eq!(version, 6);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn version(&self) -> Result<u16> {
        self.client.request_without_params("version").await
    }
}
