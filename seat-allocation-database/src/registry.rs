use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::error::RegistryError;
use crate::models::Record;
use crate::submission::Submission;

/// Durable store of one [`Record`] per unique name.
///
/// Every method is atomic with respect to other writers. Readers never observe a
/// half-applied upsert or allocation pass.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Creates the record or replaces its score, preferences and timestamp. Either way the
    /// admitted seat ends up cleared.
    async fn upsert(&self, submission: Submission) -> Result<(), RegistryError>;

    async fn get(&self, name: &str) -> Result<Record, RegistryError>;

    /// All records in canonical order, see [`Record::priority_cmp`].
    async fn list_all(&self) -> Result<Vec<Record>, RegistryError>;

    async fn set_admitted(&self, name: &str, seat: Option<&str>) -> Result<(), RegistryError>;

    /// Deletes every record.
    async fn clear(&self) -> Result<(), RegistryError>;

    /// Runs one allocation pass as a single critical section.
    ///
    /// `compute` receives the snapshot in canonical order and returns the admitted seat for
    /// each record, positionally, plus a value that is handed back to the caller. The seats
    /// are written back before any other writer gets to run.
    async fn reassign<F, T>(&self, compute: F) -> Result<T, RegistryError>
    where
        F: FnOnce(&[Record]) -> (Vec<Option<String>>, T) + Send,
        T: Send;
}

/// Seconds since the unix epoch, saturating at zero for clocks set before it.
#[must_use]
pub fn now_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| {
            i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
        })
}
