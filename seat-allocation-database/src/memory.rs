use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::RegistryError;
use crate::models::{NewIndividual, Record};
use crate::registry::{now_seconds, Registry};
use crate::submission::Submission;

#[derive(Debug, Default)]
struct State {
    records: BTreeMap<String, Record>,
    next_id: i64,
}

impl State {
    fn snapshot(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.records.values().cloned().collect();
        records.sort_by(Record::priority_cmp);
        records
    }
}

/// A [`Registry`] that lives in process memory.
///
/// Writers hold the write lock for the whole operation, so an allocation pass sees either
/// all or none of a concurrent submission.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    state: RwLock<State>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// [`Registry::upsert`] with an explicit submission time in seconds since the unix epoch.
    pub async fn upsert_at(&self, submission: Submission, last_updated: i64) {
        let new = NewIndividual::new(submission, last_updated);
        let mut state = self.state.write().await;
        let State { records, next_id } = &mut *state;
        match records.get_mut(&new.name) {
            Some(record) => {
                debug!(name = %new.name, "replacing submission");
                record.score = new.score;
                record.preferences = new.preferences;
                record.admitted_seat = None;
                record.last_updated = new.last_updated;
            }
            None => {
                *next_id += 1;
                debug!(name = %new.name, id = *next_id, "new submission");
                records.insert(
                    new.name.clone(),
                    Record {
                        id: *next_id,
                        name: new.name,
                        score: new.score,
                        preferences: new.preferences,
                        admitted_seat: None,
                        last_updated: new.last_updated,
                    },
                );
            }
        }
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    #[instrument(skip_all, fields(name = submission.name()))]
    async fn upsert(&self, submission: Submission) -> Result<(), RegistryError> {
        self.upsert_at(submission, now_seconds()).await;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Record, RegistryError> {
        self.state
            .read()
            .await
            .records
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    async fn list_all(&self) -> Result<Vec<Record>, RegistryError> {
        Ok(self.state.read().await.snapshot())
    }

    async fn set_admitted(&self, name: &str, seat: Option<&str>) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        let record = state
            .records
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))?;
        record.admitted_seat = seat.map(ToOwned::to_owned);
        Ok(())
    }

    #[instrument(skip_all)]
    async fn clear(&self) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        debug!(count = state.records.len(), "deleting all records");
        state.records.clear();
        Ok(())
    }

    #[instrument(skip_all)]
    async fn reassign<F, T>(&self, compute: F) -> Result<T, RegistryError>
    where
        F: FnOnce(&[Record]) -> (Vec<Option<String>>, T) + Send,
        T: Send,
    {
        let mut state = self.state.write().await;
        let snapshot = state.snapshot();
        let (seats, output) = compute(&snapshot);
        for (record, seat) in snapshot.iter().zip(seats) {
            if let Some(stored) = state.records.get_mut(&record.name) {
                stored.admitted_seat = seat;
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, score: i64, preferences: &[&str]) -> Submission {
        Submission::new(name, score, preferences).unwrap()
    }

    #[tokio::test]
    async fn resubmission_replaces_instead_of_adding() {
        let registry = MemoryRegistry::new();
        registry
            .upsert(submission("Alice", 50, &["Row1"]))
            .await
            .unwrap();
        registry
            .upsert(submission("Alice", 90, &["Row2", "Row1"]))
            .await
            .unwrap();

        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].score, 90);
        assert_eq!(all[0].preferences, ["Row2", "Row1"]);
    }

    #[tokio::test]
    async fn resubmission_keeps_id_and_clears_admission() {
        let registry = MemoryRegistry::new();
        registry
            .upsert(submission("Alice", 50, &["Row1"]))
            .await
            .unwrap();
        let first = registry.get("Alice").await.unwrap();
        registry.set_admitted("Alice", Some("Row1")).await.unwrap();
        assert_eq!(
            registry.get("Alice").await.unwrap().admitted_seat.as_deref(),
            Some("Row1")
        );

        registry
            .upsert(submission("Alice", 50, &["Row1"]))
            .await
            .unwrap();
        let second = registry.get("Alice").await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.admitted_seat, None);
    }

    #[tokio::test]
    async fn lists_in_canonical_order() {
        let registry = MemoryRegistry::new();
        registry
            .upsert_at(submission("late", 80, &["Row1"]), 20)
            .await;
        registry
            .upsert_at(submission("early", 80, &["Row1"]), 10)
            .await;
        registry.upsert_at(submission("top", 95, &["Row1"]), 30).await;
        registry
            .upsert_at(submission("same-second", 80, &["Row1"]), 20)
            .await;

        let names: Vec<String> = registry
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|record| record.name)
            .collect();
        assert_eq!(names, ["top", "early", "late", "same-second"]);
    }

    #[tokio::test]
    async fn unknown_names_are_not_found() {
        let registry = MemoryRegistry::new();
        assert!(matches!(
            registry.get("nobody").await,
            Err(RegistryError::NotFound(name)) if name == "nobody"
        ));
        assert!(matches!(
            registry.set_admitted("nobody", Some("Row1")).await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn clear_empties_the_registry() {
        let registry = MemoryRegistry::new();
        registry
            .upsert(submission("Alice", 1, &["Row1"]))
            .await
            .unwrap();
        registry.upsert(submission("Bob", 2, &["Row1"])).await.unwrap();
        registry.clear().await.unwrap();
        assert!(registry.list_all().await.unwrap().is_empty());
        registry.clear().await.unwrap();
    }

    #[tokio::test]
    async fn reassign_writes_seats_back_positionally() {
        let registry = MemoryRegistry::new();
        registry.upsert_at(submission("Bob", 10, &["Row2"]), 1).await;
        registry.upsert_at(submission("Alice", 20, &["Row1"]), 1).await;

        let seen = registry
            .reassign(|snapshot| {
                let names: Vec<String> =
                    snapshot.iter().map(|record| record.name.clone()).collect();
                (vec![Some("Row1".to_owned()), None], names)
            })
            .await
            .unwrap();

        assert_eq!(seen, ["Alice", "Bob"]);
        assert_eq!(
            registry.get("Alice").await.unwrap().admitted_seat.as_deref(),
            Some("Row1")
        );
        assert_eq!(registry.get("Bob").await.unwrap().admitted_seat, None);
    }
}
