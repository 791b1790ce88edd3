pub mod error;
pub mod operator;
pub mod telemetry;

use std::collections::BTreeMap;

use error::AppError;
use operator::{OperatorSecret, OperatorToken};
use seat_allocation_config::Config;
use seat_allocation_database::{Placement, Record, Registry, Submission};
use seat_allocation_optimizer::{allocate, occupancy, Allocation, SeatCapacity, SeatOccupancy};
use tracing::{info, instrument};

/// The operations offered to whatever sits in front of the registry.
///
/// Listing, allocating, resetting and the occupancy view need an [`OperatorToken`].
pub struct SeatService<R> {
    registry: R,
    capacity: SeatCapacity,
    operator: OperatorSecret,
}

impl<R: Registry> SeatService<R> {
    pub fn new(registry: R, capacity: SeatCapacity, operator_password: &str) -> Self {
        Self {
            registry,
            capacity,
            operator: OperatorSecret::new(operator_password),
        }
    }

    pub fn from_config(registry: R, config: &Config) -> Self {
        Self::new(
            registry,
            SeatCapacity::new(config.seat_capacity),
            &config.operator_password,
        )
    }

    pub fn authenticate(&self, password: &str) -> Result<OperatorToken, AppError> {
        self.operator.verify(password)
    }

    /// Records or replaces a submission. Any previous admission is dropped.
    #[instrument(skip(self, preferences))]
    pub async fn submit(
        &self,
        name: &str,
        score: i64,
        preferences: &[String],
    ) -> Result<(), AppError> {
        let submission = Submission::new(name, score, preferences)?;
        self.registry.upsert(submission).await?;
        info!("submission stored");
        Ok(())
    }

    pub async fn lookup(&self, name: &str) -> Result<Record, AppError> {
        Ok(self.registry.get(name.trim()).await?)
    }

    pub async fn list_all(&self, _operator: &OperatorToken) -> Result<Vec<Record>, AppError> {
        Ok(self.registry.list_all().await?)
    }

    pub async fn allocate(&self, _operator: &OperatorToken) -> Result<Allocation, AppError> {
        Ok(allocate(&self.registry, self.capacity).await?)
    }

    #[instrument(skip_all)]
    pub async fn reset(&self, _operator: &OperatorToken) -> Result<(), AppError> {
        self.registry.clear().await?;
        info!("registry cleared");
        Ok(())
    }

    /// Everyone with their admitted seat, highest score first.
    pub async fn results(&self) -> Result<Vec<Placement>, AppError> {
        Ok(self
            .registry
            .list_all()
            .await?
            .into_iter()
            .map(Placement::from)
            .collect())
    }

    pub async fn occupancy(
        &self,
        _operator: &OperatorToken,
    ) -> Result<BTreeMap<String, SeatOccupancy>, AppError> {
        let records = self.registry.list_all().await?;
        Ok(occupancy(&records, self.capacity))
    }
}
