//! Turns a registry snapshot into seat assignments.

pub mod capacity;
pub mod occupancy;
pub mod serial_dictatorship;

pub use capacity::SeatCapacity;
pub use occupancy::{occupancy, SeatOccupancy};
use seat_allocation_database::{Placement, Registry, RegistryError};
use serde::Serialize;
pub use serial_dictatorship::{assign, AllocationEvent, Assignment, Outcome};
use tracing::{info, instrument};

/// What one allocation pass did.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub log: Vec<AllocationEvent>,
    /// Every record with its new admitted seat, in priority order.
    pub results: Vec<Placement>,
}

/// Recomputes every admitted seat from the full current snapshot and stores the result.
#[instrument(skip(registry))]
pub async fn allocate<R: Registry>(
    registry: &R,
    capacity: SeatCapacity,
) -> Result<Allocation, RegistryError> {
    let allocation = registry
        .reassign(|snapshot| {
            let Assignment { seats, log } = assign(snapshot, capacity);
            let results = snapshot
                .iter()
                .zip(&seats)
                .map(|(record, seat)| Placement {
                    name: record.name.clone(),
                    score: record.score,
                    admitted_seat: seat.clone(),
                })
                .collect();
            (seats, Allocation { log, results })
        })
        .await?;

    let assigned = allocation
        .log
        .iter()
        .filter(|event| event.seat().is_some())
        .count();
    info!(
        assigned,
        unassigned = allocation.log.len() - assigned,
        "allocation pass finished"
    );
    Ok(allocation)
}
