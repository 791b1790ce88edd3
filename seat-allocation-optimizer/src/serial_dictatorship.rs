use seat_allocation_database::Record;
use serde::Serialize;
use tracing::debug;

use crate::capacity::{SeatCapacity, SeatLedger};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Assigned { seat: String },
    /// Every preferred seat was already full at this individual's turn.
    Unassigned,
}

/// One line of the process log, in priority order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocationEvent {
    pub name: String,
    pub score: i64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl AllocationEvent {
    #[must_use]
    pub fn seat(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Assigned { seat } => Some(seat),
            Outcome::Unassigned => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Admitted seat per snapshot record, positionally.
    pub seats: Vec<Option<String>>,
    pub log: Vec<AllocationEvent>,
}

/// Serial dictatorship over ranked preferences.
///
/// `snapshot` must already be in priority order. Each record takes the first of its
/// preferences that still has room and earlier choices are never revisited.
#[must_use]
pub fn assign(snapshot: &[Record], capacity: SeatCapacity) -> Assignment {
    let mut ledger = SeatLedger::discover(snapshot, capacity);
    let mut seats = Vec::with_capacity(snapshot.len());
    let mut log = Vec::with_capacity(snapshot.len());

    for record in snapshot {
        let seat = record
            .preferences
            .iter()
            .find(|seat| ledger.take(seat))
            .cloned();
        let outcome = match &seat {
            Some(seat) => {
                debug!(name = %record.name, score = record.score, %seat, "assigned");
                Outcome::Assigned { seat: seat.clone() }
            }
            None => {
                debug!(name = %record.name, score = record.score, "unassigned");
                Outcome::Unassigned
            }
        };
        log.push(AllocationEvent {
            name: record.name.clone(),
            score: record.score,
            outcome,
        });
        seats.push(seat);
    }

    Assignment { seats, log }
}
