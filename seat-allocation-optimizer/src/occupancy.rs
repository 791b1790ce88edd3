use std::collections::BTreeMap;

use itertools::Itertools;
use seat_allocation_database::Record;
use serde::Serialize;

use crate::capacity::SeatCapacity;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SeatOccupancy {
    /// In priority order.
    pub occupants: Vec<String>,
    pub capacity: SeatCapacity,
}

impl SeatOccupancy {
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.remaining(u32::try_from(self.occupants.len()).unwrap_or(u32::MAX)) == 0
    }
}

/// Who currently sits where, for every seat that has at least one occupant.
///
/// `records` is expected in priority order, as returned by the registry.
#[must_use]
pub fn occupancy(records: &[Record], capacity: SeatCapacity) -> BTreeMap<String, SeatOccupancy> {
    records
        .iter()
        .filter_map(|record| {
            record
                .admitted_seat
                .clone()
                .map(|seat| (seat, record.name.clone()))
        })
        .into_group_map()
        .into_iter()
        .map(|(seat, occupants)| {
            (
                seat,
                SeatOccupancy {
                    occupants,
                    capacity,
                },
            )
        })
        .collect()
}
