use core::num::NonZeroU32;
use std::collections::BTreeMap;

use seat_allocation_database::Record;
use serde::Serialize;

/// How many individuals fit on one seat. The same for every seat name.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct SeatCapacity(NonZeroU32);

impl SeatCapacity {
    #[must_use]
    pub const fn new(capacity: NonZeroU32) -> Self {
        Self(capacity)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    pub const fn remaining(self, consumed: u32) -> u32 {
        self.0.get().saturating_sub(consumed)
    }
}

/// Seats consumed so far within one allocation pass.
///
/// The known seats are exactly the preference entries of the snapshot it was built from.
#[derive(Debug)]
pub struct SeatLedger<'a> {
    capacity: SeatCapacity,
    consumed: BTreeMap<&'a str, u32>,
}

impl<'a> SeatLedger<'a> {
    #[must_use]
    pub fn discover(snapshot: &'a [Record], capacity: SeatCapacity) -> Self {
        let consumed = snapshot
            .iter()
            .flat_map(|record| &record.preferences)
            .map(|seat| (seat.as_str(), 0))
            .collect();
        Self { capacity, consumed }
    }

    /// Seats not mentioned by any record have no room.
    #[must_use]
    pub fn remaining(&self, seat: &str) -> u32 {
        self.consumed
            .get(seat)
            .map_or(0, |&consumed| self.capacity.remaining(consumed))
    }

    /// Takes one place on `seat` if there is one left.
    pub fn take(&mut self, seat: &str) -> bool {
        if self.remaining(seat) == 0 {
            return false;
        }
        if let Some(consumed) = self.consumed.get_mut(seat) {
            *consumed += 1;
        }
        true
    }
}
