//! Per-player fleet health: remaining hit points for every ship type.

use crate::config::{NUM_SHIPS, SHIPS};
use crate::ship::ShipCode;

/// Remaining hits needed to sink each ship, indexed by [`ShipCode::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetStatus {
    remaining: [u8; NUM_SHIPS],
}

impl FleetStatus {
    /// A fresh fleet: every ship at full length.
    pub fn new() -> Self {
        Self {
            remaining: core::array::from_fn(|i| SHIPS[i].length() as u8),
        }
    }

    pub fn remaining(&self, ship: ShipCode) -> u8 {
        self.remaining[ship.index()]
    }

    pub fn is_destroyed(&self, ship: ShipCode) -> bool {
        self.remaining(ship) == 0
    }

    /// Apply one hit to `ship`. Returns `true` only on the hit that sinks it.
    pub fn register_hit(&mut self, ship: ShipCode) -> bool {
        let hp = &mut self.remaining[ship.index()];
        if *hp == 0 {
            return false;
        }
        *hp -= 1;
        *hp == 0
    }

    /// Number of ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.remaining.iter().filter(|&&hp| hp > 0).count()
    }

    pub fn all_sunk(&self) -> bool {
        self.ships_remaining() == 0
    }

    /// Ships already sunk, in catalog order.
    pub fn sunk(&self) -> impl Iterator<Item = ShipCode> + '_ {
        ShipCode::ALL.into_iter().filter(|s| self.is_destroyed(*s))
    }

    /// Lengths of ships still afloat; zero for sunk ships.
    pub fn lengths_afloat(&self) -> [usize; NUM_SHIPS] {
        core::array::from_fn(|i| {
            if self.remaining[i] > 0 {
                SHIPS[i].length()
            } else {
                0
            }
        })
    }
}

impl Default for FleetStatus {
    fn default() -> Self {
        Self::new()
    }
}
