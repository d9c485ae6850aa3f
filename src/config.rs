//! Fleet catalog and engine configuration.

use crate::common::GameError;
use crate::ship::{ShipCode, ShipType};

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new(ShipCode::AircraftCarrier, "Aircraft Carrier", 5),
    ShipType::new(ShipCode::Battleship, "Battleship", 4),
    ShipType::new(ShipCode::Submarine, "Submarine", 3),
    ShipType::new(ShipCode::Destroyer, "Destroyer", 3),
    ShipType::new(ShipCode::PatrolBoat, "Patrol Boat", 2),
];

/// Total number of ship segments in one fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// The fleet catalog in placement order.
pub fn ship_types() -> &'static [ShipType] {
    &SHIPS
}

/// Look up a catalog entry by its code string (e.g. `"patrol_boat"`).
pub fn ship_type(code: &str) -> Result<ShipType, GameError> {
    code.parse::<ShipCode>().map(ShipCode::ship_type)
}

#[cfg(feature = "std")]
pub use service_config::ServiceConfig;

#[cfg(feature = "std")]
mod service_config {
    use std::env;
    use std::time::Duration;

    /// Hours without a shot after which a game counts as dormant.
    pub const DEFAULT_DORMANT_HOURS: u64 = 12;

    /// Runtime settings for [`crate::GameService`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ServiceConfig {
        pub dormant_after: Duration,
    }

    impl Default for ServiceConfig {
        fn default() -> Self {
            Self::with_dormant_hours(DEFAULT_DORMANT_HOURS)
        }
    }

    impl ServiceConfig {
        /// Settings with a dormancy threshold of `hours`. Values too large
        /// to express in seconds fall back to the default.
        pub fn with_dormant_hours(hours: u64) -> Self {
            let secs = hours
                .checked_mul(3600)
                .unwrap_or(DEFAULT_DORMANT_HOURS * 3600);
            Self {
                dormant_after: Duration::from_secs(secs),
            }
        }

        /// Read settings from the environment. `BATTLESHIP_DORMANT_HOURS`
        /// overrides the dormancy threshold; unparsable values fall back to
        /// the default.
        pub fn from_env() -> Self {
            let hours = env::var("BATTLESHIP_DORMANT_HOURS")
                .ok()
                .and_then(|h| h.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_DORMANT_HOURS);
            Self::with_dormant_hours(hours)
        }
    }
}
