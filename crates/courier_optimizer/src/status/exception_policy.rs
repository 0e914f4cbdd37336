use jiff::SignedDuration;

use crate::{
    problem::{
        package::{DELAYED_ON_FLIGHT, WRONG_ADDRESS_LISTED},
        truck::TruckId,
    },
    utils::time::clock,
};

/// Known real-world exceptions the status of a package depends on.
#[derive(Debug, Clone)]
pub struct ExceptionPolicy {
    /// Note text of packages arriving late at the hub.
    pub delay_marker: String,
    /// Note text of packages waiting for an address fix.
    pub wrong_address_marker: String,
    /// When delayed packages reach the hub.
    pub flight_arrival: SignedDuration,
    /// The truck that carries late and corrected packages.
    pub late_truck: TruckId,
}

impl Default for ExceptionPolicy {
    fn default() -> Self {
        ExceptionPolicy {
            delay_marker: DELAYED_ON_FLIGHT.to_owned(),
            wrong_address_marker: WRONG_ADDRESS_LISTED.to_owned(),
            flight_arrival: clock(9, 5, 0),
            late_truck: TruckId::new(3),
        }
    }
}
