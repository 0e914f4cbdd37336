use jiff::SignedDuration;
use serde::Serialize;

use crate::problem::{
    address_index::LocationIdx, miles::Miles, package::PackageId, truck::TruckId,
};

#[derive(Debug, Clone, Serialize)]
pub struct RouteLeg {
    pub package_id: PackageId,
    pub from: LocationIdx,
    pub to: LocationIdx,
    pub distance: Miles,
    pub arrival: SignedDuration,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub truck_id: TruckId,
    pub departure: SignedDuration,
    pub completion: SignedDuration,
    pub mileage: Miles,
    pub legs: Vec<RouteLeg>,
}

impl RouteSummary {
    pub fn package_ids(&self) -> impl Iterator<Item = PackageId> + '_ {
        self.legs.iter().map(|leg| leg.package_id)
    }

    pub fn total_leg_distance(&self) -> Miles {
        self.legs.iter().map(|leg| leg.distance).sum()
    }
}
