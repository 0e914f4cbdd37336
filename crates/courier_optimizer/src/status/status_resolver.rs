use std::fmt;

use jiff::SignedDuration;
use serde::{Serialize, Serializer};

use crate::{
    error::StatusError,
    problem::{
        package::{Package, PackageStatus},
        truck::{Truck, TruckId},
    },
    status::{address_correction::CorrectionTable, exception_policy::ExceptionPolicy},
    utils::time::format_clock,
};

/// Truck shown next to a package, only set while the package is on its way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruckLabel {
    None,
    Truck(TruckId),
}

impl fmt::Display for TruckLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruckLabel::None => f.write_str("None"),
            TruckLabel::Truck(id) => write!(f, "Truck {id}"),
        }
    }
}

impl Serialize for TruckLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A package as seen at a given time.
#[derive(Debug, Clone, Serialize)]
pub struct PackageSnapshot {
    pub at: SignedDuration,
    #[serde(flatten)]
    pub package: Package,
    pub truck: TruckLabel,
}

impl fmt::Display for PackageSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let package = &self.package;
        let delivery_time = package
            .delivery_time()
            .map(format_clock)
            .unwrap_or_else(|| String::from("None"));

        write!(
            f,
            "Package {} to {}, {}, {}, {}, deadline: {}, weight: {}kg, status: {}, notes: {}, delivery time: {}, truck: {}",
            package.id(),
            package.address(),
            package.city(),
            package.state(),
            package.zip(),
            package.deadline(),
            package.weight_kg(),
            package.status(),
            package.notes(),
            delivery_time,
            self.truck,
        )
    }
}

/// Derives the live status of packages from the dispatched fleet.
///
/// Resolving never writes back: the returned snapshot is a copy with the
/// destination, notes, status and truck label as they read at the query time,
/// so the same query always yields the same snapshot.
pub struct StatusResolver<'a> {
    trucks: &'a [Truck],
    policy: &'a ExceptionPolicy,
    corrections: &'a CorrectionTable,
}

impl<'a> StatusResolver<'a> {
    pub fn new(
        trucks: &'a [Truck],
        policy: &'a ExceptionPolicy,
        corrections: &'a CorrectionTable,
    ) -> Self {
        StatusResolver {
            trucks,
            policy,
            corrections,
        }
    }

    pub fn resolve(
        &self,
        package: &Package,
        at: SignedDuration,
    ) -> Result<PackageSnapshot, StatusError> {
        let mut snapshot = package.clone();

        if let Some(correction) = self.corrections.for_package(package.id()) {
            correction.apply(&mut snapshot, at);
        }

        let status = if snapshot.notes().contains(&self.policy.delay_marker) {
            if at < self.policy.flight_arrival {
                PackageStatus::InTransit
            } else {
                progress(&snapshot, at, self.late_departure()?)?
            }
        } else if snapshot.notes().contains(&self.policy.wrong_address_marker) {
            // Held until the late truck leaves, whether or not the correction
            // has come in yet.
            progress(&snapshot, at, self.late_departure()?)?
        } else {
            let truck = self
                .carrier(&snapshot)
                .ok_or(StatusError::Unassigned(snapshot.id()))?;
            let departure = truck
                .departure_time()
                .ok_or(StatusError::NotDeparted(truck.id()))?;

            progress(&snapshot, at, departure)?
        };

        snapshot.set_status(status);

        let truck = match (status, self.carrier(&snapshot)) {
            (PackageStatus::EnRoute, Some(truck)) => TruckLabel::Truck(truck.id()),
            _ => TruckLabel::None,
        };

        Ok(PackageSnapshot {
            at,
            package: snapshot,
            truck,
        })
    }

    fn carrier(&self, package: &Package) -> Option<&'a Truck> {
        self.trucks
            .iter()
            .find(|truck| truck.carries(package.id()))
    }

    fn late_departure(&self) -> Result<SignedDuration, StatusError> {
        let truck = self
            .trucks
            .iter()
            .find(|truck| truck.id() == self.policy.late_truck)
            .ok_or(StatusError::UnknownTruck(self.policy.late_truck))?;

        truck
            .departure_time()
            .ok_or(StatusError::NotDeparted(truck.id()))
    }
}

/// At the hub up to and including the departure, on its way until the
/// delivery time, delivered from then on.
fn progress(
    package: &Package,
    at: SignedDuration,
    departure: SignedDuration,
) -> Result<PackageStatus, StatusError> {
    if at <= departure {
        return Ok(PackageStatus::AtHub);
    }

    let delivery = package
        .delivery_time()
        .ok_or(StatusError::NotDelivered(package.id()))?;

    Ok(if at < delivery {
        PackageStatus::EnRoute
    } else {
        PackageStatus::Delivered
    })
}
