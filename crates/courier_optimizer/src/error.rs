use thiserror::Error;

use crate::problem::{package::PackageId, truck::TruckId};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read table {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Address row {position} declares index {index}, expected {position}")]
    AddressIndexMismatch { position: usize, index: usize },

    #[error("Distance row {row} has {found} cells, expected at most {expected}")]
    RaggedDistanceRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("No distance recorded between locations {from} and {to} in either direction")]
    MissingDistance { from: usize, to: usize },

    #[error("Invalid distance {value} between locations {from} and {to}")]
    InvalidDistance { from: usize, to: usize, value: f64 },

    #[error("Address table has {addresses} rows but the distance table has {distances}")]
    DimensionMismatch { addresses: usize, distances: usize },
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("No loaded address contains {0:?}")]
    UnknownAddress(String),

    #[error("Truck {truck} lists package {package} which is not in the package store")]
    MissingPackage { truck: TruckId, package: PackageId },

    #[error("Truck {truck} lists package {package} more than once")]
    DuplicatePackage { truck: TruckId, package: PackageId },

    #[error("Package {0} already has a delivery time")]
    AlreadyDelivered(PackageId),

    #[error("Truck {0} has already been optimized")]
    AlreadyOptimized(TruckId),

    #[error("Truck {0} has no departure time yet")]
    NotScheduled(TruckId),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Truck {truck} waits on unknown truck {dependency}")]
    UnknownTruck { truck: TruckId, dependency: TruckId },

    #[error("Truck {0} waits on an empty set of trucks")]
    NoDependencies(TruckId),

    #[error("Trucks {0:?} wait on each other and can never depart")]
    Cycle(Vec<TruckId>),

    #[error("Package {package} is on the manifests of trucks {first} and {second}")]
    SharedPackage {
        package: PackageId,
        first: TruckId,
        second: TruckId,
    },

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Package {0} is not on any truck manifest")]
    Unassigned(PackageId),

    #[error("Package {0} has no delivery time, was the fleet dispatched?")]
    NotDelivered(PackageId),

    #[error("Truck {0} has not departed")]
    NotDeparted(TruckId),

    #[error("Unknown truck {0}")]
    UnknownTruck(TruckId),
}

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("Failed to read fleet file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid fleet file: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Truck {0} is declared more than once")]
    DuplicateTruck(TruckId),

    #[error("Truck {truck} has an invalid speed of {speed} mph")]
    InvalidSpeed { truck: TruckId, speed: f64 },

    #[error("Truck {truck} has an invalid departure time: {source}")]
    InvalidDeparture { truck: TruckId, source: ClockError },

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("Invalid time {0:?}, expected H:MM or H:MM:SS")]
    Format(String),

    #[error("Time {0:?} is out of range")]
    Range(String),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Status(#[from] StatusError),
}
