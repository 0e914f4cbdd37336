use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    define_id_newtype,
    error::RoutingError,
    problem::{miles::Miles, mph::Mph, package::PackageId},
    utils::time::clock,
};

define_id_newtype!(TruckId, u8);

pub const DEFAULT_SPEED_MPH: f64 = 18.0;
pub const DEFAULT_CAPACITY: usize = 16;
pub const DEFAULT_DEPARTURE: SignedDuration = clock(8, 0, 0);

/// When a truck leaves the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Departure {
    At(SignedDuration),
    /// Leaves as soon as the first of these trucks finishes its route.
    FirstCompletionOf(Vec<TruckId>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Truck {
    id: TruckId,
    speed: Mph,
    /// Informational, manifests are assigned up front.
    capacity: usize,
    start_address: String,
    address: String,
    mileage: Miles,
    clock: Option<SignedDuration>,
    departure: Departure,
    departure_time: Option<SignedDuration>,
    packages: Vec<PackageId>,
    optimized: bool,
}

impl Truck {
    pub fn id(&self) -> TruckId {
        self.id
    }

    pub fn speed(&self) -> Mph {
        self.speed
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn start_address(&self) -> &str {
        &self.start_address
    }

    /// Where the truck currently is.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn mileage(&self) -> Miles {
        self.mileage
    }

    /// Simulated time of the truck, `None` until it departs.
    pub fn clock(&self) -> Option<SignedDuration> {
        self.clock
    }

    pub fn departure(&self) -> &Departure {
        &self.departure
    }

    pub fn departure_time(&self) -> Option<SignedDuration> {
        self.departure_time
    }

    /// The manifest, or the delivery order once optimized.
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    pub fn carries(&self, package_id: PackageId) -> bool {
        self.packages.contains(&package_id)
    }

    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// Time the last package was delivered.
    pub fn completion_time(&self) -> Option<SignedDuration> {
        if self.optimized { self.clock } else { None }
    }

    pub(crate) fn depart_at(&mut self, time: SignedDuration) -> Result<(), RoutingError> {
        if self.optimized {
            return Err(RoutingError::AlreadyOptimized(self.id));
        }

        self.departure_time = Some(time);
        self.clock = Some(time);
        Ok(())
    }

    /// Drives one leg. Mileage and clock only move forward.
    pub(crate) fn drive_to(&mut self, address: &str, distance: Miles) -> SignedDuration {
        let clock = self.clock.unwrap_or(SignedDuration::ZERO) + distance / self.speed;

        self.mileage += distance;
        self.clock = Some(clock);
        self.address = address.to_owned();
        clock
    }

    pub(crate) fn set_route(&mut self, route: Vec<PackageId>) {
        self.packages = route;
        self.optimized = true;
    }
}

pub struct TruckBuilder {
    id: TruckId,
    start_address: String,
    speed: Option<Mph>,
    capacity: Option<usize>,
    departure: Option<Departure>,
    packages: Vec<PackageId>,
}

impl TruckBuilder {
    pub fn new(id: TruckId, start_address: impl Into<String>) -> Self {
        TruckBuilder {
            id,
            start_address: start_address.into(),
            speed: None,
            capacity: None,
            departure: None,
            packages: Vec::new(),
        }
    }

    pub fn set_speed(&mut self, speed: Mph) -> &mut TruckBuilder {
        self.speed = Some(speed);
        self
    }

    pub fn set_capacity(&mut self, capacity: usize) -> &mut TruckBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_departure(&mut self, departure: Departure) -> &mut TruckBuilder {
        self.departure = Some(departure);
        self
    }

    pub fn set_packages(&mut self, packages: Vec<PackageId>) -> &mut TruckBuilder {
        self.packages = packages;
        self
    }

    pub fn build(self) -> Truck {
        Truck {
            id: self.id,
            speed: self.speed.unwrap_or(Mph::new(DEFAULT_SPEED_MPH)),
            capacity: self.capacity.unwrap_or(DEFAULT_CAPACITY),
            address: self.start_address.clone(),
            start_address: self.start_address,
            mileage: Miles::ZERO,
            clock: None,
            departure: self
                .departure
                .unwrap_or(Departure::At(DEFAULT_DEPARTURE)),
            departure_time: None,
            packages: self.packages,
            optimized: false,
        }
    }
}
