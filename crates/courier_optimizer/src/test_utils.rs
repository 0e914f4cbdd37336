use std::path::PathBuf;

use crate::{
    json::types::JsonFleet,
    parsers::{parser::DatasetParser, wgups::WgupsParser},
    problem::{
        address_index::{AddressEntry, AddressIndex, LocationIdx},
        distance_matrix::DistanceMatrix,
        package::{Deadline, Destination, Package, PackageId},
        package_store::PackageStore,
        tables::Tables,
        truck::{Departure, Truck, TruckBuilder, TruckId},
    },
    simulation::SimulationContext,
    utils::time::clock,
};

pub const HUB: &str = "Hub 0";

pub fn data_fixture_path(fixture: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(fixture)
        .canonicalize()
        .unwrap()
}

pub fn create_address_index(addresses: &[&str]) -> AddressIndex {
    AddressIndex::new(
        addresses
            .iter()
            .enumerate()
            .map(|(index, address)| AddressEntry {
                index: LocationIdx::new(index),
                name: format!("Location {index}"),
                address: (*address).to_owned(),
            })
            .collect(),
    )
    .unwrap()
}

pub fn create_package(id: u32, address: &str) -> Package {
    create_package_with_notes(id, address, "")
}

pub fn create_package_with_notes(id: u32, address: &str, notes: &str) -> Package {
    Package::new(
        PackageId::new(id),
        Destination::new(address, "Salt Lake City", "84101"),
        "UT",
        Deadline::EndOfDay,
        1,
        notes,
    )
}

/// `num_locations` stops on a straight road one mile apart, named
/// `Hub 0`, `Stop 1`, `Stop 2`... Only the lower triangle is filled.
pub fn create_line_tables(num_locations: usize, packages: Vec<Package>) -> Tables {
    let addresses = create_address_index(
        &(0..num_locations)
            .map(|i| if i == 0 { HUB.to_owned() } else { format!("Stop {i}") })
            .collect::<Vec<_>>()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
    );

    let rows = (0..num_locations)
        .map(|from| {
            (0..=from)
                .map(|to| Some((from - to) as f64))
                .collect::<Vec<_>>()
        })
        .collect();

    Tables::new(
        addresses,
        DistanceMatrix::from_rows(rows).unwrap(),
        packages.into_iter().collect::<PackageStore>(),
    )
    .unwrap()
}

pub fn create_truck(id: u8, departure: Departure, packages: Vec<u32>) -> Truck {
    let mut builder = TruckBuilder::new(TruckId::new(id), HUB);
    builder
        .set_departure(departure)
        .set_packages(packages.into_iter().map(PackageId::new).collect());
    builder.build()
}

pub fn at_eight() -> Departure {
    Departure::At(clock(8, 0, 0))
}

pub fn load_wgups_context() -> SimulationContext {
    let dir = data_fixture_path("wgups");
    let tables = WgupsParser.parse(&dir).unwrap();
    let fleet = JsonFleet::from_path(dir.join("fleet.json")).unwrap();
    let trucks = fleet.build_trucks(&tables.addresses).unwrap();

    SimulationContext::new(tables, trucks)
}

pub fn dispatched_wgups_context() -> SimulationContext {
    let mut context = load_wgups_context();
    context.dispatch().unwrap();
    context
}
