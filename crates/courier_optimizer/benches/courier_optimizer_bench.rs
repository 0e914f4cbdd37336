use std::hint::black_box;

use courier_optimizer::{
    problem::{
        address_index::{AddressEntry, AddressIndex, LocationIdx},
        distance_matrix::DistanceMatrix,
        package::{Deadline, Destination, Package, PackageId},
        package_store::PackageStore,
        tables::Tables,
        truck::{Departure, Truck, TruckBuilder, TruckId},
    },
    solver::dispatch::dispatch,
    utils::time::clock,
};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};

const HUB: &str = "Depot";

/// Random points in a 20x20 mile square, one package per point.
fn random_tables(num_stops: usize) -> Tables {
    let mut rng = SmallRng::seed_from_u64(42);
    let points = (0..=num_stops)
        .map(|_| (rng.random_range(0.0..20.0), rng.random_range(0.0..20.0)))
        .collect::<Vec<(f64, f64)>>();

    let entries = (0..=num_stops)
        .map(|index| AddressEntry {
            index: LocationIdx::new(index),
            name: format!("Location {index}"),
            address: if index == 0 {
                HUB.to_owned()
            } else {
                format!("{index} Bench Rd")
            },
        })
        .collect();

    let rows = points
        .iter()
        .enumerate()
        .map(|(from, a)| {
            points[..=from]
                .iter()
                .map(|b| Some(((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()))
                .collect()
        })
        .collect();

    let packages = (1..=num_stops)
        .map(|id| {
            Package::new(
                PackageId::new(id as u32),
                Destination::new(format!("{id} Bench Rd"), "Salt Lake City", "84101"),
                "UT",
                Deadline::EndOfDay,
                1,
                "",
            )
        })
        .collect::<PackageStore>();

    Tables::new(
        AddressIndex::new(entries).unwrap(),
        DistanceMatrix::from_rows(rows).unwrap(),
        packages,
    )
    .unwrap()
}

fn single_truck(num_stops: usize) -> Vec<Truck> {
    let mut builder = TruckBuilder::new(TruckId::new(1), HUB);
    builder
        .set_capacity(num_stops)
        .set_departure(Departure::At(clock(8, 0, 0)))
        .set_packages((1..=num_stops as u32).map(PackageId::new).collect());
    vec![builder.build()]
}

fn nearest_neighbor_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest neighbor");

    for num_stops in [16, 64, 256] {
        let tables = random_tables(num_stops);
        let trucks = single_truck(num_stops);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_stops),
            &num_stops,
            |b, _| {
                b.iter_batched(
                    || (trucks.clone(), tables.packages.clone()),
                    |(mut trucks, mut packages)| {
                        dispatch(
                            black_box(&mut trucks),
                            &mut packages,
                            &tables.addresses,
                            &tables.distances,
                        )
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn package_store_benchmark(c: &mut Criterion) {
    let tables = random_tables(1000);

    for buckets in [10, 1000] {
        let mut store = PackageStore::with_buckets(buckets);
        for package in tables.packages.iter() {
            store.insert(package.clone());
        }

        c.bench_function(&format!("package store lookup ({buckets} buckets)"), |b| {
            b.iter(|| {
                (1..=1000)
                    .filter(|&id| store.lookup(black_box(PackageId::new(id))).is_some())
                    .count()
            })
        });
    }
}

criterion_group!(benches, nearest_neighbor_benchmark, package_store_benchmark);
criterion_main!(benches);
