use fxhash::FxHashMap;
use jiff::SignedDuration;
use tracing::{Level, info, instrument};

use crate::{
    error::{DispatchError, RoutingError},
    problem::{
        address_index::AddressIndex,
        distance_matrix::DistanceMatrix,
        package_store::PackageStore,
        truck::{Departure, Truck, TruckId},
    },
    solver::{nearest_neighbor::optimize_route, route_summary::RouteSummary},
    utils::time::format_clock,
};

/// Departure of a truck that waits for other trucks: the moment the first of
/// them completes its route. `None` while any of them is still out or when
/// there is nothing to wait for.
pub fn first_completion<'a>(trucks: impl IntoIterator<Item = &'a Truck>) -> Option<SignedDuration> {
    let mut first: Option<SignedDuration> = None;

    for truck in trucks {
        let completion = truck.completion_time()?;
        first = Some(first.map_or(completion, |first| first.min(completion)));
    }

    first
}

/// Optimizes every truck once, in an order where each truck departs only
/// after the trucks it waits on have completed their routes. Trucks with a
/// fixed departure go first, in slice order.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn dispatch(
    trucks: &mut [Truck],
    store: &mut PackageStore,
    addresses: &AddressIndex,
    distances: &DistanceMatrix,
) -> Result<Vec<RouteSummary>, DispatchError> {
    validate_fleet(trucks)?;

    let mut summaries = Vec::with_capacity(trucks.len());

    while let Some((index, departure)) = next_departure(trucks) {
        let truck = &mut trucks[index];
        truck.depart_at(departure)?;

        info!(
            truck = %truck.id(),
            departure = %format_clock(departure),
            "truck starts deliveries"
        );

        let summary = optimize_route(truck, store, addresses, distances)?;

        info!(
            truck = %summary.truck_id,
            completion = %format_clock(summary.completion),
            mileage = %format!("{:.2}", summary.mileage),
            "truck completes deliveries"
        );

        summaries.push(summary);
    }

    let stuck = trucks
        .iter()
        .filter(|truck| !truck.is_optimized())
        .map(|truck| truck.id())
        .collect::<Vec<_>>();

    if !stuck.is_empty() {
        return Err(DispatchError::Cycle(stuck));
    }

    Ok(summaries)
}

fn next_departure(trucks: &[Truck]) -> Option<(usize, SignedDuration)> {
    let pending = || {
        trucks
            .iter()
            .enumerate()
            .filter(|(_, truck)| !truck.is_optimized())
    };

    let fixed = pending().find_map(|(index, truck)| match truck.departure() {
        Departure::At(time) => Some((index, *time)),
        Departure::FirstCompletionOf(_) => None,
    });

    fixed.or_else(|| {
        pending().find_map(|(index, truck)| match truck.departure() {
            Departure::At(_) => None,
            Departure::FirstCompletionOf(waits_on) => first_completion(
                trucks
                    .iter()
                    .filter(|other| waits_on.contains(&other.id())),
            )
            .map(|departure| (index, departure)),
        })
    })
}

fn validate_fleet(trucks: &[Truck]) -> Result<(), DispatchError> {
    let mut owners: FxHashMap<_, TruckId> = FxHashMap::default();

    for truck in trucks {
        if truck.is_optimized() {
            return Err(RoutingError::AlreadyOptimized(truck.id()).into());
        }

        for &package in truck.packages() {
            if let Some(&first) = owners.get(&package)
                && first != truck.id()
            {
                return Err(DispatchError::SharedPackage {
                    package,
                    first,
                    second: truck.id(),
                });
            }
            owners.insert(package, truck.id());
        }

        if let Departure::FirstCompletionOf(waits_on) = truck.departure() {
            if waits_on.is_empty() {
                return Err(DispatchError::NoDependencies(truck.id()));
            }

            for dependency in waits_on {
                if !trucks.iter().any(|other| other.id() == *dependency) {
                    return Err(DispatchError::UnknownTruck {
                        truck: truck.id(),
                        dependency: *dependency,
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::package::PackageId,
        test_utils::{at_eight, create_line_tables, create_package, create_truck},
        utils::time::clock,
    };

    fn waits_on(ids: &[u8]) -> Departure {
        Departure::FirstCompletionOf(ids.iter().copied().map(TruckId::new).collect())
    }

    #[test]
    fn test_late_truck_leaves_at_first_completion() {
        let mut tables = create_line_tables(
            10,
            vec![
                create_package(1, "Stop 9"),
                create_package(2, "Stop 3"),
                create_package(3, "Stop 6"),
            ],
        );
        let mut trucks = vec![
            create_truck(1, at_eight(), vec![1]),
            create_truck(2, at_eight(), vec![2]),
            create_truck(3, waits_on(&[1, 2]), vec![3]),
        ];

        let summaries = dispatch(
            &mut trucks,
            &mut tables.packages,
            &tables.addresses,
            &tables.distances,
        )
        .unwrap();

        // 9 miles -> 8:30, 3 miles -> 8:10
        assert_eq!(trucks[0].completion_time(), Some(clock(8, 30, 0)));
        assert_eq!(trucks[1].completion_time(), Some(clock(8, 10, 0)));
        assert_eq!(trucks[2].departure_time(), Some(clock(8, 10, 0)));
        assert_eq!(trucks[2].completion_time(), Some(clock(8, 30, 0)));

        let order = summaries.iter().map(|s| s.truck_id.get()).collect::<Vec<_>>();
        assert_eq!(order, vec![1, 2, 3]);

        let package = tables.packages.lookup(PackageId::new(3)).unwrap();
        assert_eq!(package.departure_time(), Some(clock(8, 10, 0)));
    }

    #[test]
    fn test_dependent_truck_listed_first_still_waits() {
        let mut tables = create_line_tables(
            4,
            vec![create_package(1, "Stop 3"), create_package(2, "Stop 1")],
        );
        let mut trucks = vec![
            create_truck(2, waits_on(&[1]), vec![2]),
            create_truck(1, at_eight(), vec![1]),
        ];

        let summaries = dispatch(
            &mut trucks,
            &mut tables.packages,
            &tables.addresses,
            &tables.distances,
        )
        .unwrap();

        let order = summaries.iter().map(|s| s.truck_id.get()).collect::<Vec<_>>();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(trucks[0].departure_time(), Some(clock(8, 10, 0)));
    }

    #[test]
    fn test_first_completion() {
        let mut tables = create_line_tables(
            6,
            vec![create_package(1, "Stop 5"), create_package(2, "Stop 2")],
        );
        let mut first = create_truck(1, at_eight(), vec![1]);
        let mut second = create_truck(2, at_eight(), vec![2]);

        assert_eq!(first_completion([&first, &second]), None);

        for truck in [&mut first, &mut second] {
            truck.depart_at(clock(8, 0, 0)).unwrap();
            optimize_route(
                truck,
                &mut tables.packages,
                &tables.addresses,
                &tables.distances,
            )
            .unwrap();
        }

        assert_eq!(first_completion([&first, &second]), second.completion_time());
        assert_eq!(first_completion(std::iter::empty()), None);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut tables = create_line_tables(2, vec![create_package(1, "Stop 1")]);
        let mut trucks = vec![
            create_truck(1, waits_on(&[2]), vec![1]),
            create_truck(2, waits_on(&[1]), vec![]),
        ];

        let result = dispatch(
            &mut trucks,
            &mut tables.packages,
            &tables.addresses,
            &tables.distances,
        );

        assert!(matches!(result, Err(DispatchError::Cycle(ids)) if ids.len() == 2));
    }

    #[test]
    fn test_unknown_dependency_is_rejected() {
        let mut tables = create_line_tables(2, vec![]);
        let mut trucks = vec![create_truck(1, waits_on(&[7]), vec![])];

        let result = dispatch(
            &mut trucks,
            &mut tables.packages,
            &tables.addresses,
            &tables.distances,
        );

        assert!(matches!(result, Err(DispatchError::UnknownTruck { .. })));
    }

    #[test]
    fn test_shared_package_is_rejected() {
        let mut tables = create_line_tables(2, vec![create_package(1, "Stop 1")]);
        let mut trucks = vec![
            create_truck(1, at_eight(), vec![1]),
            create_truck(2, at_eight(), vec![1]),
        ];

        let result = dispatch(
            &mut trucks,
            &mut tables.packages,
            &tables.addresses,
            &tables.distances,
        );

        assert!(matches!(result, Err(DispatchError::SharedPackage { .. })));
        assert!(!trucks[0].is_optimized());
    }

    #[test]
    fn test_missing_package_aborts_dispatch() {
        let mut tables = create_line_tables(2, vec![]);
        let mut trucks = vec![create_truck(1, at_eight(), vec![4])];

        let result = dispatch(
            &mut trucks,
            &mut tables.packages,
            &tables.addresses,
            &tables.distances,
        );

        assert!(matches!(
            result,
            Err(DispatchError::Routing(RoutingError::MissingPackage { .. }))
        ));
    }
}
