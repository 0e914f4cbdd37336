use fxhash::FxHashSet;
use tracing::{Level, debug, instrument};

use crate::{
    error::RoutingError,
    problem::{
        address_index::{AddressIndex, LocationIdx},
        distance_matrix::DistanceMatrix,
        miles::Miles,
        package::PackageId,
        package_store::PackageStore,
        truck::Truck,
    },
    solver::route_summary::{RouteLeg, RouteSummary},
};

struct Stop {
    package_id: PackageId,
    location: LocationIdx,
    address: String,
}

/// Sequences the truck's manifest by always driving to the closest
/// undelivered package.
///
/// Candidates are scanned in ascending package id and only a strictly shorter
/// distance replaces the current pick, so ties go to the lowest id. Every
/// visited package gets its delivery and departure time stamped and the
/// manifest is replaced by the delivery order. The route ends at the last
/// package, the truck does not return to the hub.
///
/// Everything is validated before the truck or the store is touched.
#[instrument(skip_all, level = Level::DEBUG, fields(truck = %truck.id()))]
pub fn optimize_route(
    truck: &mut Truck,
    store: &mut PackageStore,
    addresses: &AddressIndex,
    distances: &DistanceMatrix,
) -> Result<RouteSummary, RoutingError> {
    if truck.is_optimized() {
        return Err(RoutingError::AlreadyOptimized(truck.id()));
    }
    let departure = truck
        .departure_time()
        .ok_or(RoutingError::NotScheduled(truck.id()))?;

    let mut undelivered = undelivered_stops(truck, store, addresses)?;
    let mut position = addresses.index_of(truck.address())?;
    let mut route = Vec::with_capacity(undelivered.len());
    let mut legs = Vec::with_capacity(undelivered.len());

    while let Some((nearest, distance)) = nearest_stop(position, &undelivered, distances) {
        let stop = undelivered.remove(nearest);
        let arrival = truck.drive_to(&stop.address, distance);

        if let Some(package) = store.lookup_mut(stop.package_id) {
            package.mark_delivered(arrival, departure)?;
        }

        debug!(
            package = %stop.package_id,
            distance = %distance,
            mileage = %truck.mileage(),
            "delivered"
        );

        legs.push(RouteLeg {
            package_id: stop.package_id,
            from: position,
            to: stop.location,
            distance,
            arrival,
        });
        route.push(stop.package_id);
        position = stop.location;
    }

    truck.set_route(route);

    Ok(RouteSummary {
        truck_id: truck.id(),
        departure,
        completion: truck.clock().unwrap_or(departure),
        mileage: truck.mileage(),
        legs,
    })
}

fn undelivered_stops(
    truck: &Truck,
    store: &PackageStore,
    addresses: &AddressIndex,
) -> Result<Vec<Stop>, RoutingError> {
    let mut seen = FxHashSet::default();
    let mut stops = Vec::with_capacity(truck.packages().len());

    for &package_id in truck.packages() {
        if !seen.insert(package_id) {
            return Err(RoutingError::DuplicatePackage {
                truck: truck.id(),
                package: package_id,
            });
        }

        let package = store
            .lookup(package_id)
            .ok_or(RoutingError::MissingPackage {
                truck: truck.id(),
                package: package_id,
            })?;

        if package.delivery_time().is_some() {
            return Err(RoutingError::AlreadyDelivered(package_id));
        }

        stops.push(Stop {
            package_id,
            location: addresses.index_of(package.address())?,
            address: package.address().to_owned(),
        });
    }

    stops.sort_by_key(|stop| stop.package_id);
    Ok(stops)
}

fn nearest_stop(
    from: LocationIdx,
    stops: &[Stop],
    distances: &DistanceMatrix,
) -> Option<(usize, Miles)> {
    let mut nearest: Option<(usize, Miles)> = None;

    for (index, stop) in stops.iter().enumerate() {
        let distance = distances.distance(from, stop.location);
        if nearest.is_none_or(|(_, shortest)| distance < shortest) {
            nearest = Some((index, distance));
        }
    }

    nearest
}
