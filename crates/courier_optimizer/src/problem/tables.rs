use crate::{
    error::TableError,
    problem::{
        address_index::AddressIndex, distance_matrix::DistanceMatrix, package_store::PackageStore,
    },
};

/// The three loaded tables the simulation runs on.
#[derive(Debug, Clone)]
pub struct Tables {
    pub addresses: AddressIndex,
    pub distances: DistanceMatrix,
    pub packages: PackageStore,
}

impl Tables {
    pub fn new(
        addresses: AddressIndex,
        distances: DistanceMatrix,
        packages: PackageStore,
    ) -> Result<Self, TableError> {
        if addresses.len() != distances.num_locations() {
            return Err(TableError::DimensionMismatch {
                addresses: addresses.len(),
                distances: distances.num_locations(),
            });
        }

        Ok(Tables {
            addresses,
            distances,
            packages,
        })
    }
}
