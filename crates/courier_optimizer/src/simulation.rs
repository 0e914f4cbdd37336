use jiff::SignedDuration;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    error::{SimulationError, StatusError},
    problem::{
        address_index::AddressIndex,
        miles::Miles,
        package::PackageId,
        package_store::PackageStore,
        tables::Tables,
        truck::{Truck, TruckId},
    },
    solver::{dispatch::dispatch, route_summary::RouteSummary},
    status::{
        address_correction::CorrectionTable,
        exception_policy::ExceptionPolicy,
        status_resolver::{PackageSnapshot, StatusResolver},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageSelection {
    All,
    Single(PackageId),
}

#[derive(Debug, Clone, Serialize)]
pub struct TruckMileage {
    pub truck_id: TruckId,
    pub mileage: Miles,
}

#[derive(Debug, Clone, Serialize)]
pub struct MileageReport {
    pub trucks: Vec<TruckMileage>,
    pub total: Miles,
}

/// Everything a run works on: the loaded tables, the fleet and the rules the
/// status of a package depends on.
pub struct SimulationContext {
    tables: Tables,
    trucks: Vec<Truck>,
    policy: ExceptionPolicy,
    corrections: CorrectionTable,
    routes: Vec<RouteSummary>,
}

impl SimulationContext {
    pub fn new(tables: Tables, mut trucks: Vec<Truck>) -> Self {
        trucks.sort_by_key(|truck| truck.id());

        SimulationContext {
            tables,
            trucks,
            policy: ExceptionPolicy::default(),
            corrections: CorrectionTable::wgups(),
            routes: vec![],
        }
    }

    pub fn with_policy(mut self, policy: ExceptionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_corrections(mut self, corrections: CorrectionTable) -> Self {
        self.corrections = corrections;
        self
    }

    #[instrument(skip_all)]
    pub fn dispatch(&mut self) -> Result<&[RouteSummary], SimulationError> {
        self.routes = dispatch(
            &mut self.trucks,
            &mut self.tables.packages,
            &self.tables.addresses,
            &self.tables.distances,
        )?;

        info!(
            trucks = self.routes.len(),
            mileage = %format!("{:.2}", self.mileage_report().total),
            "fleet dispatched"
        );

        Ok(&self.routes)
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn truck(&self, id: TruckId) -> Option<&Truck> {
        self.trucks.iter().find(|truck| truck.id() == id)
    }

    pub fn packages(&self) -> &PackageStore {
        &self.tables.packages
    }

    pub fn addresses(&self) -> &AddressIndex {
        &self.tables.addresses
    }

    pub fn routes(&self) -> &[RouteSummary] {
        &self.routes
    }

    pub fn is_dispatched(&self) -> bool {
        !self.trucks.is_empty() && self.trucks.iter().all(Truck::is_optimized)
    }

    pub fn mileage_report(&self) -> MileageReport {
        let trucks = self
            .trucks
            .iter()
            .map(|truck| TruckMileage {
                truck_id: truck.id(),
                mileage: truck.mileage(),
            })
            .collect::<Vec<_>>();
        let total = trucks.iter().map(|truck| truck.mileage).sum();

        MileageReport { trucks, total }
    }

    /// Snapshots in ascending package id. An unknown id selects nothing.
    pub fn query(
        &self,
        at: SignedDuration,
        selection: PackageSelection,
    ) -> Result<Vec<PackageSnapshot>, StatusError> {
        match selection {
            PackageSelection::All => {
                let resolver = self.resolver();
                self.tables
                    .packages
                    .iter()
                    .map(|package| resolver.resolve(package, at))
                    .collect()
            }
            PackageSelection::Single(id) => Ok(self.package_status(id, at)?.into_iter().collect()),
        }
    }

    pub fn package_status(
        &self,
        id: PackageId,
        at: SignedDuration,
    ) -> Result<Option<PackageSnapshot>, StatusError> {
        self.tables
            .packages
            .lookup(id)
            .map(|package| self.resolver().resolve(package, at))
            .transpose()
    }

    fn resolver(&self) -> StatusResolver<'_> {
        StatusResolver::new(&self.trucks, &self.policy, &self.corrections)
    }
}
