use std::path::{Path, PathBuf};

use anyhow::Context;
use courier_optimizer::{
    json::types::JsonFleet,
    parsers::{parser::DatasetParser, wgups::WgupsParser},
    simulation::SimulationContext,
};
use tracing::info;

pub const DATA_DIR_ENV: &str = "COURIER_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data/wgups";
pub const FLEET_FILE: &str = "fleet.json";

pub fn data_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub fn fleet_file(arg: Option<PathBuf>, data_dir: &Path) -> PathBuf {
    arg.unwrap_or_else(|| data_dir.join(FLEET_FILE))
}

/// Loads the tables and the fleet, then runs every truck's route.
pub fn dispatched_context(
    data: Option<PathBuf>,
    fleet: Option<PathBuf>,
) -> Result<SimulationContext, anyhow::Error> {
    let data_dir = data_dir(data);
    let fleet_file = fleet_file(fleet, &data_dir);

    info!("Loading tables from {:?}", data_dir);
    let tables = WgupsParser
        .parse(&data_dir)
        .with_context(|| format!("Failed to load tables from {}", data_dir.display()))?;

    let fleet = JsonFleet::from_path(&fleet_file)
        .with_context(|| format!("Failed to load fleet from {}", fleet_file.display()))?;
    let trucks = fleet.build_trucks(&tables.addresses)?;

    let mut context = SimulationContext::new(tables, trucks);
    courier_optimizer::timer_debug!("Dispatch", context.dispatch())?;

    Ok(context)
}

#[cfg(test)]
pub fn fixture_context() -> SimulationContext {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/wgups");
    dispatched_context(Some(data), None).unwrap()
}
