use anyhow::bail;
use clap::Args;
use courier_optimizer::{
    problem::package::PackageId,
    simulation::{PackageSelection, SimulationContext},
};

use crate::{display::package_table, parsers};

#[derive(Args)]
pub struct StatusArgs {
    /// Time of day, `H:MM` or `H:MM:SS`, not before 8:00
    #[arg(short, long, value_parser = parsers::parse_time_arg)]
    at: jiff::SignedDuration,

    /// Only show this package
    #[arg(short, long)]
    package: Option<u32>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(context: &SimulationContext, args: StatusArgs) -> Result<(), anyhow::Error> {
    let selection = match args.package {
        Some(id) => PackageSelection::Single(PackageId::new(id)),
        None => PackageSelection::All,
    };

    let snapshots = context.query(args.at, selection)?;

    if let (Some(id), true) = (args.package, snapshots.is_empty()) {
        bail!("Unknown package {id}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        println!("{}", package_table(&snapshots));
    }

    Ok(())
}
