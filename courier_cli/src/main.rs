use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{generate::GenerateSubcommands, status::StatusArgs};

mod display;
mod generate;
mod interactive;
mod load;
mod parsers;
mod status;
mod summary;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    debug: bool,

    /// Folder with addresses.csv, distances.csv and packages.csv
    /// (default: $COURIER_DATA_DIR, then data/wgups)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Fleet configuration (default: <data>/fleet.json)
    #[arg(long, global = true)]
    fleet: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mileage per truck and overall
    Summary,
    /// Status of one or all packages at a time of day
    Status {
        #[command(flatten)]
        args: StatusArgs,
    },
    /// Query package status from a prompt, the default command
    Interactive,
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Summary => {
            summary::run(&load::dispatched_context(cli.data, cli.fleet)?);
        }
        Commands::Status { args } => {
            status::run(&load::dispatched_context(cli.data, cli.fleet)?, args)?;
        }
        Commands::Interactive => {
            interactive::run(&load::dispatched_context(cli.data, cli.fleet)?)?;
        }
        Commands::Generate { commands } => generate::run(commands)?,
    }

    Ok(())
}
