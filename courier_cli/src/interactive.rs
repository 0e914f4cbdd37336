use std::io::{self, BufRead, Write};

use courier_optimizer::{
    problem::package::PackageId,
    simulation::{PackageSelection, SimulationContext},
};

use crate::{
    parsers::{QueryError, parse_query_time},
    summary::write_mileage,
};

const START_PROMPT: &str = "Enter 'time' to proceed, or any other key to exit: ";
const TIME_PROMPT: &str = "Enter a time (HH:MM:SS) to check the status of the packages: ";
const VIEW_PROMPT: &str = "Type 'solo' to view an individual package or 'all' to view all packages: ";
const PACKAGE_PROMPT: &str = "Enter the package ID: ";

const EXITING: &str = "Invalid input. Exiting the program.";
const BEFORE_OPENING: &str = "Invalid time. Please enter a time after 08:00:00.";
const INVALID_ENTRY: &str = "Invalid entry.";

pub fn run(context: &SimulationContext) -> Result<(), anyhow::Error> {
    run_loop(context, io::stdin().lock(), io::stdout().lock())
}

/// Asks for a time and a selection until the user answers anything but
/// `time`. A malformed time or an unknown view ends the session, an unknown
/// package id does not.
pub fn run_loop<R: BufRead, W: Write>(
    context: &SimulationContext,
    mut input: R,
    mut output: W,
) -> Result<(), anyhow::Error> {
    write_mileage(&mut output, &context.mileage_report())?;

    loop {
        let Some(answer) = prompt(&mut input, &mut output, START_PROMPT)? else {
            break;
        };
        if !answer.eq_ignore_ascii_case("time") {
            writeln!(output, "{EXITING}")?;
            break;
        }

        let Some(time) = prompt(&mut input, &mut output, TIME_PROMPT)? else {
            break;
        };
        let at = match parse_query_time(&time) {
            Ok(at) => at,
            Err(QueryError::BeforeOpening(_)) => {
                writeln!(output, "{BEFORE_OPENING}")?;
                continue;
            }
            Err(QueryError::Clock(_)) => {
                writeln!(output, "{INVALID_ENTRY}")?;
                break;
            }
        };

        let Some(view) = prompt(&mut input, &mut output, VIEW_PROMPT)? else {
            break;
        };
        match view.to_ascii_lowercase().as_str() {
            "solo" => {
                let Some(id) = prompt(&mut input, &mut output, PACKAGE_PROMPT)? else {
                    break;
                };
                let snapshot = match id.parse::<u32>() {
                    Ok(id) => context.package_status(PackageId::new(id), at)?,
                    Err(_) => None,
                };

                match snapshot {
                    Some(snapshot) => writeln!(output, "{snapshot}")?,
                    None => writeln!(output, "{INVALID_ENTRY}")?,
                }
            }
            "all" => {
                for snapshot in context.query(at, PackageSelection::All)? {
                    writeln!(output, "{snapshot}")?;
                }
            }
            _ => break,
        }
    }

    Ok(())
}

/// `None` once the input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }

    Ok(Some(line.trim().to_owned()))
}
