use courier_optimizer::utils::time::{clock, format_clock, parse_clock};
use jiff::SignedDuration;
use thiserror::Error;

/// Earliest time the status of packages can be asked for.
pub const OPENING: SignedDuration = clock(8, 0, 0);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid time: {0}")]
    Clock(String),

    #[error("{} is before opening at {}", clock_text(.0), clock_text(&OPENING))]
    BeforeOpening(SignedDuration),
}

pub fn parse_query_time(input: &str) -> Result<SignedDuration, QueryError> {
    let time = parse_clock(input).map_err(|error| QueryError::Clock(error.to_string()))?;

    if time < OPENING {
        return Err(QueryError::BeforeOpening(time));
    }

    Ok(time)
}

fn clock_text(time: &SignedDuration) -> String {
    format_clock(*time)
}

/// `clap` value parser for query times.
pub fn parse_time_arg(input: &str) -> Result<SignedDuration, String> {
    parse_query_time(input).map_err(|error| error.to_string())
}
