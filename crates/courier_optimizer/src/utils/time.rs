use jiff::{SignedDuration, civil::Time};

use crate::error::ClockError;

/// The simulation clock counts from midnight of the delivery day.
pub const fn clock(hours: i64, minutes: i64, seconds: i64) -> SignedDuration {
    SignedDuration::from_secs(hours * 3600 + minutes * 60 + seconds)
}

/// Parses `H:MM` or `H:MM:SS` into a duration since midnight.
pub fn parse_clock(input: &str) -> Result<SignedDuration, ClockError> {
    let input = input.trim();
    let parts = input
        .split(':')
        .map(|part| part.trim().parse::<i8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ClockError::Format(input.to_owned()))?;

    let (hour, minute, second) = match parts.as_slice() {
        [hour, minute] => (*hour, *minute, 0),
        [hour, minute, second] => (*hour, *minute, *second),
        _ => return Err(ClockError::Format(input.to_owned())),
    };

    let time =
        Time::new(hour, minute, second, 0).map_err(|_| ClockError::Range(input.to_owned()))?;

    Ok(time.duration_since(Time::midnight()))
}

/// Formats a duration since midnight as `H:MM:SS`, rounded to the second.
pub fn format_clock(time: SignedDuration) -> String {
    let mut seconds = time.as_secs();
    if time.subsec_nanos() >= 500_000_000 {
        seconds += 1;
    }

    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Formats a time of day the way deadlines are written, e.g. `10:30 AM`.
pub fn format_meridiem(time: SignedDuration) -> String {
    let minutes = time.as_secs() / 60;
    let (hour, minute) = (minutes / 60 % 24, minutes % 60);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{hour}:{minute:02} {suffix}")
}

#[macro_export]
macro_rules! timer_debug {
    ($msg:literal,$block:expr) => {{
        let now = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(now);

        tracing::debug!("{}: Took {:?}", $msg, elapsed);

        result
    }};
}
