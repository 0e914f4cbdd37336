use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Div},
};

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::mph::Mph;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize, JsonSchema)]
pub struct Miles(f64);

impl Miles {
    pub const ZERO: Miles = Miles(0.0);

    pub fn new(value: f64) -> Self {
        Miles(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Miles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<f64> for Miles {
    fn from(value: f64) -> Self {
        Miles::new(value)
    }
}

impl Add for Miles {
    type Output = Miles;

    fn add(self, other: Miles) -> Miles {
        Miles(self.0 + other.0)
    }
}

impl AddAssign for Miles {
    fn add_assign(&mut self, other: Miles) {
        self.0 += other.0;
    }
}

/// Travel time at a constant speed.
impl Div<Mph> for Miles {
    type Output = SignedDuration;

    fn div(self, speed: Mph) -> SignedDuration {
        SignedDuration::from_secs_f64(self.0 * 3600.0 / speed.value())
    }
}

impl Sum for Miles {
    fn sum<I: Iterator<Item = Miles>>(iter: I) -> Miles {
        iter.fold(Miles::ZERO, |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_time() {
        assert_eq!(Miles::new(18.0) / Mph::new(18.0), SignedDuration::from_hours(1));
        assert_eq!(Miles::new(3.0) / Mph::new(18.0), SignedDuration::from_mins(10));
        assert_eq!(Miles::ZERO / Mph::new(18.0), SignedDuration::ZERO);
    }

    #[test]
    fn test_display_honours_precision() {
        assert_eq!(format!("{:.2}", Miles::new(22.2)), "22.20");
    }
}
