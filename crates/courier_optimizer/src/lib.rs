pub mod error;
pub mod json;
pub mod parsers;
pub mod problem;
pub mod simulation;
pub mod solver;
pub mod status;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
