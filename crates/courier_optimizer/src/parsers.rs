pub mod parser;
pub mod record;
pub mod wgups;
