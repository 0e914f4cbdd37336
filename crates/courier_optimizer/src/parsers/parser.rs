use std::path::Path;

use crate::{error::TableError, problem::tables::Tables};

pub trait DatasetParser {
    fn parse<P: AsRef<Path>>(&self, dir: P) -> Result<Tables, TableError>;
}
