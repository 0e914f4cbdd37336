use std::path::Path;

use jiff::SignedDuration;
use tracing::{info, warn};

use crate::{
    error::TableError,
    parsers::{
        parser::DatasetParser,
        record::{lines, split_record},
    },
    problem::{
        address_index::{AddressEntry, AddressIndex, LocationIdx},
        distance_matrix::DistanceMatrix,
        package::{Deadline, Destination, Package, PackageId},
        package_store::PackageStore,
        tables::Tables,
    },
    utils::time::parse_clock,
};

pub const ADDRESS_FILE: &str = "addresses.csv";
pub const DISTANCE_FILE: &str = "distances.csv";
pub const PACKAGE_FILE: &str = "packages.csv";

/// Reads the address, distance and package tables of a directory.
pub struct WgupsParser;

impl DatasetParser for WgupsParser {
    fn parse<P: AsRef<Path>>(&self, dir: P) -> Result<Tables, TableError> {
        let dir = dir.as_ref();

        let addresses = parse_addresses(&read_table(&dir.join(ADDRESS_FILE))?)?;
        let distances = parse_distances(&read_table(&dir.join(DISTANCE_FILE))?)?;
        let load = parse_packages(&read_table(&dir.join(PACKAGE_FILE))?);

        info!(
            addresses = addresses.len(),
            packages = load.store.len(),
            skipped = load.skipped,
            "loaded tables from {}",
            dir.display()
        );

        Tables::new(addresses, distances, load.store)
    }
}

fn read_table(path: &Path) -> Result<String, TableError> {
    std::fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn malformed(line: usize, reason: impl Into<String>) -> TableError {
    TableError::MalformedRecord {
        line,
        reason: reason.into(),
    }
}

/// Rows of `index,name,address`.
pub fn parse_addresses(text: &str) -> Result<AddressIndex, TableError> {
    let mut entries = Vec::new();

    for (line, record) in lines(text) {
        let fields = split_record(record, line)?;
        let [index, name, address, ..] = fields.as_slice() else {
            return Err(malformed(line, "expected index, name and address"));
        };

        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|_| malformed(line, format!("invalid address index {index:?}")))?;

        entries.push(AddressEntry {
            index: LocationIdx::new(index),
            name: name.trim().to_owned(),
            address: address.trim().to_owned(),
        });
    }

    AddressIndex::new(entries)
}

/// One row of miles per address, blank cells meaning "see the transpose".
pub fn parse_distances(text: &str) -> Result<DistanceMatrix, TableError> {
    let mut rows = Vec::new();

    for (line, record) in lines(text) {
        let row = split_record(record, line)?
            .iter()
            .map(|cell| match cell.trim() {
                "" => Ok(None),
                cell => cell
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| malformed(line, format!("invalid distance {cell:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(row);
    }

    DistanceMatrix::from_rows(rows)
}

pub struct PackageLoad {
    pub store: PackageStore,
    /// Rows that could not be read.
    pub skipped: usize,
}

/// Rows of `id,address,city,state,zip,deadline,weight[,notes]`.
///
/// A bad row is logged and skipped, it never aborts the load.
pub fn parse_packages(text: &str) -> PackageLoad {
    let mut store = PackageStore::default();
    let mut skipped = 0;

    for (line, record) in lines(text) {
        match parse_package(record, line) {
            Ok(Some(package)) => {
                if store.insert(package).is_some() {
                    warn!(line, "package row overrides an earlier row with the same id");
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "skipping package row");
                skipped += 1;
            }
        }
    }

    PackageLoad { store, skipped }
}

fn parse_package(record: &str, line: usize) -> Result<Option<Package>, TableError> {
    let fields = split_record(record, line)?;

    if fields.first().is_none_or(|id| id.trim().is_empty()) {
        return Ok(None);
    }

    let [id, address, city, state, zip, deadline, weight, rest @ ..] = fields.as_slice() else {
        return Err(malformed(line, format!("expected at least 7 fields, found {}", fields.len())));
    };

    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(line, format!("invalid package id {id:?}")))?;
    let deadline = parse_deadline(deadline).map_err(|reason| malformed(line, reason))?;
    let weight = weight
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(line, format!("invalid weight {weight:?}")))?;
    let notes = rest.first().map(|notes| notes.trim()).unwrap_or_default();

    Ok(Some(Package::new(
        PackageId::new(id),
        Destination::new(address.trim(), city.trim(), zip.trim()),
        state.trim(),
        deadline,
        weight,
        notes,
    )))
}

/// `EOD` or a 12 hour time such as `10:30 AM`.
pub fn parse_deadline(input: &str) -> Result<Deadline, String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("EOD") {
        return Ok(Deadline::EndOfDay);
    }

    let invalid = || format!("invalid deadline {input:?}");
    let (time, meridiem) = input.rsplit_once(' ').ok_or_else(invalid)?;
    let time = parse_clock(time).map_err(|_| invalid())?;

    let hours = time.as_secs() / 3600;
    if !(1..=12).contains(&hours) {
        return Err(invalid());
    }

    let offset = match (meridiem.to_ascii_uppercase().as_str(), hours) {
        ("AM", 12) => SignedDuration::from_hours(-12),
        ("AM", _) | ("PM", 12) => SignedDuration::ZERO,
        ("PM", _) => SignedDuration::from_hours(12),
        _ => return Err(invalid()),
    };

    Ok(Deadline::By(time + offset))
}
