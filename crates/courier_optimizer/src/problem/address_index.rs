use serde::Serialize;

use crate::{
    define_id_newtype,
    error::{RoutingError, TableError},
};

define_id_newtype!(LocationIdx, usize, indexes AddressEntry);

#[derive(Debug, Clone, Serialize)]
pub struct AddressEntry {
    pub index: LocationIdx,
    pub name: String,
    pub address: String,
}

/// Ordered address table. The position of a row is the row and column it
/// occupies in the distance matrix.
#[derive(Debug, Clone)]
pub struct AddressIndex {
    entries: Vec<AddressEntry>,
}

impl AddressIndex {
    pub fn new(entries: Vec<AddressEntry>) -> Result<Self, TableError> {
        for (position, entry) in entries.iter().enumerate() {
            if entry.index.get() != position {
                return Err(TableError::AddressIndexMismatch {
                    position,
                    index: entry.index.get(),
                });
            }
        }

        Ok(AddressIndex { entries })
    }

    /// Index of the first row whose address contains `address`.
    ///
    /// Package files and the address table do not always agree on formatting,
    /// hence containment instead of equality.
    pub fn index_of(&self, address: &str) -> Result<LocationIdx, RoutingError> {
        self.entries
            .iter()
            .find(|entry| entry.address.contains(address))
            .map(|entry| entry.index)
            .ok_or_else(|| RoutingError::UnknownAddress(address.to_owned()))
    }

    pub fn address_of(&self, index: LocationIdx) -> Option<&str> {
        self.entries
            .get(index.get())
            .map(|entry| entry.address.as_str())
    }

    pub fn entry(&self, index: LocationIdx) -> &AddressEntry {
        &self.entries[index]
    }

    pub fn entries(&self) -> &[AddressEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_address_index;

    #[test]
    fn test_index_of_matches_substring() {
        let index = create_address_index(&[
            "4001 South 700 East",
            "5383 South 900 East #104",
            "410 S State St",
        ]);

        assert_eq!(index.index_of("4001 South 700 East").unwrap().get(), 0);
        assert_eq!(index.index_of("5383 South 900 East").unwrap().get(), 1);
        assert_eq!(index.index_of("S State St").unwrap().get(), 2);
    }

    #[test]
    fn test_index_of_returns_first_match() {
        let index = create_address_index(&["3595 Main St", "2835 Main St"]);

        assert_eq!(index.index_of("Main St").unwrap().get(), 0);
        assert_eq!(index.index_of("2835 Main St").unwrap().get(), 1);
    }

    #[test]
    fn test_index_of_unknown_address() {
        let index = create_address_index(&["4001 South 700 East"]);

        let error = index.index_of("1 Nowhere Rd").unwrap_err();
        assert!(matches!(error, RoutingError::UnknownAddress(address) if address == "1 Nowhere Rd"));
    }

    #[test]
    fn test_index_of_round_trips_every_row() {
        let index = create_address_index(&[
            "4001 South 700 East",
            "1060 Dalton Ave S",
            "300 State St",
            "410 S State St",
            "5025 State St",
        ]);

        for entry in index.entries() {
            let address = index.address_of(entry.index).unwrap();
            assert_eq!(index.index_of(address).unwrap(), entry.index);
        }
    }

    #[test]
    fn test_rejects_out_of_order_rows() {
        let result = AddressIndex::new(vec![AddressEntry {
            index: LocationIdx::new(1),
            name: String::from("Hub"),
            address: String::from("4001 South 700 East"),
        }]);

        assert!(matches!(
            result,
            Err(TableError::AddressIndexMismatch {
                position: 0,
                index: 1
            })
        ));
    }
}
