use crate::{
    error::TableError,
    problem::{address_index::LocationIdx, miles::Miles},
};

/// Square distance table stored flat, `index = from * num_locations + to`.
///
/// Source tables usually only fill one triangle, so an empty cell is read
/// from its transpose. Construction checks that every pair is covered in at
/// least one direction.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    cells: Vec<Option<Miles>>,
    num_locations: usize,
}

impl DistanceMatrix {
    /// Rows may be shorter than the table is wide; missing trailing cells are
    /// treated as empty.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self, TableError> {
        let num_locations = rows.len();
        let mut cells = vec![None; num_locations * num_locations];

        for (from, row) in rows.into_iter().enumerate() {
            if row.len() > num_locations {
                return Err(TableError::RaggedDistanceRow {
                    row: from,
                    found: row.len(),
                    expected: num_locations,
                });
            }

            for (to, value) in row.into_iter().enumerate() {
                if let Some(value) = value {
                    if !value.is_finite() || value < 0.0 {
                        return Err(TableError::InvalidDistance { from, to, value });
                    }
                    cells[from * num_locations + to] = Some(Miles::new(value));
                }
            }
        }

        for from in 0..num_locations {
            for to in 0..from {
                if cells[from * num_locations + to].is_none()
                    && cells[to * num_locations + from].is_none()
                {
                    return Err(TableError::MissingDistance { from, to });
                }
            }
        }

        Ok(DistanceMatrix {
            cells,
            num_locations,
        })
    }

    #[inline(always)]
    fn cell(&self, from: LocationIdx, to: LocationIdx) -> Option<Miles> {
        self.cells[from.get() * self.num_locations + to.get()]
    }

    #[inline]
    pub fn distance(&self, from: LocationIdx, to: LocationIdx) -> Miles {
        if from == to {
            return Miles::ZERO;
        }

        self.cell(from, to)
            .or_else(|| self.cell(to, from))
            .unwrap_or(Miles::ZERO)
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }
}
