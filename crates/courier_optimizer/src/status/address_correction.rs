use jiff::SignedDuration;

use crate::{
    problem::package::{Destination, Package, PackageId, WRONG_ADDRESS_LISTED},
    utils::time::clock,
};

pub const ADDRESS_CORRECTED: &str = "Address corrected at 10:20 AM";

/// A destination fix that becomes visible at a fixed time.
///
/// Applying it is reversible: before `effective_at` the package shows the
/// listed destination and note, from `effective_at` on the corrected ones.
#[derive(Debug, Clone)]
pub struct AddressCorrection {
    pub package_id: PackageId,
    pub effective_at: SignedDuration,
    pub before: Destination,
    pub after: Destination,
    pub note_before: String,
    pub note_after: String,
}

impl AddressCorrection {
    pub fn apply(&self, package: &mut Package, at: SignedDuration) {
        if at >= self.effective_at {
            package.set_destination(self.after.clone());
            package.replace_note(&self.note_before, &self.note_after);
        } else {
            package.set_destination(self.before.clone());
            package.replace_note(&self.note_after, &self.note_before);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    corrections: Vec<AddressCorrection>,
}

impl CorrectionTable {
    pub fn new(corrections: Vec<AddressCorrection>) -> Self {
        CorrectionTable { corrections }
    }

    /// Package 9 was listed at the wrong address; the right one is known at
    /// 10:20.
    pub fn wgups() -> Self {
        CorrectionTable::new(vec![AddressCorrection {
            package_id: PackageId::new(9),
            effective_at: clock(10, 20, 0),
            before: Destination::new("300 State St", "Salt Lake City", "84103"),
            after: Destination::new("410 S State St", "Salt Lake City", "84111"),
            note_before: WRONG_ADDRESS_LISTED.to_owned(),
            note_after: ADDRESS_CORRECTED.to_owned(),
        }])
    }

    pub fn for_package(&self, package_id: PackageId) -> Option<&AddressCorrection> {
        self.corrections
            .iter()
            .find(|correction| correction.package_id == package_id)
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }
}
