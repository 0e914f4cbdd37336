use std::fmt;

use jiff::SignedDuration;
use serde::Serialize;

use crate::{define_id_newtype, error::RoutingError, utils::time::format_meridiem};

define_id_newtype!(PackageId, u32);

/// Note marking a package that reaches the hub late.
pub const DELAYED_ON_FLIGHT: &str = "Delayed on flight";

/// Note marking a package whose listed address is wrong.
pub const WRONG_ADDRESS_LISTED: &str = "Wrong address listed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    InTransit,
    AtHub,
    EnRoute,
    Delivered,
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PackageStatus::InTransit => "In Transit",
            PackageStatus::AtHub => "At Hub",
            PackageStatus::EnRoute => "En Route",
            PackageStatus::Delivered => "Delivered",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Deadline {
    EndOfDay,
    By(SignedDuration),
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::EndOfDay => f.write_str("EOD"),
            Deadline::By(time) => f.write_str(&format_meridiem(*time)),
        }
    }
}

/// The part of a package's address that can be corrected after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub address: String,
    pub city: String,
    pub zip: String,
}

impl Destination {
    pub fn new(address: impl Into<String>, city: impl Into<String>, zip: impl Into<String>) -> Self {
        Destination {
            address: address.into(),
            city: city.into(),
            zip: zip.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Package {
    id: PackageId,
    #[serde(flatten)]
    destination: Destination,
    state: String,
    deadline: Deadline,
    weight_kg: u32,
    notes: String,
    status: PackageStatus,
    delivery_time: Option<SignedDuration>,
    departure_time: Option<SignedDuration>,
}

impl Package {
    /// A freshly loaded package, in transit when its notes report a delay or
    /// a wrong address and at the hub otherwise.
    pub fn new(
        id: PackageId,
        destination: Destination,
        state: impl Into<String>,
        deadline: Deadline,
        weight_kg: u32,
        notes: impl Into<String>,
    ) -> Self {
        let notes = notes.into();
        let status = if notes.contains(DELAYED_ON_FLIGHT) || notes.contains(WRONG_ADDRESS_LISTED) {
            PackageStatus::InTransit
        } else {
            PackageStatus::AtHub
        };

        Package {
            id,
            destination,
            state: state.into(),
            deadline,
            weight_kg,
            notes,
            status,
            delivery_time: None,
            departure_time: None,
        }
    }

    pub fn id(&self) -> PackageId {
        self.id
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn address(&self) -> &str {
        &self.destination.address
    }

    pub fn city(&self) -> &str {
        &self.destination.city
    }

    pub fn zip(&self) -> &str {
        &self.destination.zip
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn weight_kg(&self) -> u32 {
        self.weight_kg
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn status(&self) -> PackageStatus {
        self.status
    }

    pub fn delivery_time(&self) -> Option<SignedDuration> {
        self.delivery_time
    }

    pub fn departure_time(&self) -> Option<SignedDuration> {
        self.departure_time
    }

    /// Stamps the delivery. A package is delivered at most once.
    pub(crate) fn mark_delivered(
        &mut self,
        delivered_at: SignedDuration,
        departed_at: SignedDuration,
    ) -> Result<(), RoutingError> {
        if self.delivery_time.is_some() {
            return Err(RoutingError::AlreadyDelivered(self.id));
        }

        self.delivery_time = Some(delivered_at);
        self.departure_time = Some(departed_at);
        self.status = PackageStatus::Delivered;
        Ok(())
    }

    pub(crate) fn set_destination(&mut self, destination: Destination) {
        self.destination = destination;
    }

    pub(crate) fn replace_note(&mut self, from: &str, to: &str) {
        self.notes = self.notes.replace(from, to);
    }

    pub(crate) fn set_status(&mut self, status: PackageStatus) {
        self.status = status;
    }
}
