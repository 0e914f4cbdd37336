use std::{fs::File, io::BufReader, path::Path};

use fxhash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{
    error::FleetError,
    problem::{
        address_index::AddressIndex,
        mph::Mph,
        package::PackageId,
        truck::{Departure, Truck, TruckBuilder, TruckId},
    },
    utils::time::{format_clock, parse_clock},
};

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Fleet")]
pub struct JsonFleet {
    pub trucks: Vec<JsonTruck>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Truck")]
pub struct JsonTruck {
    pub id: TruckId,
    pub speed_mph: Option<f64>,
    /// Maximum number of packages, informational.
    pub capacity: Option<usize>,
    /// Must be contained in one of the loaded addresses.
    pub start_address: String,
    pub departure: JsonDeparture,
    pub packages: Vec<PackageId>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case", rename = "Departure")]
pub enum JsonDeparture {
    /// Time of day, `H:MM` or `H:MM:SS`.
    At(String),
    /// Leave when the first of these trucks has completed its route.
    FirstCompletionOf(Vec<TruckId>),
}

impl From<&Departure> for JsonDeparture {
    fn from(value: &Departure) -> Self {
        match value {
            Departure::At(time) => JsonDeparture::At(format_clock(*time)),
            Departure::FirstCompletionOf(trucks) => JsonDeparture::FirstCompletionOf(trucks.clone()),
        }
    }
}

impl From<&Truck> for JsonTruck {
    fn from(value: &Truck) -> Self {
        JsonTruck {
            id: value.id(),
            speed_mph: Some(value.speed().value()),
            capacity: Some(value.capacity()),
            start_address: value.start_address().to_owned(),
            departure: value.departure().into(),
            packages: value.packages().to_vec(),
        }
    }
}

impl JsonFleet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FleetError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    #[instrument(skip_all)]
    pub fn build_trucks(&self, addresses: &AddressIndex) -> Result<Vec<Truck>, FleetError> {
        let mut seen = FxHashSet::default();
        let mut trucks = Vec::with_capacity(self.trucks.len());

        for json in &self.trucks {
            if !seen.insert(json.id) {
                return Err(FleetError::DuplicateTruck(json.id));
            }

            addresses.index_of(&json.start_address)?;

            let mut builder = TruckBuilder::new(json.id, json.start_address.clone());

            if let Some(speed) = json.speed_mph {
                let speed = Mph::new(speed);
                if !speed.is_valid() {
                    return Err(FleetError::InvalidSpeed {
                        truck: json.id,
                        speed: speed.value(),
                    });
                }
                builder.set_speed(speed);
            }

            if let Some(capacity) = json.capacity {
                if json.packages.len() > capacity {
                    warn!(
                        truck = %json.id,
                        capacity,
                        packages = json.packages.len(),
                        "manifest exceeds truck capacity"
                    );
                }
                builder.set_capacity(capacity);
            }

            let departure = match &json.departure {
                JsonDeparture::At(time) => Departure::At(parse_clock(time).map_err(|source| {
                    FleetError::InvalidDeparture {
                        truck: json.id,
                        source,
                    }
                })?),
                JsonDeparture::FirstCompletionOf(trucks) => {
                    Departure::FirstCompletionOf(trucks.clone())
                }
            };

            builder
                .set_departure(departure)
                .set_packages(json.packages.clone());
            trucks.push(builder.build());
        }

        trucks.sort_by_key(|truck| truck.id());
        Ok(trucks)
    }
}
