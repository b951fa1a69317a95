//! Vehicle profiling and driver association

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::services::text::{contains_any, normalize, CRANE_KEYWORDS, TRAILER_KEYWORDS};
use crate::types::{Record, Vehicle, VehicleClass};

/// Field names of the trucks table
pub mod truck_fields {
    pub const ID: &str = "Camion";
    pub const NAME: &str = "Name";
    pub const STATUS: &str = "Status";
    pub const TYPE: &str = "Types of Trucks";
    pub const BED_FT: &str = "Largo de Plataforma (ft)";
}

/// Field names of the drivers table
pub mod driver_fields {
    pub const NAME: &str = "Name";
    pub const STATUS: &str = "Status";
    pub const TRUCKS: &str = "Trucks";
}

/// Beds this long are always trailers
const TRAILER_MIN_BED_FT: f64 = 40.0;

const AVAILABLE: &str = "available";

static FLATBED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"flat\s*bed").expect("valid flatbed pattern"));

fn is_available(record: &Record, status_field: &str) -> bool {
    normalize(&record.text_or_empty(status_field)) == AVAILABLE
}

/// Capability class from the free-text truck type and bed length
pub fn vehicle_class(type_text: &str, bed_ft: f64) -> VehicleClass {
    let t = normalize(type_text);

    if contains_any(&t, TRAILER_KEYWORDS) || bed_ft >= TRAILER_MIN_BED_FT {
        VehicleClass::Trailer
    } else if contains_any(&t, CRANE_KEYWORDS) {
        VehicleClass::Fingger
    } else if FLATBED_RE.is_match(&t) {
        VehicleClass::Flatbed
    } else {
        VehicleClass::Unknown
    }
}

pub fn profile_vehicle(record: &Record) -> Vehicle {
    let bed_ft = record.number(truck_fields::BED_FT).unwrap_or(0.0);
    let class = vehicle_class(&record.text_or_empty(truck_fields::TYPE), bed_ft);

    Vehicle {
        id: record.display_id(&[truck_fields::ID, truck_fields::NAME]),
        record_id: record.id.clone(),
        class,
        bed_ft,
    }
}

/// Profiles of the trucks whose status is "available", in input order
pub fn available_vehicles(records: &[Record]) -> Vec<Vehicle> {
    records
        .iter()
        .filter(|r| is_available(r, truck_fields::STATUS))
        .map(|r| {
            let vehicle = profile_vehicle(r);
            debug!("Vehicle {} profiled as {} ({} ft)", vehicle.id, vehicle.class.as_str(), vehicle.bed_ft);
            vehicle
        })
        .collect()
}

/// Driver linked to `vehicle`. Links hold the truck's record id when read
/// from Airtable, or its display id in hand-written fixtures.
pub fn driver_for(drivers: &HashMap<String, String>, vehicle: &Vehicle) -> Option<String> {
    drivers
        .get(&vehicle.record_id)
        .or_else(|| drivers.get(&vehicle.id))
        .cloned()
}

/// Map of linked truck (record id or display id) to the name of the available driver linked to it.
///
/// Only the first truck linked to a driver counts. When several drivers
/// point at the same truck, the last one read wins.
pub fn drivers_by_vehicle(records: &[Record]) -> HashMap<String, String> {
    let mut drivers = HashMap::new();

    for record in records.iter().filter(|r| is_available(r, driver_fields::STATUS)) {
        if let Some(truck) = record.links(driver_fields::TRUCKS).into_iter().next() {
            drivers.insert(truck, record.display_id(&[driver_fields::NAME]));
        }
    }

    drivers
}
