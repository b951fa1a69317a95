//! Job classification
//!
//! Turns raw job rows into typed jobs: resolves the destination, infers the
//! load state and required bed length, and drops rows that cannot be routed.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::services::text::{
    contains_any, normalize, starts_with_any, CANCELED_PREFIXES, DELIVERY_PREFIXES,
    PICKUP_PREFIXES, RELOCATION_PREFIXES, TO_WAREHOUSE_PHRASES, WAREHOUSE_KEYWORDS,
};
use crate::types::{Coordinates, Job, LoadState, Record};

/// Field names of the jobs table
pub mod fields {
    pub const ID: &str = "Jobs";
    pub const STATUS: &str = "Status";
    pub const DRIVER: &str = "Chofer";
    pub const DESTINATION: &str = "Destination Address";
    pub const CLIENT_DESTINATION: &str = "Destination address from client";
    pub const SERVICE: &str = "Servicio";
    pub const FROM: &str = "From";
    pub const CONTAINER_TYPE: &str = "Tipo";
    pub const LENGTH_FT: &str = "Largo (ft)";
}

static LAT_LNG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(-?\d+\.\d+)\s*,\s*(-?\d+\.\d+)").expect("valid lat,lng pattern")
});

static DIMENSIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*x\s*(\d+)\s*x?\s*(\d+)?").expect("valid dimensions pattern")
});

/// Lengths of container types sold under a name rather than dimensions.
/// Keys are normalized; the first key contained in the type text wins.
const CONTAINER_LENGTHS_FT: &[(&str, f64)] = &[
    ("8x8", 8.0),
    ("8x12", 12.0),
    ("8x16", 16.0),
    ("pop-up", 20.0),
    ("modular standard", 20.0),
    ("modular custom", 20.0),
    ("event pod", 8.0),
    ("guard house", 8.0),
    ("cold storage", 10.0),
];

pub fn is_canceled(status: &str) -> bool {
    starts_with_any(&normalize(status), CANCELED_PREFIXES)
}

/// First `lat,lng` pair found in free text
pub fn parse_coordinates(text: &str) -> Option<Coordinates> {
    let caps = LAT_LNG_RE.captures(text)?;
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lng = caps.get(2)?.as_str().parse().ok()?;
    Some(Coordinates { lat, lng })
}

/// Load state after the job, from its service type and origin text
pub fn load_state(service: &str, origin: &str) -> LoadState {
    let s = normalize(service);
    let f = normalize(origin);

    if starts_with_any(&s, DELIVERY_PREFIXES) {
        return LoadState::Empty;
    }
    if starts_with_any(&s, PICKUP_PREFIXES)
        || contains_any(&s, TO_WAREHOUSE_PHRASES)
        || contains_any(&f, TO_WAREHOUSE_PHRASES)
    {
        return LoadState::Full;
    }
    if starts_with_any(&s, RELOCATION_PREFIXES) {
        // Leaving a warehouse means the unit is dropped at the client
        return if contains_any(&f, WAREHOUSE_KEYWORDS) {
            LoadState::Empty
        } else {
            LoadState::Full
        };
    }
    LoadState::Unknown
}

pub fn is_warehouse_origin(origin: &str) -> bool {
    contains_any(&normalize(origin), WAREHOUSE_KEYWORDS)
}

/// Bed length needed by a container type, from `AxBxC` dimensions or a known name
pub fn length_from_container_type(container_type: &str) -> Option<f64> {
    if container_type.trim().is_empty() {
        return None;
    }

    if let Some(caps) = DIMENSIONS_RE.captures(container_type) {
        return caps
            .iter()
            .skip(1)
            .flatten()
            .filter_map(|m| m.as_str().parse::<f64>().ok())
            .reduce(f64::max);
    }

    let key = normalize(container_type);
    CONTAINER_LENGTHS_FT
        .iter()
        .find(|(name, _)| key.contains(name))
        .map(|&(_, length)| length)
}

/// Classify one job row. Returns `None` for rows that must not be routed.
pub fn classify_job(record: &Record, only_unassigned: bool) -> Option<Job> {
    if is_canceled(&record.text_or_empty(fields::STATUS)) {
        debug!("Skipping job {}: canceled", record.id);
        return None;
    }

    if only_unassigned && !record.links(fields::DRIVER).is_empty() {
        debug!("Skipping job {}: already assigned", record.id);
        return None;
    }

    let coordinates = record
        .text(fields::DESTINATION)
        .and_then(|t| parse_coordinates(&t))
        .or_else(|| {
            record
                .text(fields::CLIENT_DESTINATION)
                .and_then(|t| parse_coordinates(&t))
        });
    let Some(coordinates) = coordinates else {
        debug!("Skipping job {}: no destination coordinates", record.id);
        return None;
    };

    let service_type = record.text_or_empty(fields::SERVICE);
    let origin_text = record.text_or_empty(fields::FROM);
    let container_type = record.text_or_empty(fields::CONTAINER_TYPE);
    let length_ft = record
        .number(fields::LENGTH_FT)
        .or_else(|| length_from_container_type(&container_type));

    let job = Job {
        id: record.display_id(&[fields::ID]),
        coordinates,
        load: load_state(&service_type, &origin_text),
        from_warehouse: is_warehouse_origin(&origin_text),
        service_type,
        origin_text,
        container_type,
        length_ft,
    };
    debug!("Job {} classified as {} ({:?} ft)", job.id, job.load.as_str(), job.length_ft);
    Some(job)
}

/// Classify all job rows, keeping only routable ones in input order
pub fn classify_jobs(records: &[Record], only_unassigned: bool) -> Vec<Job> {
    records
        .iter()
        .filter_map(|r| classify_job(r, only_unassigned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job_record(fields: serde_json::Value) -> Record {
        Record::new("recJob", fields)
    }

    #[test]
    fn test_delivery_is_empty() {
        assert_eq!(load_state("Entrega a cliente", ""), LoadState::Empty);
        assert_eq!(load_state("Delivery", "Bayamon WHSE"), LoadState::Empty);
    }

    #[test]
    fn test_pickup_from_client_is_full() {
        assert_eq!(load_state("Recogido en cliente", "Bayamon WHSE"), LoadState::Full);
        assert_eq!(load_state("Pickup", ""), LoadState::Full);
    }

    #[test]
    fn test_to_warehouse_phrase_is_full() {
        assert_eq!(load_state("Servicio: llevar a WHSE", ""), LoadState::Full);
        assert_eq!(load_state("Swap", "Client site, to warehouse"), LoadState::Full);
    }

    #[test]
    fn test_relocation_depends_on_origin() {
        assert_eq!(load_state("Relocalización", "Almacén Bayamón"), LoadState::Empty);
        assert_eq!(load_state("Relocation", "Caguas client"), LoadState::Full);
    }

    #[test]
    fn test_unrecognized_service_is_unknown() {
        assert_eq!(load_state("Inspección", ""), LoadState::Unknown);
        assert_eq!(load_state("", ""), LoadState::Unknown);
    }

    #[test]
    fn test_is_canceled_ignores_case_and_accents() {
        assert!(is_canceled("Cancelado"));
        assert!(is_canceled("  CANCELLED"));
        assert!(!is_canceled("Pendiente"));
    }

    #[test]
    fn test_parse_coordinates_from_free_text() {
        let c = parse_coordinates("Calle 5, Caguas (18.2341, -66.0485)").unwrap();
        assert_eq!(c, Coordinates { lat: 18.2341, lng: -66.0485 });
    }

    #[test]
    fn test_parse_coordinates_requires_decimals() {
        assert!(parse_coordinates("Calle 5, 00725").is_none());
        assert!(parse_coordinates("").is_none());
    }

    #[test]
    fn test_length_from_dimensions_takes_max() {
        assert_eq!(length_from_container_type("8x16"), Some(16.0));
        assert_eq!(length_from_container_type("Container 8 X 20 x 9"), Some(20.0));
    }

    #[test]
    fn test_length_from_named_types() {
        assert_eq!(length_from_container_type("Pop-Up Store"), Some(20.0));
        assert_eq!(length_from_container_type("Cold Storage"), Some(10.0));
        assert_eq!(length_from_container_type("Guard House"), Some(8.0));
        assert_eq!(length_from_container_type("Mystery box"), None);
        assert_eq!(length_from_container_type(""), None);
    }

    #[test]
    fn test_classify_job_scenario_pickup_from_warehouse() {
        let record = job_record(json!({
            "Jobs": "J-100",
            "Status": "Pendiente",
            "Destination Address": "18.3, -66.1",
            "Servicio": "Recogido en cliente",
            "From": "Bayamon WHSE",
            "Tipo": "8x12",
        }));

        let job = classify_job(&record, true).unwrap();
        assert_eq!(job.id, "J-100");
        assert_eq!(job.load, LoadState::Full);
        assert!(job.from_warehouse);
        assert_eq!(job.length_ft, Some(12.0));
    }

    #[test]
    fn test_classify_job_prefers_explicit_length() {
        let record = job_record(json!({
            "Destination Address": "18.3,-66.1",
            "Tipo": "8x20",
            "Largo (ft)": 16,
        }));

        let job = classify_job(&record, true).unwrap();
        assert_eq!(job.length_ft, Some(16.0));
        assert_eq!(job.id, "recJob");
    }

    #[test]
    fn test_classify_job_falls_back_to_client_address() {
        let record = job_record(json!({
            "Destination Address": "Carr. 2 km 5, Bayamon",
            "Destination address from client": "pin: 18.40, -66.15",
        }));

        let job = classify_job(&record, true).unwrap();
        assert_eq!(job.coordinates, Coordinates { lat: 18.40, lng: -66.15 });
    }

    #[test]
    fn test_classify_job_without_coordinates_is_excluded() {
        let record = job_record(json!({
            "Destination Address": "Carr. 2 km 5, Bayamon",
            "Destination address from client": "call the client",
        }));
        assert!(classify_job(&record, true).is_none());
    }

    #[test]
    fn test_classify_job_excludes_canceled() {
        let record = job_record(json!({
            "Status": "Cancelado",
            "Destination Address": "18.3,-66.1",
        }));
        assert!(classify_job(&record, false).is_none());
    }

    #[test]
    fn test_only_unassigned_excludes_linked_driver() {
        let record = job_record(json!({
            "Chofer": ["recDriver1"],
            "Destination Address": "18.3,-66.1",
        }));

        assert!(classify_job(&record, true).is_none());
        assert!(classify_job(&record, false).is_some());
    }

    #[test]
    fn test_empty_driver_link_counts_as_unassigned() {
        let record = job_record(json!({
            "Chofer": [],
            "Destination Address": "18.3,-66.1",
        }));
        assert!(classify_job(&record, true).is_some());
    }

    #[test]
    fn test_classify_jobs_keeps_input_order() {
        let records = vec![
            Record::new("a", json!({"Destination Address": "18.1,-66.1"})),
            Record::new("b", json!({"Destination Address": "nowhere"})),
            Record::new("c", json!({"Destination Address": "18.2,-66.2"})),
        ];

        let ids: Vec<String> = classify_jobs(&records, true).into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
