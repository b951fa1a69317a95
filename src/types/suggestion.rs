//! Route suggestion request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinates, VehicleClass};
use crate::defaults::DEFAULT_MAX_JOBS_PER_TRUCK;

/// Request to suggest routes for the pending jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRoutesRequest {
    /// Skip jobs that already have a driver linked
    #[serde(default = "default_only_unassigned")]
    pub only_unassigned: bool,
    #[serde(default = "default_max_jobs_per_truck")]
    pub max_jobs_per_truck: usize,
}

fn default_only_unassigned() -> bool { true }
fn default_max_jobs_per_truck() -> usize { DEFAULT_MAX_JOBS_PER_TRUCK }

impl Default for SuggestRoutesRequest {
    fn default() -> Self {
        Self {
            only_unassigned: default_only_unassigned(),
            max_jobs_per_truck: default_max_jobs_per_truck(),
        }
    }
}

/// A stop on a suggested route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedStop {
    /// 1-based position among the stops
    pub index: usize,
    pub job_id: String,
    pub container_type: String,
    pub service_type: String,
    pub lat: f64,
    pub lng: f64,
}

/// Suggested route for one truck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub vehicle_id: String,
    pub driver: Option<String>,
    pub vehicle_class: VehicleClass,
    pub bed_ft: f64,
    pub total_miles: f64,
    /// Estimated driving time as `H:MM`
    pub eta: String,
    pub maps_urls: Vec<String>,
    pub stops: Vec<SuggestedStop>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRoutesResponse {
    pub generated_at: DateTime<Utc>,
    pub origin: Coordinates,
    pub suggestions: Vec<Suggestion>,
}
