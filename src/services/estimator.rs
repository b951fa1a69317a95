//! Distance and driving time estimates

use crate::services::geo::path_length_meters;
use crate::types::Coordinates;

const METERS_PER_MILE: f64 = 1609.344;

/// Distance and driving time of a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEstimate {
    pub meters: f64,
    pub seconds: f64,
}

impl RouteEstimate {
    pub fn from_meters(meters: f64, average_speed_kmh: f64) -> Self {
        let meters_per_second = average_speed_kmh * 1000.0 / 3600.0;
        Self {
            meters,
            seconds: meters / meters_per_second,
        }
    }

    /// Estimate for driving through `path` in order
    pub fn for_path(path: &[Coordinates], average_speed_kmh: f64) -> Self {
        Self::from_meters(path_length_meters(path), average_speed_kmh)
    }

    /// Miles rounded to one decimal
    pub fn miles(&self) -> f64 {
        (self.meters / METERS_PER_MILE * 10.0).round() / 10.0
    }

    /// Driving time as `H:MM`, rounded to the minute
    pub fn eta_hmm(&self) -> String {
        let total_minutes = (self.seconds / 60.0).round() as u64;
        format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
    }
}
