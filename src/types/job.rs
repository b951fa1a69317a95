//! Transport job types

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Whether the truck is loaded when it finishes a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Full,
    Empty,
    Unknown,
}

impl LoadState {
    pub const fn as_str(self) -> &'static str {
        match self {
            LoadState::Full => "full",
            LoadState::Empty => "empty",
            LoadState::Unknown => "unknown",
        }
    }
}

/// A pending job with a resolved destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub coordinates: Coordinates,
    pub service_type: String,
    pub origin_text: String,
    pub container_type: String,
    /// Required bed length in feet, if known
    pub length_ft: Option<f64>,
    pub load: LoadState,
    /// Job starts at one of our warehouses
    pub from_warehouse: bool,
}

impl Job {
    /// Length in feet, treating unknown length as zero
    pub fn length_or_zero(&self) -> f64 {
        self.length_ft.unwrap_or(0.0)
    }

    /// Signed change of carried length caused by this job
    pub fn load_delta_ft(&self) -> f64 {
        match self.load {
            LoadState::Full => self.length_or_zero(),
            LoadState::Empty => -self.length_or_zero(),
            LoadState::Unknown => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(load: LoadState, length_ft: Option<f64>) -> Job {
        Job {
            id: "J-1".to_string(),
            coordinates: Coordinates { lat: 18.2, lng: -66.0 },
            service_type: String::new(),
            origin_text: String::new(),
            container_type: String::new(),
            length_ft,
            load,
            from_warehouse: false,
        }
    }

    #[test]
    fn test_load_delta_sign_follows_load_state() {
        assert_eq!(job(LoadState::Full, Some(16.0)).load_delta_ft(), 16.0);
        assert_eq!(job(LoadState::Empty, Some(16.0)).load_delta_ft(), -16.0);
        assert_eq!(job(LoadState::Unknown, Some(16.0)).load_delta_ft(), 0.0);
    }

    #[test]
    fn test_load_delta_without_length_is_zero() {
        assert_eq!(job(LoadState::Full, None).load_delta_ft(), 0.0);
    }

    #[test]
    fn test_load_state_serializes_lowercase() {
        let json = serde_json::to_string(&LoadState::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
        assert_eq!(LoadState::Full.as_str(), "full");
    }
}
