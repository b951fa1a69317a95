//! Vehicle types

use serde::{Deserialize, Serialize};

use super::LoadState;

/// Handling category of a truck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    Trailer,
    Fingger,
    Flatbed,
    Unknown,
}

impl VehicleClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Trailer => "Trailer",
            VehicleClass::Fingger => "Fingger",
            VehicleClass::Flatbed => "Flatbed",
            VehicleClass::Unknown => "Unknown",
        }
    }

    /// Whether a truck of this class can take a job.
    ///
    /// Only crane trucks are restricted: nothing 20 ft or longer, and no
    /// loaded 12 ft or 16 ft units. A missing length counts as zero.
    pub fn can_carry(self, load: LoadState, length_ft: Option<f64>) -> bool {
        let length = length_ft.unwrap_or(0.0);
        match self {
            VehicleClass::Fingger => {
                if length >= 20.0 {
                    return false;
                }
                let restricted_size = length == 12.0 || length == 16.0;
                !(restricted_size && load == LoadState::Full)
            }
            VehicleClass::Trailer | VehicleClass::Flatbed | VehicleClass::Unknown => true,
        }
    }
}

/// An available truck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Display id (`Camion`, else `Name`, else the record id)
    pub id: String,
    /// Upstream record id, the target of linked-record fields
    pub record_id: String,
    pub class: VehicleClass,
    /// Bed length in feet (0 when unknown)
    pub bed_ft: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingger_rejects_twenty_feet_and_longer() {
        assert!(!VehicleClass::Fingger.can_carry(LoadState::Empty, Some(20.0)));
        assert!(!VehicleClass::Fingger.can_carry(LoadState::Unknown, Some(40.0)));
    }

    #[test]
    fn test_fingger_rejects_loaded_twelve_and_sixteen() {
        assert!(!VehicleClass::Fingger.can_carry(LoadState::Full, Some(12.0)));
        assert!(!VehicleClass::Fingger.can_carry(LoadState::Full, Some(16.0)));
    }

    #[test]
    fn test_fingger_accepts_empty_sixteen_and_small_units() {
        assert!(VehicleClass::Fingger.can_carry(LoadState::Empty, Some(16.0)));
        assert!(VehicleClass::Fingger.can_carry(LoadState::Full, Some(8.0)));
        assert!(VehicleClass::Fingger.can_carry(LoadState::Full, None));
    }

    #[test]
    fn test_other_classes_accept_everything() {
        for class in [VehicleClass::Trailer, VehicleClass::Flatbed, VehicleClass::Unknown] {
            assert!(class.can_carry(LoadState::Full, Some(40.0)));
            assert!(class.can_carry(LoadState::Full, Some(16.0)));
        }
    }

    #[test]
    fn test_vehicle_class_serializes_as_name() {
        let json = serde_json::to_string(&VehicleClass::Fingger).unwrap();
        assert_eq!(json, "\"Fingger\"");
    }
}
