use crate::types::Coordinates;

/// Main yard, where trucks start unless a job needs the warehouse
pub const DEFAULT_ORIGIN: Coordinates = Coordinates::new(18.185554269901573, -65.97009540669629);

/// Bayamón warehouse
pub const DEFAULT_WAREHOUSE: Coordinates = Coordinates::new(18.40473159317047, -66.178846296465);

pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 38.0;

/// Points per Google Maps directions link (origin and destination included)
pub const DEFAULT_MAX_WAYPOINTS: usize = 25;

/// Minimum saving in meters for a 2-opt reversal to be applied.
/// Tunable; keeps near-equal reversals from flipping back and forth.
pub const DEFAULT_TWO_OPT_MARGIN_M: f64 = 50.0;

/// Bed length assumed for a truck class whose bed length is unknown
pub const DEFAULT_BED_FT: f64 = 24.0;

pub const DEFAULT_MAX_JOBS_PER_TRUCK: usize = 5;
