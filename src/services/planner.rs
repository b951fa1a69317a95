//! Route suggestion pipeline
//!
//! Reads jobs, trucks and drivers, then per truck class: keeps the jobs the
//! class can carry, partitions them among the class's trucks and sequences
//! each truck's share into a route with estimates and map links.

use chrono::Utc;
use tracing::{debug, info};

use crate::defaults::{
    DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_BED_FT, DEFAULT_MAX_WAYPOINTS, DEFAULT_ORIGIN,
    DEFAULT_TWO_OPT_MARGIN_M, DEFAULT_WAREHOUSE,
};
use crate::services::classifier::classify_jobs;
use crate::services::estimator::RouteEstimate;
use crate::services::map_links::maps_urls;
use crate::services::partition::{partition, BinLimits};
use crate::services::profiler::{available_vehicles, driver_for, drivers_by_vehicle};
use crate::services::records::{RecordSource, RecordSourceError, TableNames};
use crate::services::sequencer::{choose_depot, RouteSequencer};
use crate::types::{
    Coordinates, Job, Record, SuggestRoutesRequest, SuggestRoutesResponse, SuggestedStop,
    Suggestion, Vehicle, VehicleClass,
};

/// Tunable parameters of the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Default depot
    pub origin: Coordinates,
    /// Depot for trucks with a job leaving from the warehouse
    pub warehouse: Coordinates,
    pub average_speed_kmh: f64,
    /// Points per navigation link, at least 2
    pub max_waypoints: usize,
    pub two_opt_margin_m: f64,
    /// Bed length used when a class's first truck has none recorded
    pub default_bed_ft: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            warehouse: DEFAULT_WAREHOUSE,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            two_opt_margin_m: DEFAULT_TWO_OPT_MARGIN_M,
            default_bed_ft: DEFAULT_BED_FT,
        }
    }
}

/// Raw rows of the three upstream tables
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    pub jobs: &'a [Record],
    pub trucks: &'a [Record],
    pub drivers: &'a [Record],
}

/// Classes present among `vehicles`, in order of first appearance
fn classes_in_order(vehicles: &[Vehicle]) -> Vec<VehicleClass> {
    let mut classes = Vec::new();
    for vehicle in vehicles {
        if !classes.contains(&vehicle.class) {
            classes.push(vehicle.class);
        }
    }
    classes
}

/// Route one truck through its assigned jobs
pub fn plan_vehicle(
    vehicle: &Vehicle,
    driver: Option<String>,
    jobs: &[Job],
    config: &PlannerConfig,
) -> Suggestion {
    let depot = choose_depot(jobs, config.origin, config.warehouse);
    let sequencer = RouteSequencer::new(depot, jobs, config.two_opt_margin_m);
    let route = sequencer.solve();

    let path = sequencer.coordinates(&route.path);
    let estimate = RouteEstimate::for_path(&path, config.average_speed_kmh);

    let stops = route
        .job_order()
        .enumerate()
        .map(|(i, job_idx)| {
            let job = &jobs[job_idx];
            SuggestedStop {
                index: i + 1,
                job_id: job.id.clone(),
                container_type: job.container_type.clone(),
                service_type: job.service_type.clone(),
                lat: job.coordinates.lat,
                lng: job.coordinates.lng,
            }
        })
        .collect();

    debug!(
        "Vehicle {}: {} stops, {:.0} m (construction {:.0} m)",
        vehicle.id,
        jobs.len(),
        route.length_m,
        route.construction_length_m
    );

    Suggestion {
        vehicle_id: vehicle.id.clone(),
        driver,
        vehicle_class: vehicle.class,
        bed_ft: vehicle.bed_ft,
        total_miles: estimate.miles(),
        eta: estimate.eta_hmm(),
        maps_urls: maps_urls(&path, config.max_waypoints),
        stops,
    }
}

/// Build suggestions from already fetched rows
pub fn plan(input: PlanInput<'_>, params: &SuggestRoutesRequest, config: &PlannerConfig) -> Vec<Suggestion> {
    let jobs = classify_jobs(input.jobs, params.only_unassigned);
    let vehicles = available_vehicles(input.trucks);
    let drivers = drivers_by_vehicle(input.drivers);

    info!(
        "Planning {} candidate jobs ({} rows) across {} available vehicles",
        jobs.len(),
        input.jobs.len(),
        vehicles.len()
    );

    if vehicles.is_empty() {
        return Vec::new();
    }

    let mut suggestions = Vec::new();

    for class in classes_in_order(&vehicles) {
        let fleet: Vec<&Vehicle> = vehicles.iter().filter(|v| v.class == class).collect();

        let bed_capacity_ft = fleet
            .first()
            .map(|v| v.bed_ft)
            .filter(|&bed| bed > 0.0)
            .unwrap_or(config.default_bed_ft);

        let feasible: Vec<Job> = jobs
            .iter()
            .filter(|j| class.can_carry(j.load, j.length_ft))
            .cloned()
            .collect();

        info!(
            "Class {}: {} vehicles, {} feasible jobs, bed {} ft",
            class.as_str(),
            fleet.len(),
            feasible.len(),
            bed_capacity_ft
        );

        let limits = BinLimits {
            bed_capacity_ft,
            max_jobs: params.max_jobs_per_truck,
        };
        let bins = partition(&config.origin, &feasible, fleet.len(), limits);

        for (vehicle, mut assigned) in fleet.into_iter().zip(bins) {
            assigned.truncate(params.max_jobs_per_truck);
            if assigned.is_empty() {
                continue;
            }

            let driver = driver_for(&drivers, vehicle);
            suggestions.push(plan_vehicle(vehicle, driver, &assigned, config));
        }
    }

    suggestions
}

/// Fetch the three tables concurrently and plan routes.
///
/// Any read failure aborts the whole request.
pub async fn suggest_routes(
    source: &dyn RecordSource,
    tables: &TableNames,
    params: &SuggestRoutesRequest,
    config: &PlannerConfig,
) -> Result<SuggestRoutesResponse, RecordSourceError> {
    let (jobs, trucks, drivers) = tokio::try_join!(
        source.list_all(&tables.jobs),
        source.list_all(&tables.trucks),
        source.list_all(&tables.drivers),
    )?;

    debug!(
        "Fetched {} jobs, {} trucks, {} drivers from {}",
        jobs.len(),
        trucks.len(),
        drivers.len(),
        source.name()
    );

    let input = PlanInput {
        jobs: &jobs,
        trucks: &trucks,
        drivers: &drivers,
    };
    let suggestions = plan(input, params, config);

    info!("Generated {} route suggestions", suggestions.len());

    Ok(SuggestRoutesResponse {
        generated_at: Utc::now(),
        origin: config.origin,
        suggestions,
    })
}
