//! Capacity-aware partitioning of jobs among trucks of one class
//!
//! Jobs are ordered by bearing from the depot and dealt round-robin into one
//! bin per truck, so neighbouring jobs tend to land together while each bin
//! stays within its job count and bed length. Single pass, no lookback.

use tracing::debug;

use crate::services::geo::bearing_angle;
use crate::types::{Coordinates, Job};

/// Limits shared by all bins of a partition
#[derive(Debug, Clone, Copy)]
pub struct BinLimits {
    /// Bed length available on each truck, in feet
    pub bed_capacity_ft: f64,
    /// Maximum number of jobs per truck
    pub max_jobs: usize,
}

#[derive(Debug, Clone, Default)]
struct Bin {
    carried_ft: f64,
    jobs: Vec<usize>,
}

impl Bin {
    fn has_room(&self, limits: &BinLimits) -> bool {
        self.jobs.len() < limits.max_jobs
    }

    fn accepts(&self, job: &Job, limits: &BinLimits) -> bool {
        let added = job.load_delta_ft().max(0.0);
        let would_carry = (self.carried_ft + added).max(0.0);
        self.has_room(limits) && (would_carry <= limits.bed_capacity_ft || job.length_or_zero() == 0.0)
    }

    fn push(&mut self, idx: usize, job: &Job) {
        self.jobs.push(idx);
        // Deliveries free bed length; the counter never goes negative
        self.carried_ft = (self.carried_ft + job.load_delta_ft()).max(0.0);
    }
}

/// Indices of `jobs` sorted by bearing from `origin`; ties keep input order
fn sweep_order(origin: &Coordinates, jobs: &[Job]) -> Vec<usize> {
    let angles: Vec<f64> = jobs
        .iter()
        .map(|j| bearing_angle(origin, &j.coordinates))
        .collect();

    let mut order: Vec<usize> = (0..jobs.len()).collect();
    order.sort_by(|&a, &b| angles[a].total_cmp(&angles[b]));
    order
}

/// Split `jobs` into `bins` lists, one per truck.
///
/// Each list keeps insertion order. Jobs no bin can take, even ignoring the
/// bed length, are dropped.
pub fn partition(origin: &Coordinates, jobs: &[Job], bins: usize, limits: BinLimits) -> Vec<Vec<Job>> {
    if bins == 0 {
        return Vec::new();
    }

    let mut state: Vec<Bin> = vec![Bin::default(); bins];
    let mut cursor = 0;

    for idx in sweep_order(origin, jobs) {
        let job = &jobs[idx];

        let mut placed = false;
        for _ in 0..bins {
            if state[cursor].accepts(job, &limits) {
                state[cursor].push(idx, job);
                placed = true;
                break;
            }
            cursor = (cursor + 1) % bins;
        }

        if !placed {
            if state[cursor].has_room(&limits) {
                debug!("Job {} exceeds bed capacity everywhere, forcing into bin {}", job.id, cursor);
                state[cursor].push(idx, job);
            } else {
                debug!("Job {} dropped: all bins full", job.id);
            }
        }

        cursor = (cursor + 1) % bins;
    }

    state
        .into_iter()
        .map(|bin| bin.jobs.into_iter().map(|i| jobs[i].clone()).collect())
        .collect()
}
