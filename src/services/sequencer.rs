//! Stop sequencing for a single truck
//!
//! Builds a closed tour depot → stops → depot with nearest-neighbor
//! construction, then improves it with 2-opt until no reversal gains more
//! than the configured margin. Gives a local optimum only.

use crate::services::geo;
use crate::types::{Coordinates, Job};

/// Ordered tour over the sequencer's nodes.
///
/// Node 0 is the depot, node `i` (i ≥ 1) is job `i - 1`. The path starts
/// and ends at node 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedRoute {
    pub path: Vec<usize>,
    /// Length of the nearest-neighbor tour before refinement, meters
    pub construction_length_m: f64,
    /// Length of the final tour, meters
    pub length_m: f64,
}

impl SequencedRoute {
    /// Job indices in visiting order
    pub fn job_order(&self) -> impl Iterator<Item = usize> + '_ {
        self.path.iter().filter(|&&n| n != 0).map(|&n| n - 1)
    }
}

/// Sequencer over one depot and a truck's jobs
pub struct RouteSequencer {
    nodes: Vec<Coordinates>,
    distance_matrix: Vec<Vec<f64>>,
    improvement_margin_m: f64,
}

impl RouteSequencer {
    pub fn new(depot: Coordinates, jobs: &[Job], improvement_margin_m: f64) -> Self {
        let mut nodes = Vec::with_capacity(jobs.len() + 1);
        nodes.push(depot);
        nodes.extend(jobs.iter().map(|j| j.coordinates));

        let distance_matrix = geo::distance_matrix(&nodes);

        Self {
            nodes,
            distance_matrix,
            improvement_margin_m,
        }
    }

    /// Coordinates of the nodes along `path`
    pub fn coordinates(&self, path: &[usize]) -> Vec<Coordinates> {
        path.iter().map(|&n| self.nodes[n]).collect()
    }

    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .map(|leg| self.distance_matrix[leg[0]][leg[1]])
            .sum()
    }

    pub fn solve(&self) -> SequencedRoute {
        let initial = self.nearest_neighbor();
        let construction_length_m = self.path_length(&initial);

        let path = self.two_opt(initial);
        let length_m = self.path_length(&path);

        SequencedRoute {
            path,
            construction_length_m,
            length_m,
        }
    }

    /// Greedy tour: always drive to the closest unvisited stop, then home
    pub fn nearest_neighbor(&self) -> Vec<usize> {
        let n = self.nodes.len();
        let mut path = Vec::with_capacity(n + 1);
        let mut visited = vec![false; n];

        path.push(0);
        visited[0] = true;
        let mut current = 0;

        while path.len() < n {
            let mut best_next = None;
            let mut best_dist = f64::INFINITY;

            for candidate in 1..n {
                if visited[candidate] {
                    continue;
                }
                let dist = self.distance_matrix[current][candidate];
                if dist < best_dist {
                    best_dist = dist;
                    best_next = Some(candidate);
                }
            }

            let Some(next) = best_next else { break };
            path.push(next);
            visited[next] = true;
            current = next;
        }

        path.push(0);
        path
    }

    /// 2-opt local search.
    ///
    /// Reversing `path[i..=k]` only replaces edges `(i-1, i)` and `(k, k+1)`;
    /// a reversal is applied when it saves more than the margin, and the
    /// scan continues on the updated path. Full scans repeat until stable.
    pub fn two_opt(&self, mut path: Vec<usize>) -> Vec<usize> {
        let len = path.len();
        if len < 4 {
            return path;
        }

        let d = &self.distance_matrix;
        let mut improved = true;

        while improved {
            improved = false;

            for i in 1..len - 2 {
                for k in i + 1..len - 1 {
                    let (a, b) = (path[i - 1], path[i]);
                    let (c, e) = (path[k], path[k + 1]);

                    let current = d[a][b] + d[c][e];
                    let candidate = d[a][c] + d[b][e];

                    if candidate + self.improvement_margin_m < current {
                        path[i..=k].reverse();
                        improved = true;
                    }
                }
            }
        }

        path
    }
}

/// Depot a truck starts from: the warehouse when any of its jobs leaves
/// from one, the default origin otherwise
pub fn choose_depot(jobs: &[Job], default_origin: Coordinates, warehouse: Coordinates) -> Coordinates {
    if jobs.iter().any(|j| j.from_warehouse) {
        warehouse
    } else {
        default_origin
    }
}
