//! Force Field
//!
//! Pairwise forces from shared memory (attraction), a Hookean spring toward
//! the rest distance, and a cubic exclusion barrier under compression.

use glam::DVec3;

use crate::components::{PairMatrix, RestDistances};
use crate::config::SimParams;

/// Scalar components of one pair's force. Positive pulls the pair together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForce {
    pub memory: f64,
    pub linear: f64,
    pub barrier: f64,
}

impl PairForce {
    pub fn total(&self) -> f64 {
        self.memory + self.linear + self.barrier
    }
}

/// `mu * delta^3` under compression, zero otherwise.
#[inline]
pub fn barrier(delta: f64, mu: f64) -> f64 {
    if delta < 0.0 {
        mu * delta.powi(3)
    } else {
        0.0
    }
}

pub fn pair_force(shared_memory: f64, distance: f64, rest: f64, params: &SimParams) -> PairForce {
    let delta = distance - rest;
    PairForce {
        memory: params.lambda_c * shared_memory,
        linear: params.kappa * delta,
        barrier: barrier(delta, params.mu),
    }
}

/// Net force on every agent. Each pair contributes `+F` to `i` and `-F` to `j`
/// along the unit vector from `i` to `j`; coincident pairs are skipped.
pub fn compute_forces(
    positions: &[DVec3],
    memory: &PairMatrix,
    rest: &RestDistances,
    params: &SimParams,
) -> Vec<DVec3> {
    let n = positions.len();
    let mut forces = vec![DVec3::ZERO; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let diff = positions[j] - positions[i];
            let d = diff.length();
            if d == 0.0 {
                tracing::debug!(i, j, "coincident agents, force skipped");
                continue;
            }
            let dir = diff / d;
            let shared = (memory.get(i, j) + memory.get(j, i)) / 2.0;
            let f = dir * pair_force(shared, d, rest.get(i, j), params).total();
            forces[i] += f;
            forces[j] -= f;
        }
    }
    forces
}
