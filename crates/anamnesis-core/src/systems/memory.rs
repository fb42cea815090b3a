//! Memory System
//!
//! Maintains the asymmetric memory ledger: resonance grows an entry, the
//! holder's adaptive tau erodes it.

use glam::DVec3;

use super::decay::adaptive_tau;
use super::entropy::diversity;
use super::oscillator::phase_sync;
use crate::components::PairMatrix;
use crate::config::SimParams;

/// Bounded inverse-square falloff; finite at zero distance.
#[inline]
pub fn proximity(distance: f64, softening: f64) -> f64 {
    1.0 / (distance * distance + softening)
}

/// Resonance agent `i` receives from every other agent.
///
/// Entry `j` is `activation[j] * phase_sync(i, j) * proximity(i, j)`. The self
/// slot and any coincident pair stay at zero.
pub fn resonance_row(
    i: usize,
    activations: &[f64],
    phases: &[f64],
    positions: &[DVec3],
    params: &SimParams,
) -> Vec<f64> {
    let n = activations.len();
    let mut row = vec![0.0; n];
    for j in 0..n {
        if i == j {
            continue;
        }
        let d = positions[i].distance(positions[j]);
        if d == 0.0 {
            tracing::debug!(i, j, "coincident agents, resonance skipped");
            continue;
        }
        row[j] = activations[j]
            * phase_sync(phases[i], phases[j])
            * proximity(d, params.proximity_softening);
    }
    row
}

/// One explicit-Euler step of a single memory entry, clamped at zero.
#[inline]
pub fn memory_step(memory: f64, resonance: f64, tau: f64, params: &SimParams) -> f64 {
    let next = memory + (params.eta * resonance - memory / tau) * params.dt;
    next.max(0.0)
}

/// Result of one memory update.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryUpdate {
    pub memory: PairMatrix,
    pub resonance: PairMatrix,
    pub diversity: Vec<f64>,
    pub tau: Vec<f64>,
}

/// Updates every directed entry. Each row uses its holder's own tau, so
/// `memory[i][j]` and `memory[j][i]` evolve independently.
pub fn update_memory(
    memory: &PairMatrix,
    activations: &[f64],
    phases: &[f64],
    positions: &[DVec3],
    params: &SimParams,
) -> MemoryUpdate {
    let n = activations.len();
    let mut next = memory.clone();
    let mut resonance = PairMatrix::zeros(n);
    let mut diversities = Vec::with_capacity(n);
    let mut taus = Vec::with_capacity(n);

    for i in 0..n {
        let row = resonance_row(i, activations, phases, positions, params);
        let d = diversity(&row);
        let tau = adaptive_tau(d, params);

        for j in 0..n {
            if i == j {
                continue;
            }
            resonance.set(i, j, row[j]);
            next.set(i, j, memory_step(memory.get(i, j), row[j], tau, params));
        }
        diversities.push(d);
        taus.push(tau);
    }

    MemoryUpdate {
        memory: next,
        resonance,
        diversity: diversities,
        tau: taus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_positions() -> Vec<DVec3> {
        vec![DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), DVec3::new(3.0, 0.0, 0.0)]
    }

    #[test]
    fn test_proximity_bounded_at_zero() {
        assert_eq!(proximity(0.0, 0.5), 2.0);
        assert!(proximity(10.0, 0.5) < proximity(1.0, 0.5));
    }

    #[test]
    fn test_resonance_row_formula() {
        let params = SimParams::default();
        let acts = [0.0, 2.0, 1.0];
        let phases = [0.5, 0.25, 0.5];
        let row = resonance_row(0, &acts, &phases, &line_positions(), &params);

        assert_eq!(row[0], 0.0);
        assert!((row[1] - 2.0 * 0.75 / 1.5).abs() < 1e-12);
        assert!((row[2] - 1.0 * 1.0 / 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_pair_skipped() {
        let params = SimParams::default();
        let positions = [DVec3::ONE, DVec3::ONE];
        let row = resonance_row(0, &[1.0, 1.0], &[0.5, 0.5], &positions, &params);
        assert_eq!(row, vec![0.0, 0.0]);
    }

    #[test]
    fn test_memory_never_negative() {
        let params = SimParams {
            dt: 10.0,
            ..SimParams::default()
        };
        // Decay alone would overshoot below zero without the clamp
        assert_eq!(memory_step(1.0, 0.0, 1.0, &params), 0.0);
    }

    #[test]
    fn test_update_is_asymmetric() {
        let params = SimParams::default();
        let memory = PairMatrix::zeros(3);
        // Only agent 2 is active: 0 and 1 remember 2, nobody else grows
        let acts = [0.0, 0.0, 1.5];
        let update = update_memory(&memory, &acts, &[0.5; 3], &line_positions(), &params);

        assert!(update.memory.get(0, 2) > 0.0);
        assert!(update.memory.get(1, 2) > 0.0);
        assert_eq!(update.memory.get(2, 0), 0.0);
        assert_eq!(update.memory.get(2, 1), 0.0);
        assert_eq!(update.memory.get(1, 1), 0.0);

        // Single source means fixation and the shortest tau
        assert_eq!(update.diversity[0], 0.0);
        assert_eq!(update.tau[0], params.tau_min);
        // Agent 2 hears nothing
        assert_eq!(update.diversity[2], 1.0);
        assert_eq!(update.tau[2], params.tau_max);
    }

    #[test]
    fn test_each_holder_forgets_at_own_rate() {
        let params = SimParams::default();
        let mut memory = PairMatrix::zeros(3);
        memory.set(0, 1, 1.0);
        memory.set(1, 0, 1.0);
        // Agent 0 hears only agent 2 (fixation, short tau). Agent 1 is in
        // antiphase with agent 2 and hears nothing (full diversity, long tau).
        let acts = [0.0, 0.0, 1.0];
        let phases = [0.5, 0.0, 1.0];
        let positions = line_positions();
        let update = update_memory(&memory, &acts, &phases, &positions, &params);

        let tau_1 = update.tau[1];
        assert!(update.tau[0] < tau_1);
        // 0 forgets 1 faster than 1 forgets 0
        assert!(update.memory.get(0, 1) < update.memory.get(1, 0));
    }
}
