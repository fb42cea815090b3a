//! Internal Dynamics
//!
//! Leaky-integrator activation with threshold-gated plasticity, and the
//! stress each agent feels.

use glam::DVec3;
use rand::Rng;

use crate::components::{AgentConfig, PairMatrix};
use crate::config::SimParams;
use crate::stress::StressSchedule;

/// Gated plasticity drive: zero at or below `tc`, linear above it.
#[inline]
pub fn plasticity(stress: f64, tc: f64, alpha: f64) -> f64 {
    if stress > tc {
        alpha * (stress - tc)
    } else {
        0.0
    }
}

/// One Euler step of an agent's activation.
#[inline]
pub fn integrate_activation(
    activation: f64,
    stress: f64,
    agent: &AgentConfig,
    params: &SimParams,
) -> f64 {
    let decay = -activation / params.tau_decay;
    activation + (decay + plasticity(stress, agent.tc, agent.alpha)) * params.dt
}

/// Stress transmitted to agent `i` by neighbours above the contagion threshold.
///
/// Uses `memory[j][i]`: how much each neighbour has internalized of `i`.
pub fn incoming_coupling(
    i: usize,
    activations: &[f64],
    memory: &PairMatrix,
    positions: &[DVec3],
    params: &SimParams,
) -> f64 {
    let mut incoming = 0.0;
    for (j, &activation) in activations.iter().enumerate() {
        if i == j || activation <= params.contagion_threshold {
            continue;
        }
        let d = positions[i].distance(positions[j]);
        if d == 0.0 {
            continue;
        }
        incoming += activation * memory.get(j, i) / d;
    }
    incoming
}

/// Total stress per agent: injection + coupling + noise.
///
/// Noise is drawn once per agent in index order.
pub fn compute_stress<S, R>(
    frame: u64,
    activations: &[f64],
    memory: &PairMatrix,
    positions: &[DVec3],
    params: &SimParams,
    schedule: &S,
    rng: &mut R,
) -> Vec<f64>
where
    S: StressSchedule + ?Sized,
    R: Rng + ?Sized,
{
    (0..activations.len())
        .map(|i| {
            let injected = schedule.stress(frame, i);
            let coupled = params.coupling_gain
                * incoming_coupling(i, activations, memory, positions, params);
            injected + coupled + params.noise.sample(rng)
        })
        .collect()
}

pub fn update_activations(
    activations: &[f64],
    stress: &[f64],
    agents: &[AgentConfig],
    params: &SimParams,
) -> Vec<f64> {
    activations
        .iter()
        .zip(stress)
        .zip(agents)
        .map(|((&a, &s), agent)| integrate_activation(a, s, agent, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_plasticity_kink_at_threshold() {
        let tc = 1.2;
        assert_eq!(plasticity(tc, tc, 0.9), 0.0);
        assert_eq!(plasticity(tc - 1e-9, tc, 0.9), 0.0);
        let just_above = plasticity(tc + 1e-9, tc, 0.9);
        assert!(just_above > 0.0 && just_above < 1e-8);
    }

    #[test]
    fn test_below_threshold_ignores_alpha() {
        let params = SimParams::default();
        let timid = AgentConfig::new(2.0, 0.1, 0.05);
        let wild = AgentConfig::new(2.0, 50.0, 0.05);
        assert_eq!(
            integrate_activation(1.0, 1.5, &timid, &params),
            integrate_activation(1.0, 1.5, &wild, &params)
        );
    }

    #[test]
    fn test_decays_to_zero_below_threshold() {
        let params = SimParams::default();
        for alpha in [0.0, 1.3, 100.0] {
            let agent = AgentConfig::new(1.0, alpha, 0.1);
            let mut activation = 3.0;
            for _ in 0..20_000 {
                activation = integrate_activation(activation, 0.9, &agent, &params);
            }
            assert!(activation.abs() < 1e-6, "alpha {} left {}", alpha, activation);
        }
    }

    #[test]
    fn test_above_threshold_grows() {
        let params = SimParams::default();
        let agent = AgentConfig::new(0.6, 1.3, 0.14);
        let next = integrate_activation(0.0, 6.0, &agent, &params);
        assert!((next - 1.3 * 5.4 * 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_contagion_is_threshold_gated() {
        let params = SimParams::default();
        let mut memory = PairMatrix::zeros(2);
        memory.set(1, 0, 2.0);
        let positions = [DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0)];

        assert_eq!(incoming_coupling(0, &[0.0, 0.5], &memory, &positions, &params), 0.0);
        let coupled = incoming_coupling(0, &[0.0, 0.6], &memory, &positions, &params);
        assert!((coupled - 0.6 * 2.0 / 2.0).abs() < 1e-12);
        // Agent 1 is not coupled to agent 0's activation: memory[0][1] is zero
        assert_eq!(incoming_coupling(1, &[3.0, 0.0], &memory, &positions, &params), 0.0);
    }

    #[test]
    fn test_compute_stress_without_noise() {
        let params = SimParams::default().without_noise();
        let memory = PairMatrix::zeros(2);
        let positions = [DVec3::ZERO, DVec3::X];
        let schedule = |_tick: u64, agent: usize| if agent == 1 { 6.0 } else { 0.0 };
        let mut rng = SmallRng::seed_from_u64(0);

        let stress = compute_stress(0, &[0.0, 0.0], &memory, &positions, &params, &schedule, &mut rng);
        assert_eq!(stress, vec![0.0, 6.0]);
    }
}
