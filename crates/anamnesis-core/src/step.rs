//! Tick Orchestration
//!
//! `initialize` builds the starting state; `step` advances it by one tick.
//! Every read inside a tick sees the previous committed state, except that
//! the memory update uses this tick's resonance and tau, and the force field
//! uses this tick's memory.

use glam::DVec3;
use rand::Rng;

use crate::components::{AgentConfig, Diagnostics, SimulationState};
use crate::config::SimParams;
use crate::error::{ConfigError, SimError};
use crate::stress::StressSchedule;
use crate::systems::{
    compute_forces, compute_stress, integrate, update_activations, update_memory, update_phases,
};

/// Creates the starting state: zero velocity, activation, phase and memory.
///
/// Rest distances are frozen from `positions`.
pub fn initialize(
    agents: &[AgentConfig],
    positions: &[DVec3],
) -> Result<SimulationState, ConfigError> {
    if agents.len() < 2 {
        return Err(ConfigError::TooFewAgents {
            count: agents.len(),
        });
    }
    if agents.len() != positions.len() {
        return Err(ConfigError::LengthMismatch {
            agents: agents.len(),
            positions: positions.len(),
        });
    }
    if let Some(agent) = positions.iter().position(|p| !p.is_finite()) {
        return Err(ConfigError::NonFinitePosition { agent });
    }

    Ok(SimulationState::new(agents.to_vec(), positions.to_vec()))
}

/// Advances `state` by one tick.
///
/// Pure given its inputs and the draws taken from `rng`. A non-finite value
/// in the resulting state is a fatal [`SimError::NonFinite`].
pub fn step<S, R>(
    state: &SimulationState,
    params: &SimParams,
    schedule: &S,
    rng: &mut R,
) -> Result<(SimulationState, Diagnostics), SimError>
where
    S: StressSchedule + ?Sized,
    R: Rng + ?Sized,
{
    let frame = state.tick;
    let agents = state.agents();

    // 1. Oscillators
    let phases = update_phases(frame, agents);

    // 2. Stress from the previous tick's activations, memory and layout
    let stress = compute_stress(
        frame,
        &state.activations,
        &state.memory,
        &state.positions,
        params,
        schedule,
        rng,
    );

    // 3. Internal dynamics
    let activations = update_activations(&state.activations, &stress, agents, params);

    // 4. Resonance, diversity, tau and memory
    let update = update_memory(&state.memory, &activations, &phases, &state.positions, params);

    // 5. Forces from old positions and new memory, then integrate
    let forces = compute_forces(
        &state.positions,
        &update.memory,
        state.rest_distances(),
        params,
    );
    let (positions, velocities) = integrate(&state.positions, &state.velocities, &forces, params);

    let next = state.successor(positions, velocities, activations, phases, update.memory);
    if let Err(e) = next.check_finite() {
        tracing::error!(tick = frame, "invariant violation: {}", e);
        return Err(e);
    }

    let diagnostics = Diagnostics {
        tick: next.tick,
        diversity: update.diversity,
        tau: update.tau,
        stress,
    };
    Ok((next, diagnostics))
}
