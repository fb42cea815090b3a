//! Simulation State
//!
//! The value threaded through `step`. Each tick consumes one state and
//! produces the next; nothing is mutated behind the caller's back.

use std::sync::Arc;

use anamnesis_events::TickSnapshot;
use glam::DVec3;

use super::agent::AgentConfig;
use super::matrix::{PairMatrix, RestDistances};
use crate::error::{Quantity, SimError};

/// Committed state of every agent between two ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Number of ticks already committed; the next tick runs with this frame
    pub tick: u64,
    pub positions: Vec<DVec3>,
    pub velocities: Vec<DVec3>,
    pub activations: Vec<f64>,
    /// Oscillator phases in [0, 1]
    pub phases: Vec<f64>,
    /// Asymmetric, non-negative: `memory[i][j]` is i's memory of j
    pub memory: PairMatrix,
    agents: Arc<[AgentConfig]>,
    rest: Arc<RestDistances>,
}

impl SimulationState {
    pub(crate) fn new(agents: Vec<AgentConfig>, positions: Vec<DVec3>) -> Self {
        let n = agents.len();
        let rest = RestDistances::from_positions(&positions);
        Self {
            tick: 0,
            velocities: vec![DVec3::ZERO; n],
            activations: vec![0.0; n],
            phases: vec![0.0; n],
            memory: PairMatrix::zeros(n),
            positions,
            agents: agents.into(),
            rest: Arc::new(rest),
        }
    }

    /// Builds the successor state, sharing the immutable tables.
    pub(crate) fn successor(
        &self,
        positions: Vec<DVec3>,
        velocities: Vec<DVec3>,
        activations: Vec<f64>,
        phases: Vec<f64>,
        memory: PairMatrix,
    ) -> Self {
        Self {
            tick: self.tick + 1,
            positions,
            velocities,
            activations,
            phases,
            memory,
            agents: Arc::clone(&self.agents),
            rest: Arc::clone(&self.rest),
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &[AgentConfig] {
        &self.agents
    }

    pub fn rest_distances(&self) -> &RestDistances {
        &self.rest
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.positions[i].distance(self.positions[j])
    }

    /// Reports the first non-finite position, velocity, activation or memory entry.
    pub fn check_finite(&self) -> Result<(), SimError> {
        let violation = |quantity, agent| SimError::NonFinite {
            tick: self.tick,
            quantity,
            agent,
        };

        if let Some(i) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(violation(Quantity::Position, i));
        }
        if let Some(i) = self.velocities.iter().position(|v| !v.is_finite()) {
            return Err(violation(Quantity::Velocity, i));
        }
        if let Some(i) = self.activations.iter().position(|a| !a.is_finite()) {
            return Err(violation(Quantity::Activation, i));
        }
        if let Some((i, _)) = self.memory.find_non_finite() {
            return Err(violation(Quantity::Memory, i));
        }
        Ok(())
    }

    /// Immutable view for collaborators.
    pub fn snapshot(&self, diagnostics: &Diagnostics) -> TickSnapshot {
        TickSnapshot {
            tick: self.tick,
            positions: self.positions.iter().map(|p| p.to_array()).collect(),
            velocities: self.velocities.iter().map(|v| v.to_array()).collect(),
            activations: self.activations.clone(),
            phases: self.phases.clone(),
            memory: self.memory.to_rows(),
            diversity: diagnostics.diversity.clone(),
            tau: diagnostics.tau.clone(),
            stress: diagnostics.stress.clone(),
        }
    }
}

/// Per-tick observability values. Only `tau` feeds the physics, and only
/// within the tick that computed it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    pub tick: u64,
    pub diversity: Vec<f64>,
    pub tau: Vec<f64>,
    pub stress: Vec<f64>,
}
