//! Snapshot Types
//!
//! Immutable per-tick views of the simulation, handed to collaborators
//! (renderers, metric dashboards, exporters). Nothing here feeds back into
//! the physics.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID for the given tick.
pub fn generate_snapshot_id(tick: u64) -> String {
    format!("snap_{:06}", tick)
}

/// Presentation-only identity of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLabel {
    pub name: String,
    pub color: String,
}

impl AgentLabel {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// State of every agent after one committed tick.
///
/// `memory[i][j]` is how much agent `i` has internalized of agent `j`.
/// `diversity` and `tau` are the diagnostics computed during the same tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub positions: Vec<[f64; 3]>,
    pub velocities: Vec<[f64; 3]>,
    pub activations: Vec<f64>,
    pub phases: Vec<f64>,
    pub memory: Vec<Vec<f64>>,
    pub diversity: Vec<f64>,
    pub tau: Vec<f64>,
    /// Total stress each agent received this tick
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stress: Vec<f64>,
}

impl TickSnapshot {
    pub fn snapshot_id(&self) -> String {
        generate_snapshot_id(self.tick)
    }

    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// Mean of the two directed memory entries for a pair.
    pub fn shared_memory(&self, i: usize, j: usize) -> f64 {
        (self.memory[i][j] + self.memory[j][i]) / 2.0
    }

    /// Sum over the whole memory matrix.
    pub fn total_memory(&self) -> f64 {
        self.memory.iter().flatten().sum()
    }

    /// Largest single memory entry, 0.0 for an empty matrix.
    pub fn max_memory(&self) -> f64 {
        self.memory.iter().flatten().copied().fold(0.0, f64::max)
    }

    pub fn mean_diversity(&self) -> f64 {
        if self.diversity.is_empty() {
            return 0.0;
        }
        self.diversity.iter().sum::<f64>() / self.diversity.len() as f64
    }

    /// Serialize to a single JSON line.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
