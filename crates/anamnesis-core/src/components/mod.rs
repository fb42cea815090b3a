//! Engine data: agent configs, pairwise matrices and the simulation state.

pub mod agent;
pub mod matrix;
pub mod state;

pub use agent::{AgentConfig, AgentSpec, DisplayConfig};
pub use matrix::{PairMatrix, RestDistances};
pub use state::{Diagnostics, SimulationState};
