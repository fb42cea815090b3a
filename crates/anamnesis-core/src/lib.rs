//! ANAMNESIS Engine Library
//!
//! A small population of agents that remember each other. Stress drives
//! activation, synchronized activation writes directed memory, and memory
//! bends the geometry the agents live in. Everything here is deterministic
//! given a seed.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod noise;
pub mod output;
pub mod simulation;
pub mod step;
pub mod stress;
pub mod systems;

pub use components::*;
pub use config::{Config, NoiseConfig, Preset, SimParams, SimulationConfig};
pub use error::{ConfigError, Quantity, SimError, SimResult};
pub use simulation::Simulation;
pub use step::{initialize, step};
pub use stress::{StressPolicy, StressSchedule};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
