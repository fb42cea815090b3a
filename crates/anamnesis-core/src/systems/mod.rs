//! Update rules
//!
//! One module per stage of a tick: oscillator phases, internal dynamics,
//! entropy, adaptive decay, memory, forces and integration.

pub mod decay;
pub mod dynamics;
pub mod entropy;
pub mod forces;
pub mod integrator;
pub mod memory;
pub mod oscillator;

// Re-export commonly used systems
pub use decay::adaptive_tau;
pub use dynamics::{
    compute_stress, incoming_coupling, integrate_activation, plasticity, update_activations,
};
pub use entropy::diversity;
pub use forces::{barrier, compute_forces, pair_force, PairForce};
pub use integrator::integrate;
pub use memory::{memory_step, proximity, resonance_row, update_memory, MemoryUpdate};
pub use oscillator::{phase_at, phase_sync, update_phases};
