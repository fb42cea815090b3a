//! Error Types
//!
//! Configuration problems are caught before the first tick. Once ticking,
//! the only error is a fatal invariant violation.

use std::fmt;

use thiserror::Error;

/// Errors raised while building or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least 2 agents are required, got {count}")]
    TooFewAgents { count: usize },

    #[error("{agents} agent configs but {positions} initial positions")]
    LengthMismatch { agents: usize, positions: usize },

    #[error("initial position of agent {agent} is not finite")]
    NonFinitePosition { agent: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// State quantity checked for finiteness after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Position,
    Velocity,
    Activation,
    Memory,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Position => "position",
            Quantity::Velocity => "velocity",
            Quantity::Activation => "activation",
            Quantity::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the simulation engine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The step is deterministic, so retrying reproduces the same fault.
    #[error("non-finite {quantity} for agent {agent} at tick {tick}")]
    NonFinite {
        tick: u64,
        quantity: Quantity,
        agent: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
