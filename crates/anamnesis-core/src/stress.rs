//! Stress Injection
//!
//! External stress is a policy owned by the caller: a function of the tick
//! index and the agent index. The engine only ever reads it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Source of externally injected stress.
pub trait StressSchedule {
    /// Extra stress applied to `agent` during `tick`.
    fn stress(&self, tick: u64, agent: usize) -> f64;
}

impl<F> StressSchedule for F
where
    F: Fn(u64, usize) -> f64,
{
    fn stress(&self, tick: u64, agent: usize) -> f64 {
        self(tick, agent)
    }
}

/// Stress policies selectable from a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StressPolicy {
    /// No external stress
    None,
    /// Recurring burst on one agent: fires when
    /// `tick > warmup && tick % period > window_start`
    Periodic {
        target: usize,
        amplitude: f64,
        warmup: u64,
        period: u64,
        window_start: u64,
    },
    /// Single-tick shock
    Trauma {
        target: usize,
        tick: u64,
        intensity: f64,
    },
    /// Constant injection for `duration` ticks starting at `start`
    Sustained {
        target: usize,
        amount: f64,
        start: u64,
        duration: u64,
    },
}

impl Default for StressPolicy {
    fn default() -> Self {
        Self::periodic_default()
    }
}

impl StressPolicy {
    /// The recurring burst the default scenario runs with.
    pub fn periodic_default() -> Self {
        StressPolicy::Periodic {
            target: 3,
            amplitude: 6.0,
            warmup: 200,
            period: 300,
            window_start: 280,
        }
    }

    pub fn target(&self) -> Option<usize> {
        match *self {
            StressPolicy::None => None,
            StressPolicy::Periodic { target, .. }
            | StressPolicy::Trauma { target, .. }
            | StressPolicy::Sustained { target, .. } => Some(target),
        }
    }

    /// Same policy aimed at another agent.
    pub fn with_target(self, agent: usize) -> Self {
        match self {
            StressPolicy::None => StressPolicy::None,
            StressPolicy::Periodic {
                amplitude,
                warmup,
                period,
                window_start,
                ..
            } => StressPolicy::Periodic {
                target: agent,
                amplitude,
                warmup,
                period,
                window_start,
            },
            StressPolicy::Trauma { tick, intensity, .. } => StressPolicy::Trauma {
                target: agent,
                tick,
                intensity,
            },
            StressPolicy::Sustained {
                amount,
                start,
                duration,
                ..
            } => StressPolicy::Sustained {
                target: agent,
                amount,
                start,
                duration,
            },
        }
    }

    pub fn validate(&self, agent_count: usize) -> Result<(), ConfigError> {
        if let StressPolicy::Periodic {
            period,
            window_start,
            ..
        } = *self
        {
            if period == 0 {
                return Err(ConfigError::invalid("stress.period", "must be at least 1"));
            }
            // `tick % period` never exceeds `period - 1`
            if window_start.saturating_add(1) >= period {
                return Err(ConfigError::invalid(
                    "stress.window_start",
                    format!("window {} never opens within period {}", window_start, period),
                ));
            }
        }
        match self.target() {
            Some(target) if target >= agent_count => Err(ConfigError::invalid(
                "stress.target",
                format!("agent {} does not exist ({} agents)", target, agent_count),
            )),
            _ => Ok(()),
        }
    }
}

impl StressSchedule for StressPolicy {
    fn stress(&self, tick: u64, agent: usize) -> f64 {
        match *self {
            StressPolicy::None => 0.0,
            StressPolicy::Periodic {
                target,
                amplitude,
                warmup,
                period,
                window_start,
            } => {
                let firing = tick > warmup && period > 0 && tick % period > window_start;
                if agent == target && firing {
                    amplitude
                } else {
                    0.0
                }
            }
            StressPolicy::Trauma {
                target,
                tick: at,
                intensity,
            } => {
                if agent == target && tick == at {
                    intensity
                } else {
                    0.0
                }
            }
            StressPolicy::Sustained {
                target,
                amount,
                start,
                duration,
            } => {
                if agent == target && tick >= start && tick - start < duration {
                    amount
                } else {
                    0.0
                }
            }
        }
    }
}
