//! Simulation Runner
//!
//! Owns a state, its parameters and a stress policy, and advances them one
//! tick at a time. The RNG stays with the caller.

use anamnesis_events::TickSnapshot;
use rand::Rng;

use crate::components::{Diagnostics, SimulationState};
use crate::config::{Config, SimParams};
use crate::error::SimError;
use crate::step::{initialize, step};
use crate::stress::StressSchedule;

pub struct Simulation {
    state: SimulationState,
    params: SimParams,
    schedule: Box<dyn StressSchedule + Send + Sync>,
    latest: Option<TickSnapshot>,
}

impl Simulation {
    pub fn new(
        state: SimulationState,
        params: SimParams,
        schedule: impl StressSchedule + Send + Sync + 'static,
    ) -> Self {
        Self {
            state,
            params,
            schedule: Box::new(schedule),
            latest: None,
        }
    }

    /// Validates `config` and builds the starting state from it.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let state = initialize(&config.agent_configs(), &config.initial_positions())?;
        Ok(Self::new(state, config.params.clone(), config.stress))
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Ticks committed so far.
    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    /// Snapshot of the last committed tick, if any.
    pub fn latest(&self) -> Option<&TickSnapshot> {
        self.latest.as_ref()
    }

    /// Snapshot of the starting state, before any tick has run.
    pub fn initial_snapshot(&self) -> TickSnapshot {
        let n = self.state.agent_count();
        let diagnostics = Diagnostics {
            tick: self.state.tick,
            diversity: vec![1.0; n],
            tau: vec![self.params.tau_max; n],
            stress: Vec::new(),
        };
        self.state.snapshot(&diagnostics)
    }

    /// Runs one tick. On error the committed state is left untouched.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&TickSnapshot, SimError> {
        let (next, diagnostics) = step(&self.state, &self.params, self.schedule.as_ref(), rng)?;
        let snapshot = next.snapshot(&diagnostics);
        self.state = next;
        Ok(self.latest.insert(snapshot))
    }

    /// Runs `ticks` ticks, handing each snapshot to `observer`.
    pub fn run_with<R, F>(&mut self, ticks: u64, rng: &mut R, mut observer: F) -> Result<(), SimError>
    where
        R: Rng + ?Sized,
        F: FnMut(&TickSnapshot),
    {
        for _ in 0..ticks {
            let snapshot = self.advance(rng)?;
            observer(snapshot);
        }
        Ok(())
    }

    pub fn run<R: Rng + ?Sized>(&mut self, ticks: u64, rng: &mut R) -> Result<(), SimError> {
        self.run_with(ticks, rng, |_| {})
    }
}
