//! Crisis and impact metrics.

use anamnesis_events::{CrisisLevel, ImpactMetrics, RecoveryEstimate, TickSnapshot};
use bevy_ecs::prelude::*;

/// Any activation above this is a crisis
pub const CRISIS_ACTIVATION: f64 = 2.5;

/// Any activation above this is tension
pub const TENSION_ACTIVATION: f64 = 1.5;

/// Scar strength beyond which recovery is not expected
pub const IRREVERSIBLE_SCAR: f64 = 2.0;

/// Recovery ticks per unit of scar strength
pub const RECOVERY_TICKS_PER_UNIT: f64 = 100.0;

/// Resilience percentage lost per unit of scar strength
pub const RESILIENCE_LOSS_PER_UNIT: f64 = 20.0;

pub fn classify_crisis(activations: &[f64]) -> CrisisLevel {
    if activations.iter().any(|a| *a > CRISIS_ACTIVATION) {
        CrisisLevel::Crisis
    } else if activations.iter().any(|a| *a > TENSION_ACTIVATION) {
        CrisisLevel::Tension
    } else {
        CrisisLevel::Stable
    }
}

pub fn impact_metrics(snapshot: &TickSnapshot) -> ImpactMetrics {
    let scar = snapshot.max_memory();
    let recovery = if scar > IRREVERSIBLE_SCAR {
        RecoveryEstimate::Irreversible
    } else {
        RecoveryEstimate::Ticks((scar * RECOVERY_TICKS_PER_UNIT) as u64)
    };
    ImpactMetrics {
        scar_strength: scar,
        total_memory: snapshot.total_memory(),
        recovery,
        resilience_pct: (100.0 - scar * RESILIENCE_LOSS_PER_UNIT).max(0.0),
    }
}

/// Tracks the crisis level across ticks and logs transitions.
#[derive(Resource, Debug, Default)]
pub struct CrisisMonitor {
    level: CrisisLevel,
    peak: CrisisLevel,
}

impl CrisisMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> CrisisLevel {
        self.level
    }

    /// Highest level seen so far
    pub fn peak(&self) -> CrisisLevel {
        self.peak
    }

    /// Returns the new level when it changed.
    pub fn observe(&mut self, snapshot: &TickSnapshot) -> Option<CrisisLevel> {
        let level = classify_crisis(&snapshot.activations);
        self.peak = self.peak.max(level);
        if level == self.level {
            return None;
        }
        tracing::info!(tick = snapshot.tick, "{} -> {}", self.level, level);
        self.level = level;
        Some(level)
    }
}
