//! Scar Ledger
//!
//! Records every directed memory entry that crosses the scar tolerance.
//! Records are permanent even if the memory later fades.

use std::collections::HashMap;

use anamnesis_events::{ScarRecord, TickSnapshot};
use bevy_ecs::prelude::*;

#[derive(Resource, Debug)]
pub struct ScarLedger {
    tolerance: f64,
    scars: Vec<ScarRecord>,
    by_pair: HashMap<(usize, usize), usize>,
}

impl ScarLedger {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            scars: Vec::new(),
            by_pair: HashMap::new(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn scars(&self) -> &[ScarRecord] {
        &self.scars
    }

    pub fn get(&self, holder: usize, subject: usize) -> Option<&ScarRecord> {
        self.by_pair.get(&(holder, subject)).map(|&idx| &self.scars[idx])
    }

    /// Updates peaks and returns how many scars formed this tick.
    pub fn observe(&mut self, snapshot: &TickSnapshot) -> usize {
        let mut formed = 0;
        for (holder, row) in snapshot.memory.iter().enumerate() {
            for (subject, &magnitude) in row.iter().enumerate() {
                if holder == subject {
                    continue;
                }
                if let Some(&idx) = self.by_pair.get(&(holder, subject)) {
                    let scar = &mut self.scars[idx];
                    scar.peak_magnitude = scar.peak_magnitude.max(magnitude);
                } else if magnitude > self.tolerance {
                    tracing::info!(
                        tick = snapshot.tick,
                        holder,
                        subject,
                        "scar formed ({:.4})",
                        magnitude
                    );
                    self.by_pair.insert((holder, subject), self.scars.len());
                    self.scars.push(ScarRecord {
                        holder,
                        subject,
                        formed_at_tick: snapshot.tick,
                        magnitude_at_formation: magnitude,
                        peak_magnitude: magnitude,
                    });
                    formed += 1;
                }
            }
        }
        formed
    }
}
