//! Before/after captures around a trauma pulse.

use anamnesis_events::{CaptureKind, SnapshotCapture, TickSnapshot};
use bevy_ecs::prelude::*;

use crate::stress::StressPolicy;

/// Ticks after the trauma at which the "after" view is taken
pub const AFTER_TRAUMA_TICKS: u64 = 50;

#[derive(Resource, Debug, Default)]
pub struct CaptureRecorder {
    /// `(snapshot tick, kind)` still waiting to be captured
    pending: Vec<(u64, CaptureKind)>,
    captures: Vec<SnapshotCapture>,
}

impl CaptureRecorder {
    /// Schedules captures for a trauma policy; other policies capture nothing.
    ///
    /// "Before" is the state committed just ahead of the trauma tick, "after"
    /// is the state once the trauma tick and [`AFTER_TRAUMA_TICKS`] more have run.
    /// A trauma at tick 0 needs the starting snapshot to be observed too.
    pub fn for_policy(policy: &StressPolicy) -> Self {
        let pending = match *policy {
            StressPolicy::Trauma { tick, .. } => vec![
                (tick, CaptureKind::BeforeTrauma),
                (tick + 1 + AFTER_TRAUMA_TICKS, CaptureKind::AfterTrauma),
            ],
            _ => Vec::new(),
        };
        Self {
            pending,
            captures: Vec::new(),
        }
    }

    pub fn captures(&self) -> &[SnapshotCapture] {
        &self.captures
    }

    pub fn into_captures(self) -> Vec<SnapshotCapture> {
        self.captures
    }

    pub fn observe(&mut self, snapshot: &TickSnapshot) {
        let captures = &mut self.captures;
        self.pending.retain(|&(tick, kind)| {
            if tick != snapshot.tick {
                return true;
            }
            captures.push(SnapshotCapture {
                kind,
                snapshot: snapshot.clone(),
            });
            false
        });
    }
}
