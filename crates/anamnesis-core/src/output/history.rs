//! Rolling metric history for dashboards.

use std::collections::VecDeque;

use anamnesis_events::{HistoryEntry, TickSnapshot};
use bevy_ecs::prelude::*;

/// Keeps the last `capacity` ticks.
#[derive(Resource, Debug)]
pub struct MetricsHistory {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl MetricsHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Records a snapshot. Ticks at or before the latest entry are ignored.
    pub fn record(&mut self, snapshot: &TickSnapshot) -> bool {
        if self.latest().is_some_and(|e| e.tick >= snapshot.tick) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            tick: snapshot.tick,
            activations: snapshot.activations.clone(),
            diversity: snapshot.diversity.clone(),
            tau: snapshot.tau.clone(),
            total_memory: snapshot.total_memory(),
        });
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Copy of the window, oldest first.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Diversity of one agent over the window, oldest first.
    pub fn diversity_series(&self, agent: usize) -> Vec<f64> {
        self.entries.iter().map(|e| e.diversity[agent]).collect()
    }

    pub fn tau_series(&self, agent: usize) -> Vec<f64> {
        self.entries.iter().map(|e| e.tau[agent]).collect()
    }

    pub fn activation_series(&self, agent: usize) -> Vec<f64> {
        self.entries.iter().map(|e| e.activations[agent]).collect()
    }

    pub fn total_memory_series(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.total_memory).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tick: u64) -> TickSnapshot {
        TickSnapshot {
            tick,
            positions: vec![[0.0; 3]; 2],
            velocities: vec![[0.0; 3]; 2],
            activations: vec![tick as f64, 0.0],
            phases: vec![0.5; 2],
            memory: vec![vec![0.0, 0.1 * tick as f64], vec![0.0, 0.0]],
            diversity: vec![0.0, 1.0],
            tau: vec![100.0, 2000.0],
            stress: vec![],
        }
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut history = MetricsHistory::new(3);
        for tick in 1..=5 {
            assert!(history.record(&snapshot(tick)));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.activation_series(0), vec![3.0, 4.0, 5.0]);
        assert_eq!(history.tau_series(1), vec![2000.0; 3]);
        assert_eq!(history.diversity_series(0), vec![0.0; 3]);
        let ticks: Vec<u64> = history.to_vec().iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![3, 4, 5]);
    }

    #[test]
    fn test_repeated_tick_ignored() {
        let mut history = MetricsHistory::new(10);
        assert!(history.record(&snapshot(1)));
        assert!(!history.record(&snapshot(1)));
        assert_eq!(history.len(), 1);
        assert!((history.total_memory_series()[0] - 0.1).abs() < 1e-12);
    }
}
