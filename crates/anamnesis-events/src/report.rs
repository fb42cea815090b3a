//! Run Report
//!
//! End-of-run summary handed to exporters.

use serde::{Deserialize, Serialize};

use crate::metrics::{CrisisLevel, HistoryEntry, ImpactMetrics, ScarRecord};
use crate::snapshot::{AgentLabel, TickSnapshot};

/// Generates a unique run ID.
pub fn generate_run_id() -> String {
    format!("run_{}", uuid::Uuid::new_v4().simple())
}

/// Why a snapshot was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureKind {
    BeforeTrauma,
    AfterTrauma,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCapture {
    pub kind: CaptureKind,
    pub snapshot: TickSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub seed: u64,
    pub ticks_run: u64,
    pub agents: Vec<AgentLabel>,
    pub final_snapshot: Option<TickSnapshot>,
    pub impact: Option<ImpactMetrics>,
    #[serde(default)]
    pub crisis_level: CrisisLevel,
    #[serde(default)]
    pub scars: Vec<ScarRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<SnapshotCapture>,
    /// Trailing window of per-tick metrics, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
    /// Set when the run stopped on an invariant violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halted: Option<String>,
}

impl RunReport {
    pub fn new(seed: u64, agents: Vec<AgentLabel>) -> Self {
        Self {
            run_id: generate_run_id(),
            seed,
            ticks_run: 0,
            agents,
            final_snapshot: None,
            impact: None,
            crisis_level: CrisisLevel::Stable,
            scars: Vec::new(),
            captures: Vec::new(),
            history: Vec::new(),
            halted: None,
        }
    }

    pub fn capture(&self, kind: CaptureKind) -> Option<&TickSnapshot> {
        self.captures
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| &c.snapshot)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique() {
        let a = generate_run_id();
        let b = generate_run_id();
        assert!(a.starts_with("run_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_report_is_empty() {
        let report = RunReport::new(42, vec![AgentLabel::new("Leader", "#ff00ff")]);
        assert_eq!(report.seed, 42);
        assert_eq!(report.ticks_run, 0);
        assert!(report.capture(CaptureKind::BeforeTrauma).is_none());

        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"crisis_level\": \"stable\""));
        assert!(!json.contains("halted"));
        assert!(!json.contains("captures"));
        assert!(!json.contains("history"));
    }
}
