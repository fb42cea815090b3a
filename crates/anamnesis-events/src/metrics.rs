//! Metric Types
//!
//! Summaries derived from snapshots: crisis level, scar impact, the
//! scar ledger entries and rolling history rows.

use serde::{Deserialize, Serialize};

/// Coarse reading of how activated the group is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrisisLevel {
    #[default]
    Stable,
    Tension,
    Crisis,
}

impl CrisisLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CrisisLevel::Stable => "STABLE",
            CrisisLevel::Tension => "TENSION",
            CrisisLevel::Crisis => "CRISIS",
        }
    }
}

impl std::fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How long a scar is expected to take to fade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "ticks")]
pub enum RecoveryEstimate {
    Ticks(u64),
    Irreversible,
}

impl std::fmt::Display for RecoveryEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoveryEstimate::Ticks(t) => write!(f, "{} ticks", t),
            RecoveryEstimate::Irreversible => f.write_str("irreversible"),
        }
    }
}

/// Impact of accumulated memory on the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    /// Largest single memory entry
    pub scar_strength: f64,
    /// Sum of all memory entries
    pub total_memory: f64,
    pub recovery: RecoveryEstimate,
    /// 0-100
    pub resilience_pct: f64,
}

/// A directed memory entry that crossed the scar tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScarRecord {
    /// Agent holding the memory
    pub holder: usize,
    /// Agent the memory is about
    pub subject: usize,
    pub formed_at_tick: u64,
    pub magnitude_at_formation: f64,
    pub peak_magnitude: f64,
}

/// One tick of the rolling metric history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub tick: u64,
    pub activations: Vec<f64>,
    pub diversity: Vec<f64>,
    pub tau: Vec<f64>,
    pub total_memory: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_level_ordering() {
        assert!(CrisisLevel::Crisis > CrisisLevel::Tension);
        assert!(CrisisLevel::Tension > CrisisLevel::Stable);
        assert_eq!(CrisisLevel::default(), CrisisLevel::Stable);
        assert_eq!(CrisisLevel::Crisis.to_string(), "CRISIS");
    }

    #[test]
    fn test_recovery_serialization() {
        let json = serde_json::to_string(&RecoveryEstimate::Ticks(85)).unwrap();
        assert_eq!(json, r#"{"kind":"ticks","ticks":85}"#);

        let json = serde_json::to_string(&RecoveryEstimate::Irreversible).unwrap();
        assert_eq!(json, r#"{"kind":"irreversible"}"#);
        assert_eq!(RecoveryEstimate::Irreversible.to_string(), "irreversible");
    }
}
