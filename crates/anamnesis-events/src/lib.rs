//! Shared snapshot and report types for the Anamnesis engine.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers, dashboards and exporters depend on it to read what the
//! engine produces without linking the engine itself.

pub mod metrics;
pub mod report;
pub mod snapshot;

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, AgentLabel, TickSnapshot};

// Re-export metric types
pub use metrics::{CrisisLevel, HistoryEntry, ImpactMetrics, RecoveryEstimate, ScarRecord};

// Re-export report types
pub use report::{generate_run_id, CaptureKind, RunReport, SnapshotCapture};
