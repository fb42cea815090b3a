//! Observability
//!
//! Read-only consumers of tick snapshots: crisis and impact metrics, the scar
//! ledger, rolling history, trauma captures and the end-of-run report.

pub mod captures;
pub mod history;
pub mod metrics;
pub mod report;
pub mod scars;

pub use captures::{CaptureRecorder, AFTER_TRAUMA_TICKS};
pub use history::MetricsHistory;
pub use metrics::{classify_crisis, impact_metrics, CrisisMonitor};
pub use report::build_report;
pub use scars::ScarLedger;
