//! End-of-run report assembly.

use anamnesis_events::{RunReport, SnapshotCapture};

use super::history::MetricsHistory;
use super::metrics::{classify_crisis, impact_metrics};
use super::scars::ScarLedger;
use crate::components::DisplayConfig;
use crate::simulation::Simulation;

pub fn build_report(
    seed: u64,
    displays: &[DisplayConfig],
    simulation: &Simulation,
    ledger: &ScarLedger,
    history: &MetricsHistory,
    captures: Vec<SnapshotCapture>,
    halted: Option<String>,
) -> RunReport {
    let mut report = RunReport::new(seed, displays.iter().map(DisplayConfig::label).collect());
    report.ticks_run = simulation.tick();

    let last = simulation
        .latest()
        .cloned()
        .unwrap_or_else(|| simulation.initial_snapshot());
    report.impact = Some(impact_metrics(&last));
    report.crisis_level = classify_crisis(&last.activations);
    report.final_snapshot = Some(last);
    report.scars = ledger.scars().to_vec();
    report.captures = captures;
    report.history = history.to_vec();
    report.halted = halted;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use anamnesis_events::CrisisLevel;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_report_before_any_tick() {
        let config = Config::default();
        let sim = Simulation::from_config(&config).unwrap();
        let ledger = ScarLedger::new(0.05);
        let history = MetricsHistory::new(10);

        let report = build_report(
            42,
            &config.display_configs(),
            &sim,
            &ledger,
            &history,
            Vec::new(),
            None,
        );
        assert_eq!(report.ticks_run, 0);
        assert_eq!(report.agents.len(), 4);
        assert_eq!(report.agents[3].name, "Visionary");
        assert_eq!(report.crisis_level, CrisisLevel::Stable);
        assert_eq!(report.impact.as_ref().map(|i| i.scar_strength), Some(0.0));
    }

    #[test]
    fn test_report_after_run() {
        let config = Config::default();
        let mut sim = Simulation::from_config(&config).unwrap();
        let mut ledger = ScarLedger::new(config.simulation.scar_tolerance);
        let mut history = MetricsHistory::new(20);
        let mut rng = SmallRng::seed_from_u64(config.simulation.seed);
        sim.run_with(50, &mut rng, |snap| {
            ledger.observe(snap);
            history.record(snap);
        })
        .unwrap();

        let report = build_report(
            7,
            &config.display_configs(),
            &sim,
            &ledger,
            &history,
            Vec::new(),
            None,
        );
        assert_eq!(report.ticks_run, 50);
        assert_eq!(report.final_snapshot.as_ref().map(|s| s.tick), Some(50));
        assert!(report.halted.is_none());
        assert_eq!(report.history.len(), 20);
        assert_eq!(report.history.first().map(|e| e.tick), Some(31));
        assert_eq!(report.history.last().map(|e| e.tick), Some(50));
    }
}
