//! ANAMNESIS
//!
//! Headless runner: loads a scenario, ticks the engine and writes a JSON
//! report of the scars the run left behind.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use anamnesis_core::output::{build_report, CaptureRecorder, CrisisMonitor, MetricsHistory, ScarLedger};
use anamnesis_core::{Config, ConfigError, Preset, SimRng, Simulation, StressPolicy};

/// Command line arguments for the engine
#[derive(Parser, Debug)]
#[command(name = "anamnesis")]
#[command(about = "Agents that remember: stress, memory and geometry")]
struct Args {
    /// Scenario file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in agent roster, used when no scenario file is given
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario's stress policy
    #[arg(long, value_enum)]
    stress: Option<StressKind>,

    /// Tick of the trauma pulse
    #[arg(long, default_value_t = 100)]
    trauma_tick: u64,

    /// Strength of the trauma pulse
    #[arg(long, default_value_t = 5.0)]
    intensity: f64,

    /// Disable Gaussian stress noise
    #[arg(long)]
    no_noise: bool,

    /// Write the run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Ticks between progress lines (0 disables)
    #[arg(long, default_value_t = 500)]
    log_interval: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StressKind {
    None,
    Periodic,
    Trauma,
}

/// The engine being driven and where it stops
#[derive(Resource)]
struct SimulationRun {
    sim: Simulation,
    max_ticks: u64,
}

#[derive(Resource, Default)]
struct RunStatus {
    /// A tick was committed during this schedule pass
    advanced: bool,
    finished: bool,
    halted: Option<String>,
}

#[derive(Resource)]
struct LogSettings {
    interval: u64,
}

fn resolve_config(args: &Args) -> Result<Config, ConfigError> {
    let mut config = match (&args.config, args.preset) {
        (Some(path), _) => Config::load(path)?,
        (None, Some(preset)) => Config::from_preset(preset),
        (None, None) => Config::load_or_default(),
    };

    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.simulation.ticks = ticks;
    }
    if args.no_noise {
        config.params.noise.enabled = false;
    }

    let target = config
        .stress
        .target()
        .unwrap_or(config.agents.len().saturating_sub(1));
    match args.stress {
        Some(StressKind::None) => config.stress = StressPolicy::None,
        Some(StressKind::Periodic) => {
            if !matches!(config.stress, StressPolicy::Periodic { .. }) {
                config.stress = StressPolicy::periodic_default().with_target(target);
            }
        }
        Some(StressKind::Trauma) => {
            config.stress = StressPolicy::Trauma {
                target,
                tick: args.trauma_tick,
                intensity: args.intensity,
            }
        }
        None => {}
    }

    config.validate()?;
    Ok(config)
}

fn advance_simulation(
    mut run: ResMut<SimulationRun>,
    mut rng: ResMut<SimRng>,
    mut status: ResMut<RunStatus>,
) {
    status.advanced = false;
    if run.sim.tick() >= run.max_ticks {
        status.finished = true;
        return;
    }
    match run.sim.advance(&mut rng.0).map(|snapshot| snapshot.tick) {
        Ok(tick) => {
            status.advanced = true;
            status.finished = tick >= run.max_ticks;
        }
        Err(e) => {
            error!("Run halted: {}", e);
            status.halted = Some(e.to_string());
            status.finished = true;
        }
    }
}

fn tick_advanced(status: Res<RunStatus>) -> bool {
    status.advanced
}

fn record_metrics(
    run: Res<SimulationRun>,
    mut history: ResMut<MetricsHistory>,
    mut monitor: ResMut<CrisisMonitor>,
    mut captures: ResMut<CaptureRecorder>,
) {
    let Some(snapshot) = run.sim.latest() else {
        return;
    };
    history.record(snapshot);
    monitor.observe(snapshot);
    captures.observe(snapshot);
}

fn detect_scars(run: Res<SimulationRun>, mut ledger: ResMut<ScarLedger>) {
    if let Some(snapshot) = run.sim.latest() {
        ledger.observe(snapshot);
    }
}

fn log_progress(
    run: Res<SimulationRun>,
    settings: Res<LogSettings>,
    monitor: Res<CrisisMonitor>,
    ledger: Res<ScarLedger>,
) {
    let Some(snapshot) = run.sim.latest() else {
        return;
    };
    if settings.interval == 0 || snapshot.tick % settings.interval != 0 {
        return;
    }
    info!(
        tick = snapshot.tick,
        crisis = %monitor.level(),
        scars = ledger.scars().len(),
        "diversity {:.3}, total memory {:.3}",
        snapshot.mean_diversity(),
        snapshot.total_memory()
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::from(2);
        }
    };
    let sim = match Simulation::from_config(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Could not start simulation: {}", e);
            return ExitCode::from(2);
        }
    };

    println!("ANAMNESIS");
    println!("=========");
    println!("Seed: {}", config.simulation.seed);
    println!("Ticks: {}", config.simulation.ticks);
    println!("Agents: {}", config.agents.len());
    println!("Stress: {:?}", config.stress);
    println!("Noise: {}", if config.params.noise.enabled { "on" } else { "off" });
    println!();

    let mut world = World::new();
    world.insert_resource(SimRng(SmallRng::seed_from_u64(config.simulation.seed)));
    world.insert_resource(SimulationRun {
        sim,
        max_ticks: config.simulation.ticks,
    });
    world.insert_resource(RunStatus::default());
    world.insert_resource(LogSettings {
        interval: args.log_interval,
    });
    world.insert_resource(MetricsHistory::new(config.simulation.history_window));
    world.insert_resource(ScarLedger::new(config.simulation.scar_tolerance));
    world.insert_resource(CrisisMonitor::new());
    world.insert_resource(CaptureRecorder::for_policy(&config.stress));

    // Observers also see the starting state, so a trauma at tick 0 still
    // gets its "before" capture
    let initial = world.resource::<SimulationRun>().sim.initial_snapshot();
    world.resource_mut::<MetricsHistory>().record(&initial);
    world.resource_mut::<ScarLedger>().observe(&initial);
    world.resource_mut::<CaptureRecorder>().observe(&initial);

    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            advance_simulation,
            (record_metrics, detect_scars, log_progress)
                .chain()
                .run_if(tick_advanced),
        )
            .chain(),
    );

    while !world.resource::<RunStatus>().finished {
        schedule.run(&mut world);
    }

    let halted = world.resource::<RunStatus>().halted.clone();
    let captures = world.resource::<CaptureRecorder>().captures().to_vec();
    let report = build_report(
        config.simulation.seed,
        &config.display_configs(),
        &world.resource::<SimulationRun>().sim,
        world.resource::<ScarLedger>(),
        world.resource::<MetricsHistory>(),
        captures,
        halted.clone(),
    );

    println!();
    println!("Run {} finished after {} ticks", report.run_id, report.ticks_run);
    println!("Crisis level: {}", report.crisis_level);
    println!("Peak crisis level: {}", world.resource::<CrisisMonitor>().peak());
    if let Some(impact) = &report.impact {
        println!("Scar strength: {:.4}", impact.scar_strength);
        println!("Total memory: {:.4}", impact.total_memory);
        println!("Recovery: {}", impact.recovery);
        println!("Resilience: {:.1}%", impact.resilience_pct);
    }
    if let (Some(first), Some(last)) = (report.history.first(), report.history.last()) {
        println!(
            "History: ticks {}..={}, total memory {:.4} -> {:.4}",
            first.tick, last.tick, first.total_memory, last.total_memory
        );
    }
    println!("Scars recorded: {}", report.scars.len());
    for scar in &report.scars {
        let holder = &report.agents[scar.holder].name;
        let subject = &report.agents[scar.subject].name;
        println!(
            "  {} -> {}: formed at tick {}, peak {:.4}",
            holder, subject, scar.formed_at_tick, scar.peak_magnitude
        );
    }

    if let Some(path) = &args.report {
        match report.to_json_pretty() {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => println!("Report written to {}", path.display()),
                Err(e) => eprintln!("Warning: Could not write report: {}", e),
            },
            Err(e) => eprintln!("Warning: Could not serialize report: {}", e),
        }
    }

    match halted {
        Some(reason) => {
            eprintln!("Halted: {}", reason);
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
