//! Configuration System
//!
//! Loads scenario and tuning parameters from a TOML file. Every field has a
//! default, so a file only needs to name what it changes.

use std::fs;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::components::agent::{AgentConfig, AgentSpec, DisplayConfig};
use crate::error::ConfigError;
use crate::stress::StressPolicy;

/// Default scenario file path
pub const DEFAULT_SCENARIO_PATH: &str = "anamnesis.toml";

/// Scale applied to the tetrahedral starting layout
pub const LAYOUT_SCALE: f64 = 1.8;

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub params: SimParams,
    #[serde(default)]
    pub stress: StressPolicy,
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentSpec>,
}

/// Run-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub ticks: u64,
    pub seed: u64,
    /// Ticks of metric history kept for dashboards
    pub history_window: usize,
    /// Memory level at which a directed entry is recorded as a scar
    pub scar_tolerance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 10_000,
            seed: 42,
            history_window: 200,
            scar_tolerance: 0.05,
        }
    }
}

/// Numeric parameters of the update rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Integration timestep
    pub dt: f64,
    /// Short-term affect decay constant for activations
    pub tau_decay: f64,
    /// Memory learning rate
    pub eta: f64,
    /// Forgetting time-constant at zero diversity
    pub tau_min: f64,
    /// Forgetting time-constant at full diversity
    pub tau_max: f64,
    /// Steepness of the diversity-to-tau curve
    pub gamma: f64,
    /// Memory attraction gain
    pub lambda_c: f64,
    /// Linear spring constant
    pub kappa: f64,
    /// Cubic barrier gain
    pub mu: f64,
    /// Fraction of velocity lost per tick
    pub friction: f64,
    /// Scale on the incoming-coupling stress term
    pub coupling_gain: f64,
    /// Activation a neighbour needs before it transmits stress
    pub contagion_threshold: f64,
    /// Added to d² in the proximity factor
    pub proximity_softening: f64,
    pub noise: NoiseConfig,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt: 0.05,
            tau_decay: 15.0,
            eta: 0.1,
            tau_min: 100.0,
            tau_max: 2000.0,
            gamma: 2.5,
            lambda_c: 1.2,
            kappa: 0.5,
            mu: 5.0,
            friction: 0.15,
            coupling_gain: 0.1,
            contagion_threshold: 0.5,
            proximity_softening: 0.5,
            noise: NoiseConfig::default(),
        }
    }
}

impl SimParams {
    /// Same parameters with the stress noise switched off.
    pub fn without_noise(mut self) -> Self {
        self.noise.enabled = false;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("dt", self.dt),
            ("tau_decay", self.tau_decay),
            ("eta", self.eta),
            ("tau_min", self.tau_min),
            ("tau_max", self.tau_max),
            ("gamma", self.gamma),
            ("lambda_c", self.lambda_c),
            ("kappa", self.kappa),
            ("mu", self.mu),
            ("friction", self.friction),
            ("coupling_gain", self.coupling_gain),
            ("contagion_threshold", self.contagion_threshold),
            ("proximity_softening", self.proximity_softening),
            ("noise.mean", self.noise.mean),
            ("noise.std_dev", self.noise.std_dev),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, format!("{} is not finite", value)));
            }
        }

        if self.dt <= 0.0 {
            return Err(ConfigError::invalid("dt", "must be positive"));
        }
        if self.tau_decay <= 0.0 {
            return Err(ConfigError::invalid("tau_decay", "must be positive"));
        }
        if self.tau_min <= 0.0 {
            return Err(ConfigError::invalid("tau_min", "must be positive"));
        }
        if self.tau_max < self.tau_min {
            return Err(ConfigError::invalid(
                "tau_max",
                format!("{} is below tau_min {}", self.tau_max, self.tau_min),
            ));
        }
        if self.gamma <= 0.0 {
            return Err(ConfigError::invalid("gamma", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::invalid("friction", "must lie in [0, 1]"));
        }
        if self.proximity_softening <= 0.0 {
            return Err(ConfigError::invalid("proximity_softening", "must be positive"));
        }
        if self.noise.std_dev < 0.0 {
            return Err(ConfigError::invalid("noise.std_dev", "must not be negative"));
        }
        Ok(())
    }
}

/// Gaussian perturbation added to every agent's stress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub enabled: bool,
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mean: 0.1,
            std_dev: 0.05,
        }
    }
}

/// Built-in agent rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Machine, Conscience, Adaptive, Visionary
    #[default]
    Anamnesis,
    /// Warrior, Diplomat, Scout, Leader
    Npc,
}

/// Regular tetrahedron vertices scaled by [`LAYOUT_SCALE`].
pub fn tetrahedron_layout() -> [[f64; 3]; 4] {
    let s = LAYOUT_SCALE;
    [[s, s, s], [s, -s, -s], [-s, s, -s], [-s, -s, s]]
}

impl Preset {
    pub fn agents(&self) -> Vec<AgentSpec> {
        let [a, b, c, d] = tetrahedron_layout();
        match self {
            Preset::Anamnesis => vec![
                AgentSpec::new("Machine", "#00ffff", 5.0, 0.1, 0.05, a),
                AgentSpec::new("Conscience", "#ffaa00", 1.0, 0.7, 0.08, b),
                AgentSpec::new("Adaptive", "#55ff55", 1.2, 0.9, 0.11, c),
                AgentSpec::new("Visionary", "#ff00ff", 0.6, 1.3, 0.14, d),
            ],
            Preset::Npc => vec![
                AgentSpec::new("Warrior", "#00ffff", 4.0, 0.0, 0.05, a),
                AgentSpec::new("Diplomat", "#ffaa00", 0.8, 0.6, 0.08, b),
                AgentSpec::new("Scout", "#55ff55", 1.5, 0.8, 0.11, c),
                AgentSpec::new("Leader", "#ff00ff", 0.5, 1.2, 0.14, d),
            ],
        }
    }
}

fn default_agents() -> Vec<AgentSpec> {
    Preset::default().agents()
}

impl Default for Config {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl Config {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            simulation: SimulationConfig::default(),
            params: SimParams::default(),
            stress: StressPolicy::default(),
            agents: preset.agents(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        if !Path::new(DEFAULT_SCENARIO_PATH).exists() {
            tracing::debug!("{} not found, using defaults", DEFAULT_SCENARIO_PATH);
            return Self::default();
        }
        Self::load(DEFAULT_SCENARIO_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_SCENARIO_PATH, e);
            Self::default()
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.len() < 2 {
            return Err(ConfigError::TooFewAgents {
                count: self.agents.len(),
            });
        }
        if self.simulation.history_window == 0 {
            return Err(ConfigError::invalid("history_window", "must be at least 1"));
        }
        for (i, agent) in self.agents.iter().enumerate() {
            agent.validate(i)?;
        }
        self.stress.validate(self.agents.len())?;
        self.params.validate()
    }

    pub fn agent_configs(&self) -> Vec<AgentConfig> {
        self.agents.iter().map(AgentSpec::physics).collect()
    }

    pub fn display_configs(&self) -> Vec<DisplayConfig> {
        self.agents.iter().map(AgentSpec::display).collect()
    }

    pub fn initial_positions(&self) -> Vec<DVec3> {
        self.agents.iter().map(AgentSpec::initial_position).collect()
    }
}
