//! Agent Components
//!
//! Physics configuration consumed by the engine, kept apart from the display
//! fields only collaborators care about.

use anamnesis_events::AgentLabel;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fixed physics parameters of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Stress threshold above which plasticity engages
    pub tc: f64,
    /// Plasticity gain
    pub alpha: f64,
    /// Oscillator frequency (radians per tick)
    pub freq: f64,
}

impl AgentConfig {
    pub fn new(tc: f64, alpha: f64, freq: f64) -> Self {
        Self { tc, alpha, freq }
    }
}

/// Presentation-only attributes. Never read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub name: String,
    pub color: String,
}

impl DisplayConfig {
    pub fn label(&self) -> AgentLabel {
        AgentLabel::new(self.name.clone(), self.color.clone())
    }
}

/// One `[[agents]]` entry of a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub tc: f64,
    pub alpha: f64,
    pub freq: f64,
    pub position: [f64; 3],
}

fn default_color() -> String {
    "#ffffff".to_string()
}

impl AgentSpec {
    pub fn new(name: &str, color: &str, tc: f64, alpha: f64, freq: f64, position: [f64; 3]) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            tc,
            alpha,
            freq,
            position,
        }
    }

    pub fn physics(&self) -> AgentConfig {
        AgentConfig::new(self.tc, self.alpha, self.freq)
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            name: self.name.clone(),
            color: self.color.clone(),
        }
    }

    pub fn initial_position(&self) -> DVec3 {
        DVec3::from_array(self.position)
    }

    /// Every physics field must be finite; `index` names the entry in errors.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let fields = [("agents.tc", self.tc), ("agents.alpha", self.alpha), ("agents.freq", self.freq)];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::invalid(
                    name,
                    format!("agent {} ({}) has non-finite value {}", index, self.name, value),
                ));
            }
        }
        if self.position.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::invalid(
                "agents.position",
                format!("agent {} ({}) has a non-finite coordinate", index, self.name),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_splits_physics_and_display() {
        let spec = AgentSpec::new("Scout", "#55ff55", 1.5, 0.8, 0.11, [-1.8, 1.8, -1.8]);

        assert_eq!(spec.physics(), AgentConfig::new(1.5, 0.8, 0.11));
        assert_eq!(spec.display().name, "Scout");
        assert_eq!(spec.display().label().color, "#55ff55");
        assert_eq!(spec.initial_position(), DVec3::new(-1.8, 1.8, -1.8));
    }

    #[test]
    fn test_validate_flags_nan_threshold() {
        let mut spec = AgentSpec::new("Scout", "#55ff55", 1.5, 0.8, 0.11, [0.0; 3]);
        assert!(spec.validate(0).is_ok());

        spec.tc = f64::NAN;
        assert!(matches!(
            spec.validate(2),
            Err(ConfigError::InvalidParameter { name: "agents.tc", .. })
        ));
    }
}
