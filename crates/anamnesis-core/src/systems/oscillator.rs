//! Oscillator phases. Depend only on the frame and each agent's frequency.

use crate::components::AgentConfig;

/// Phase in [0, 1] of an oscillator with `freq` at `frame`.
#[inline]
pub fn phase_at(frame: u64, freq: f64) -> f64 {
    ((frame as f64 * freq).sin() + 1.0) / 2.0
}

pub fn update_phases(frame: u64, agents: &[AgentConfig]) -> Vec<f64> {
    agents.iter().map(|a| phase_at(frame, a.freq)).collect()
}

/// Alignment of two phases, 1.0 when equal.
#[inline]
pub fn phase_sync(a: f64, b: f64) -> f64 {
    1.0 - (a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_starts_at_midpoint() {
        assert_eq!(phase_at(0, 0.14), 0.5);
    }

    #[test]
    fn test_phase_bounds() {
        for frame in 0..2000 {
            let p = phase_at(frame, 0.11);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_phase_sync_symmetric() {
        assert_eq!(phase_sync(0.2, 0.7), phase_sync(0.7, 0.2));
        assert_eq!(phase_sync(0.4, 0.4), 1.0);
        assert_eq!(phase_sync(0.0, 1.0), 0.0);
    }
}
