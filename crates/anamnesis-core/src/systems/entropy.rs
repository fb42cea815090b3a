//! Diversity measure: normalized Shannon entropy of a resonance vector.

/// Total resonance below which an agent is treated as receiving no signal.
pub const SIGNAL_FLOOR: f64 = 1e-6;

/// Normalized entropy of `resonances` in [0, 1].
///
/// No signal reads as full diversity (1.0). A single non-zero entry is total
/// fixation (0.0). Otherwise the entropy is divided by `ln(len)`, where `len`
/// includes the agent's own always-zero slot, so a perfectly even spread over
/// the other `N - 1` agents scores `ln(N - 1) / ln(N)` rather than 1.0.
pub fn diversity(resonances: &[f64]) -> f64 {
    let total: f64 = resonances.iter().sum();
    if total < SIGNAL_FLOOR {
        return 1.0;
    }

    let probs: Vec<f64> = resonances
        .iter()
        .map(|r| r / total)
        .filter(|p| *p > 0.0)
        .collect();
    if probs.len() <= 1 {
        return 0.0;
    }

    let entropy: f64 = -probs.iter().map(|p| p * p.ln()).sum::<f64>();
    let max_entropy = (resonances.len() as f64).ln();
    (entropy / max_entropy).clamp(0.0, 1.0)
}
