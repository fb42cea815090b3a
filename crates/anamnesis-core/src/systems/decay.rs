//! Adaptive forgetting: maps diversity to a memory time-constant.

use crate::config::SimParams;

/// `tau_min + (tau_max - tau_min) * diversity^gamma`.
///
/// Low diversity forgets fast; high diversity consolidates.
#[inline]
pub fn adaptive_tau(diversity: f64, params: &SimParams) -> f64 {
    params.tau_min + (params.tau_max - params.tau_min) * diversity.powf(params.gamma)
}
