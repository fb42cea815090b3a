//! Damped explicit Euler. Friction is the only stabilizer.

use glam::DVec3;

use crate::config::SimParams;

/// Returns `(positions, velocities)` after one tick.
pub fn integrate(
    positions: &[DVec3],
    velocities: &[DVec3],
    forces: &[DVec3],
    params: &SimParams,
) -> (Vec<DVec3>, Vec<DVec3>) {
    let damping = 1.0 - params.friction;
    let velocities: Vec<DVec3> = velocities
        .iter()
        .zip(forces)
        .map(|(v, f)| *v * damping + *f * params.dt)
        .collect();
    let positions = positions
        .iter()
        .zip(&velocities)
        .map(|(p, v)| *p + *v * params.dt)
        .collect();
    (positions, velocities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_uses_new_velocity() {
        let params = SimParams::default();
        let (pos, vel) = integrate(&[DVec3::ZERO], &[DVec3::ZERO], &[DVec3::new(2.0, 0.0, 0.0)], &params);
        assert_eq!(vel[0], DVec3::new(0.1, 0.0, 0.0));
        assert!((pos[0].x - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_friction_damps_free_motion() {
        let params = SimParams::default();
        let mut velocities = vec![DVec3::new(1.0, -1.0, 0.5)];
        let mut positions = vec![DVec3::ZERO];
        for _ in 0..200 {
            let (p, v) = integrate(&positions, &velocities, &[DVec3::ZERO], &params);
            positions = p;
            velocities = v;
        }
        assert!(velocities[0].length() < 1e-12);
        assert!(positions[0].is_finite());
    }
}
