use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Offset applied to θ1 of the perturbed trajectory at creation/reset (rad).
pub const PERTURBATION: f64 = 0.001;

/// Angles from vertical (rad) and angular velocities (rad/s) of both rods.
///
/// The same type doubles as its own time-derivative when fed through the solver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PendulumState {
    pub theta1: f64,
    pub theta2: f64,
    pub omega1: f64,
    pub omega2: f64,
}

impl PendulumState {
    pub const fn new(theta1: f64, theta2: f64, omega1: f64, omega2: f64) -> Self {
        Self { theta1, theta2, omega1, omega2 }
    }

    /// Both rods horizontal, at rest.
    pub const fn initial() -> Self {
        Self::new(FRAC_PI_2, FRAC_PI_2, 0.0, 0.0)
    }

    /// [`initial`](Self::initial) with θ1 nudged by [`PERTURBATION`].
    pub const fn perturbed() -> Self {
        Self::new(FRAC_PI_2 + PERTURBATION, FRAC_PI_2, 0.0, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.theta1.is_finite()
            && self.theta2.is_finite()
            && self.omega1.is_finite()
            && self.omega2.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perturbed_differs_only_in_theta1() {
        let r = PendulumState::initial();
        let p = PendulumState::perturbed();
        assert!((p.theta1 - r.theta1 - PERTURBATION).abs() < 1e-15);
        assert_eq!(p.theta2, r.theta2);
        assert_eq!(p.omega1, 0.0);
        assert_eq!(p.omega2, 0.0);
    }

    #[test]
    fn finiteness_check_sees_every_field() {
        assert!(PendulumState::initial().is_finite());
        assert!(!PendulumState::new(0.0, 0.0, 0.0, f64::INFINITY).is_finite());
        assert!(!PendulumState::new(f64::NAN, 0.0, 0.0, 0.0).is_finite());
    }
}
