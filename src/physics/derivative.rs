use crate::physics::parameters::SimulationParameters;
use crate::physics::state::PendulumState;
use crate::solver::{rk4_step, OdeSystem, VectorSpace};

impl VectorSpace for PendulumState {
    fn add(&self, other: &Self) -> Self {
        Self {
            theta1: self.theta1 + other.theta1,
            theta2: self.theta2 + other.theta2,
            omega1: self.omega1 + other.omega1,
            omega2: self.omega2 + other.omega2,
        }
    }

    fn scale(&self, scalar: f64) -> Self {
        Self {
            theta1: self.theta1 * scalar,
            theta2: self.theta2 * scalar,
            omega1: self.omega1 * scalar,
            omega2: self.omega2 * scalar,
        }
    }
}

// The double pendulum is autonomous; t is ignored.
impl OdeSystem<PendulumState> for SimulationParameters {
    fn derivatives(&self, _t: f64, state: &PendulumState) -> PendulumState {
        derivative(state, self)
    }
}

/// Equations of motion of a frictionless two-link pendulum with point masses.
///
/// Returns `(dθ1, dθ2, dω1, dω2)` packed as a [`PendulumState`]. The shared
/// denominator `2·m1 + m2 − m2·cos(2θ1 − 2θ2)` is not guarded: near its zero the
/// result is huge or non-finite and is handed back as-is.
pub fn derivative(state: &PendulumState, params: &SimulationParameters) -> PendulumState {
    let PendulumState { theta1, theta2, omega1, omega2 } = *state;
    let SimulationParameters { m1, m2, l1, l2, g, .. } = *params;

    let delta = theta1 - theta2;
    let mass_term = 2.0 * m1 + m2 - m2 * (2.0 * theta1 - 2.0 * theta2).cos();

    let num1 = -g * (2.0 * m1 + m2) * theta1.sin();
    let num2 = -m2 * g * (theta1 - 2.0 * theta2).sin();
    let num3 = -2.0 * delta.sin() * m2 * (omega2 * omega2 * l2 + omega1 * omega1 * l1 * delta.cos());
    let domega1 = (num1 + num2 + num3) / (l1 * mass_term);

    let num4 = 2.0 * delta.sin();
    let num5 = omega1 * omega1 * l1 * (m1 + m2);
    let num6 = g * (m1 + m2) * theta1.cos();
    let num7 = omega2 * omega2 * l2 * m2 * delta.cos();
    let domega2 = num4 * (num5 + num6 + num7) / (l2 * mass_term);

    PendulumState {
        theta1: omega1,
        theta2: omega2,
        omega1: domega1,
        omega2: domega2,
    }
}

/// One RK4 step of the pendulum, `dt` long.
pub fn integrate(state: &PendulumState, dt: f64, params: &SimulationParameters) -> PendulumState {
    rk4_step(params, 0.0, state, dt)
}
