use crate::basic_structs::Vector2D;
use crate::physics::parameters::SimulationParameters;
use crate::physics::state::PendulumState;

/// Bob positions and velocities relative to the fixed pivot, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianPose {
    pub bob1: Vector2D,
    pub bob2: Vector2D,
    pub velocity1: Vector2D,
    pub velocity2: Vector2D,
}

impl CartesianPose {
    pub fn from_state(state: &PendulumState, params: &SimulationParameters) -> Self {
        let (s1, c1) = state.theta1.sin_cos();
        let (s2, c2) = state.theta2.sin_cos();

        let bob1 = Vector2D::new(params.l1 * s1, params.l1 * c1);
        let bob2 = bob1 + Vector2D::new(params.l2 * s2, params.l2 * c2);

        // d/dt of the positions above
        let velocity1 = Vector2D::new(params.l1 * state.omega1 * c1, -params.l1 * state.omega1 * s1);
        let velocity2 = velocity1 + Vector2D::new(params.l2 * state.omega2 * c2, -params.l2 * state.omega2 * s2);

        Self { bob1, bob2, velocity1, velocity2 }
    }
}

/// Distal bob position only; what trails and divergence need.
pub fn distal_position(state: &PendulumState, params: &SimulationParameters) -> Vector2D {
    CartesianPose::from_state(state, params).bob2
}
