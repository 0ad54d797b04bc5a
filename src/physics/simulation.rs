use tracing::info;

use crate::error::{SimulationError, Trajectory};
use crate::physics::derivative::integrate;
use crate::physics::kinematics::distal_position;
use crate::physics::parameters::SimulationParameters;
use crate::physics::state::PendulumState;

/// Reference and perturbed pendulums, always advanced in lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySet {
    reference: PendulumState,
    perturbed: PendulumState,
}

impl Default for TrajectorySet {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectorySet {
    pub fn new() -> Self {
        Self {
            reference: PendulumState::initial(),
            perturbed: PendulumState::perturbed(),
        }
    }

    /// Explicit initial conditions, e.g. for experiments away from the canonical start.
    pub fn from_states(reference: PendulumState, perturbed: PendulumState) -> Self {
        Self { reference, perturbed }
    }

    pub fn reference(&self) -> &PendulumState {
        &self.reference
    }

    pub fn perturbed(&self) -> &PendulumState {
        &self.perturbed
    }

    /// Advances both trajectories by `dt·speed`, split into `round(accuracy)` substeps.
    ///
    /// Both states see identical step sizes and parameters; only their
    /// initial conditions differ.
    pub fn step(&mut self, params: &SimulationParameters) {
        let substeps = params.substeps();
        let h = params.effective_dt() / f64::from(substeps);

        let mut reference = self.reference;
        let mut perturbed = self.perturbed;
        for _ in 0..substeps {
            reference = integrate(&reference, h, params);
            perturbed = integrate(&perturbed, h, params);
        }
        self.reference = reference;
        self.perturbed = perturbed;
    }

    /// Back to both rods horizontal at rest, perturbed θ1 offset by 0.001 rad.
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("trajectories reset to initial conditions");
    }

    /// Caller-side check; the first non-finite trajectory is reported.
    pub fn ensure_finite(&self) -> Result<(), SimulationError> {
        if !self.reference.is_finite() {
            return Err(SimulationError::NonFinite { trajectory: Trajectory::Reference });
        }
        if !self.perturbed.is_finite() {
            return Err(SimulationError::NonFinite { trajectory: Trajectory::Perturbed });
        }
        Ok(())
    }
}

/// Euclidean distance between the distal bobs of the two trajectories.
///
/// Holds no history; recompute every tick.
pub struct DivergenceMonitor;

impl DivergenceMonitor {
    pub fn compute(set: &TrajectorySet, params: &SimulationParameters) -> f64 {
        let a = distal_position(set.reference(), params);
        let b = distal_position(set.perturbed(), params);
        a.distance(b)
    }
}
