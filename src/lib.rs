//! Double-pendulum chaos sandbox: two trajectories started 0.001 rad apart,
//! integrated in lockstep with RK4, with their distal-bob divergence and trails.

pub mod basic_structs;
pub mod config;
pub mod error;
pub mod physics;
pub mod sim_loop;
pub mod solver;
pub mod trace;

pub use basic_structs::Vector2D;
pub use config::ConfigStore;
pub use error::{ConfigError, SimulationError, Trajectory};
pub use physics::kinematics::CartesianPose;
pub use physics::parameters::{ParameterRange, SimulationParameters, PARAMETER_RANGES};
pub use physics::simulation::{DivergenceMonitor, TrajectorySet};
pub use physics::state::{PendulumState, PERTURBATION};
pub use sim_loop::{
    DivergenceLevel, FrameOutcome, FrameSink, ParameterSource, RenderSnapshot, RunState, SimulationLoop,
};
pub use trace::{TraceBuffer, TRACE_CAPACITY};
