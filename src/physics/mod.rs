pub mod derivative;
pub mod kinematics;
pub mod parameters;
pub mod simulation;
pub mod state;
