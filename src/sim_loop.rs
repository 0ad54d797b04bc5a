//! Frame-driven scheduler tying trajectories, divergence and trails together.
//!
//! The loop owns all mutable simulation state. A [`ParameterSource`] supplies
//! one parameter snapshot per tick and a configuration epoch; a [`FrameSink`]
//! receives a [`RenderSnapshot`] after every tick.

use tracing::{debug, info, warn};

use crate::basic_structs::Vector2D;
use crate::physics::kinematics::distal_position;
use crate::physics::parameters::SimulationParameters;
use crate::physics::simulation::{DivergenceMonitor, TrajectorySet};
use crate::physics::state::PendulumState;
use crate::trace::TraceBuffer;

/// Divergence above which the readout turns critical.
pub const CRITICAL_DIVERGENCE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// What a call to [`SimulationLoop::on_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A tick ran and a snapshot was handed to the sink.
    Rendered,
    /// Paused: nothing stepped, nothing drawn.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceLevel {
    Stable,
    Critical,
}

impl DivergenceLevel {
    pub fn classify(divergence: f64) -> Self {
        if divergence > CRITICAL_DIVERGENCE { Self::Critical } else { Self::Stable }
    }
}

/// Fill fraction in `[0, 1]` of the divergence gauge; full at 500.
pub fn gauge_fraction(divergence: f64) -> f64 {
    (divergence / 5.0).clamp(0.0, 100.0) / 100.0
}

/// Everything the drawing collaborator needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub params: SimulationParameters,
    pub reference: PendulumState,
    pub perturbed: PendulumState,
    pub reference_trace: Vec<Vector2D>,
    pub perturbed_trace: Vec<Vector2D>,
    pub divergence: f64,
    pub elapsed: f64,
    pub ticks: u64,
}

impl RenderSnapshot {
    pub fn level(&self) -> DivergenceLevel {
        DivergenceLevel::classify(self.divergence)
    }

    /// False once either trajectory went non-finite.
    pub fn is_valid(&self) -> bool {
        self.reference.is_finite() && self.perturbed.is_finite()
    }
}

/// External drawing collaborator.
pub trait FrameSink {
    fn draw(&mut self, snapshot: &RenderSnapshot);

    /// Wipe the output surface (called on reset).
    fn clear(&mut self);
}

/// External configuration collaborator.
pub trait ParameterSource {
    /// Complete parameter set, copied out so it cannot change mid-tick.
    fn snapshot(&self) -> SimulationParameters;

    /// Monotonic counter; any change is treated as a reset request.
    fn epoch(&self) -> u64;
}

pub struct SimulationLoop {
    run_state: RunState,
    params: SimulationParameters,
    trajectories: TrajectorySet,
    reference_trace: TraceBuffer,
    perturbed_trace: TraceBuffer,
    divergence: f64,
    elapsed: f64,
    ticks: u64,
    last_epoch: u64,
    reported_invalid: bool,
}

impl SimulationLoop {
    pub fn new(params: &SimulationParameters, epoch: u64) -> Self {
        Self {
            run_state: RunState::Running,
            params: *params,
            trajectories: TrajectorySet::new(),
            reference_trace: TraceBuffer::default(),
            perturbed_trace: TraceBuffer::default(),
            divergence: 0.0,
            elapsed: 0.0,
            ticks: 0,
            last_epoch: epoch,
            reported_invalid: false,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// True while running: the harness should request another frame.
    pub fn wants_next_frame(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn toggle_run_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        info!(state = ?self.run_state, "run state toggled");
    }

    /// Restores initial conditions and empties the trails; run state is kept.
    pub fn reset<R: FrameSink + ?Sized>(&mut self, sink: &mut R) {
        self.trajectories.reset();
        self.reference_trace.clear();
        self.perturbed_trace.clear();
        self.divergence = 0.0;
        self.elapsed = 0.0;
        self.ticks = 0;
        self.reported_invalid = false;
        sink.clear();
    }

    /// Frame callback: honour epoch changes, then tick if running.
    pub fn on_frame<C, R>(&mut self, source: &C, sink: &mut R) -> FrameOutcome
    where
        C: ParameterSource + ?Sized,
        R: FrameSink + ?Sized,
    {
        let epoch = source.epoch();
        if epoch != self.last_epoch {
            debug!(from = self.last_epoch, to = epoch, "configuration epoch changed");
            self.last_epoch = epoch;
            self.reset(sink);
        }

        if self.run_state == RunState::Paused {
            return FrameOutcome::Idle;
        }

        let params = source.snapshot();
        self.tick(&params);
        sink.draw(&self.snapshot());
        FrameOutcome::Rendered
    }

    /// One tick: step both trajectories, then divergence, then trails.
    pub fn tick(&mut self, params: &SimulationParameters) {
        self.params = *params;
        self.trajectories.step(params);
        self.divergence = DivergenceMonitor::compute(&self.trajectories, params);

        self.reference_trace.push(distal_position(self.trajectories.reference(), params));
        self.perturbed_trace.push(distal_position(self.trajectories.perturbed(), params));

        self.elapsed += params.effective_dt();
        self.ticks += 1;

        if !self.reported_invalid {
            if let Err(err) = self.trajectories.ensure_finite() {
                warn!(tick = self.ticks, "{err}");
                self.reported_invalid = true;
            }
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            params: self.params,
            reference: *self.trajectories.reference(),
            perturbed: *self.trajectories.perturbed(),
            reference_trace: self.reference_trace.to_vec(),
            perturbed_trace: self.perturbed_trace.to_vec(),
            divergence: self.divergence,
            elapsed: self.elapsed,
            ticks: self.ticks,
        }
    }

    pub fn trajectories(&self) -> &TrajectorySet {
        &self.trajectories
    }

    pub fn reference_trace(&self) -> &TraceBuffer {
        &self.reference_trace
    }

    pub fn perturbed_trace(&self) -> &TraceBuffer {
        &self.perturbed_trace
    }

    pub fn divergence(&self) -> f64 {
        self.divergence
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<RenderSnapshot>,
        clears: usize,
    }

    impl FrameSink for RecordingSink {
        fn draw(&mut self, snapshot: &RenderSnapshot) {
            self.frames.push(snapshot.clone());
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    struct FixedSource {
        params: SimulationParameters,
        epoch: Cell<u64>,
    }

    impl FixedSource {
        fn new() -> Self {
            Self { params: SimulationParameters::default(), epoch: Cell::new(0) }
        }
    }

    impl ParameterSource for FixedSource {
        fn snapshot(&self) -> SimulationParameters {
            self.params
        }

        fn epoch(&self) -> u64 {
            self.epoch.get()
        }
    }

    fn looped() -> SimulationLoop {
        SimulationLoop::new(&SimulationParameters::default(), 0)
    }

    #[test]
    fn starts_running() {
        let sim = looped();
        assert_eq!(sim.run_state(), RunState::Running);
        assert!(sim.wants_next_frame());
    }

    #[test]
    fn running_frame_ticks_and_renders() {
        let mut sim = looped();
        let mut sink = RecordingSink::default();
        let source = FixedSource::new();

        for _ in 0..3 {
            assert_eq!(sim.on_frame(&source, &mut sink), FrameOutcome::Rendered);
        }
        assert_eq!(sink.frames.len(), 3);
        let last = sink.frames.last().unwrap();
        assert_eq!(last.ticks, 3);
        assert_eq!(last.reference_trace.len(), 3);
        assert_eq!(last.perturbed_trace.len(), 3);
        assert_relative_eq!(last.elapsed, 0.6, epsilon = 1e-12);
        assert_eq!(last.divergence, sim.divergence());
    }

    #[test]
    fn paused_frames_do_nothing() {
        let mut sim = looped();
        let mut sink = RecordingSink::default();
        let source = FixedSource::new();
        sim.on_frame(&source, &mut sink);

        sim.toggle_run_pause();
        assert!(!sim.wants_next_frame());
        let before = sim.snapshot();
        for _ in 0..5 {
            assert_eq!(sim.on_frame(&source, &mut sink), FrameOutcome::Idle);
        }
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sink.frames.len(), 1);

        sim.toggle_run_pause();
        assert_eq!(sim.run_state(), RunState::Running);
        assert_eq!(sim.on_frame(&source, &mut sink), FrameOutcome::Rendered);
    }

    #[test]
    fn reset_keeps_run_state_and_clears_everything() {
        let mut sim = looped();
        let mut sink = RecordingSink::default();
        let source = FixedSource::new();
        for _ in 0..10 {
            sim.on_frame(&source, &mut sink);
        }
        sim.toggle_run_pause();
        sim.reset(&mut sink);

        assert_eq!(sim.run_state(), RunState::Paused);
        assert_eq!(sink.clears, 1);
        assert_eq!(sim.divergence(), 0.0);
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.elapsed(), 0.0);
        assert!(sim.reference_trace().is_empty());
        assert!(sim.perturbed_trace().is_empty());
        assert_eq!(sim.trajectories(), &TrajectorySet::new());
    }

    #[test]
    fn epoch_change_resets_before_ticking() {
        let mut sim = looped();
        let mut sink = RecordingSink::default();
        let source = FixedSource::new();
        for _ in 0..5 {
            sim.on_frame(&source, &mut sink);
        }

        source.epoch.set(1);
        sim.on_frame(&source, &mut sink);
        assert_eq!(sink.clears, 1);
        assert_eq!(sim.ticks(), 1);
        assert_eq!(sim.reference_trace().len(), 1);

        // same epoch again: no further reset
        sim.on_frame(&source, &mut sink);
        assert_eq!(sink.clears, 1);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn epoch_change_while_paused_resets_without_ticking() {
        let mut sim = looped();
        let mut sink = RecordingSink::default();
        let source = FixedSource::new();
        sim.on_frame(&source, &mut sink);
        sim.toggle_run_pause();

        source.epoch.set(7);
        assert_eq!(sim.on_frame(&source, &mut sink), FrameOutcome::Idle);
        assert_eq!(sink.clears, 1);
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.run_state(), RunState::Paused);
    }

    #[test]
    fn trails_cap_at_capacity() {
        let mut sim = looped();
        let params = SimulationParameters::default();
        for _ in 0..250 {
            sim.tick(&params);
        }
        assert_eq!(sim.reference_trace().len(), 200);
        assert_eq!(
            sim.reference_trace().latest(),
            Some(distal_position(sim.trajectories().reference(), &params))
        );
    }

    #[test]
    fn divergence_grows_over_two_thousand_ticks() {
        let mut sim = looped();
        let params = SimulationParameters::default();
        sim.tick(&params);
        let early = sim.divergence();
        for _ in 1..2000 {
            sim.tick(&params);
        }
        assert!(sim.divergence() > early);
        assert!(sim.snapshot().is_valid());
    }

    #[test]
    fn divergence_levels_and_gauge() {
        assert_eq!(DivergenceLevel::classify(100.0), DivergenceLevel::Stable);
        assert_eq!(DivergenceLevel::classify(100.5), DivergenceLevel::Critical);
        assert_relative_eq!(gauge_fraction(250.0), 0.5);
        assert_relative_eq!(gauge_fraction(10_000.0), 1.0);
        assert_relative_eq!(gauge_fraction(0.0), 0.0);
    }
}
