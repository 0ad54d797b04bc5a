// Draws the two pendulums, their trails and the divergence readout.

use chaos_pendulum::{CartesianPose, DivergenceLevel, FrameSink, PendulumState, RenderSnapshot, RunState, Vector2D};
use chaos_pendulum::sim_loop::gauge_fraction;
use macroquad::prelude::*;

const BACKGROUND: Color = Color::new(10.0 / 255.0, 10.0 / 255.0, 11.0 / 255.0, 1.0);
const REFERENCE_COLOR: Color = WHITE;
const PERTURBED_COLOR: Color = Color::new(239.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0, 1.0);
const STABLE_COLOR: Color = Color::new(52.0 / 255.0, 211.0 / 255.0, 153.0 / 255.0, 1.0);

/// Pixels of arrow per unit of bob speed.
const VECTOR_SCALE: f32 = 2.0;

/// # Pendulum renderer
///
/// Keeps the last snapshot it was handed so a paused simulation still shows
/// its final frame; macroquad needs a full redraw every frame.
pub struct PendulumRenderer {
    last: Option<RenderSnapshot>,
}

impl FrameSink for PendulumRenderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) {
        self.last = Some(snapshot.clone());
    }

    fn clear(&mut self) {
        self.last = None;
    }
}

impl PendulumRenderer {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// (called by the main loop) redraw the most recent frame
    pub fn present(&self, run_state: RunState) {
        clear_background(BACKGROUND);

        let pivot = vec2(screen_width() / 2.0, screen_height() / 2.5);

        if let Some(snapshot) = &self.last {
            // perturbed first so the reference sits on top
            draw_system(pivot, snapshot, &snapshot.perturbed, &snapshot.perturbed_trace, PERTURBED_COLOR, 3.0);
            draw_system(pivot, snapshot, &snapshot.reference, &snapshot.reference_trace, REFERENCE_COLOR, 1.0);
            draw_divergence_panel(snapshot);
            if !snapshot.is_valid() {
                draw_text(
                    "SIMULATION INVALID - press R to reset",
                    screen_width() / 2.0 - 220.0,
                    screen_height() - 80.0,
                    28.0,
                    PERTURBED_COLOR,
                );
            }
        } else {
            draw_circle(pivot.x, pivot.y, 4.0, GRAY);
        }

        draw_legend();

        let hint = match run_state {
            RunState::Running => "SPACE: Freeze | R: Reset",
            RunState::Paused => "SPACE: Resume | R: Reset  (frozen)",
        };
        draw_text(hint, 20.0, screen_height() - 30.0, 20.0, GRAY);
    }
}

fn to_screen(pivot: Vec2, p: Vector2D) -> Vec2 {
    vec2(pivot.x + p.x as f32, pivot.y + p.y as f32)
}

fn draw_system(pivot: Vec2, snapshot: &RenderSnapshot, state: &PendulumState, trace: &[Vector2D], color: Color, trail_width: f32) {
    // 1. trail
    let trail_color = Color::new(color.r, color.g, color.b, if trail_width > 1.0 { 0.5 } else { 0.3 });
    for pair in trace.windows(2) {
        let a = to_screen(pivot, pair[0]);
        let b = to_screen(pivot, pair[1]);
        draw_line(a.x, a.y, b.x, b.y, trail_width, trail_color);
    }

    if !state.is_finite() {
        return;
    }

    // 2. rods and bobs
    let pose = CartesianPose::from_state(state, &snapshot.params);
    let b1 = to_screen(pivot, pose.bob1);
    let b2 = to_screen(pivot, pose.bob2);
    draw_line(pivot.x, pivot.y, b1.x, b1.y, 3.0, color);
    draw_line(b1.x, b1.y, b2.x, b2.y, 3.0, color);
    draw_circle(b1.x, b1.y, 6.0, color);
    draw_circle(b2.x, b2.y, 10.0, color);

    // 3. velocity arrows, label only on the distal bob
    draw_vector(b1, pose.velocity1, color, false);
    draw_vector(b2, pose.velocity2, color, true);
}

fn draw_vector(origin: Vec2, velocity: Vector2D, color: Color, label: bool) {
    let v = vec2(velocity.x as f32, velocity.y as f32) * VECTOR_SCALE;
    if v.length() < 2.0 {
        return;
    }
    let tip = origin + v;
    draw_line(origin.x, origin.y, tip.x, tip.y, 2.0, color);

    let angle = v.y.atan2(v.x);
    let head = 8.0;
    let spread = std::f32::consts::PI / 6.0;
    let left = tip - vec2((angle - spread).cos(), (angle - spread).sin()) * head;
    let right = tip - vec2((angle + spread).cos(), (angle + spread).sin()) * head;
    draw_triangle(tip, left, right, color);

    if label {
        let x = origin.x + 25.0;
        let y = origin.y + 10.0;
        draw_rectangle(x, y, 150.0, 44.0, Color::new(0.04, 0.04, 0.045, 0.9));
        draw_rectangle_lines(x, y, 150.0, 44.0, 1.0, color);
        draw_text(&format!("v = {:.1} m/s", velocity.length()), x + 10.0, y + 20.0, 18.0, WHITE);
        draw_text(&format!("phi = {:.0} deg", velocity.heading_degrees()), x + 10.0, y + 38.0, 18.0, color);
    }
}

fn draw_divergence_panel(snapshot: &RenderSnapshot) {
    let x = screen_width() - 260.0;
    let y = 30.0;
    let color = match snapshot.level() {
        DivergenceLevel::Critical => PERTURBED_COLOR,
        DivergenceLevel::Stable => STABLE_COLOR,
    };

    draw_text("SYSTEM DIVERGENCE", x, y, 18.0, GRAY);
    draw_text(&format!("D {:.2}", snapshot.divergence), x, y + 36.0, 36.0, color);

    let bar_width = 200.0;
    draw_rectangle(x, y + 50.0, bar_width, 4.0, DARKGRAY);
    draw_rectangle(x, y + 50.0, bar_width * gauge_fraction(snapshot.divergence) as f32, 4.0, color);

    draw_text(&format!("t = {:.1} s  ({} ticks)", snapshot.elapsed, snapshot.ticks), x, y + 80.0, 18.0, GRAY);
}

fn draw_legend() {
    let (x, y) = (30.0, 40.0);
    draw_text("CHAOS SANDBOX", x, y, 36.0, WHITE);
    draw_circle(x + 6.0, y + 30.0, 6.0, REFERENCE_COLOR);
    draw_text("Reference", x + 20.0, y + 36.0, 20.0, REFERENCE_COLOR);
    draw_circle(x + 6.0, y + 58.0, 6.0, PERTURBED_COLOR);
    draw_text("Perturbed (+0.001 rad)", x + 20.0, y + 64.0, 20.0, PERTURBED_COLOR);
}
