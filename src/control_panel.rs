use chaos_pendulum::{ConfigStore, RunState, SimulationParameters, PARAMETER_RANGES};
use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};
use tracing::warn;

/// Button the user clicked this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    TogglePause,
    Reset,
}

/// Slider window editing the parameters held by a [`ConfigStore`].
pub struct ControlPanel {
    // slider buffers, in PARAMETER_RANGES order
    values: [f32; 8],
}

impl ControlPanel {
    pub fn new(params: &SimulationParameters) -> Self {
        Self { values: params.values().map(|v| v as f32) }
    }

    /// Draws the panel; any slider movement is pushed to `store` (bumping its epoch).
    pub fn draw(&mut self, store: &mut ConfigStore, run_state: RunState) -> PanelAction {
        let mut action = PanelAction::None;
        let size = vec2(320.0, 420.0);
        let position = vec2(screen_width() - size.x - 20.0, screen_height() - size.y - 20.0);

        widgets::Window::new(hash!(), position, size)
            .label("SYSTEM PARAMETERS")
            .ui(&mut *root_ui(), |ui| {
                for (range, value) in PARAMETER_RANGES.iter().zip(self.values.iter_mut()) {
                    let label = format!("{} ({})", range.label, range.unit);
                    ui.slider(hash!(range.name), &label, range.min as f32..range.max as f32, value);
                    // snap to the slider step
                    let step = range.step as f32;
                    *value = (*value / step).round() * step;
                }

                ui.separator();
                let toggle = match run_state {
                    RunState::Running => "FREEZE STATE",
                    RunState::Paused => "RESUME SIM",
                };
                if ui.button(None, toggle) {
                    action = PanelAction::TogglePause;
                }
                if ui.button(None, "RESET INITIAL CONDITIONS") {
                    action = PanelAction::Reset;
                }
            });

        self.commit(store);
        action
    }

    fn commit(&mut self, store: &mut ConfigStore) {
        let edited = SimulationParameters::from_values(self.values.map(f64::from)).clamped();
        // f32 buffers never round-trip exactly; only push real edits.
        let current = store.params().values();
        let moved = edited
            .values()
            .iter()
            .zip(current.iter())
            .zip(PARAMETER_RANGES.iter())
            .any(|((a, b), range)| (a - b).abs() > range.step * 0.25);
        if !moved {
            return;
        }
        if let Err(err) = store.set(edited) {
            warn!(%err, "rejected parameter edit");
            self.values = store.params().values().map(|v| v as f32);
        }
    }
}
