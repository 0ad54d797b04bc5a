mod control_panel;
mod render;

use chaos_pendulum::{ConfigStore, ParameterSource, SimulationLoop};
use macroquad::prelude::*;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::control_panel::{ControlPanel, PanelAction};
use crate::render::PendulumRenderer;

fn init_tracing() {
    let level = std::env::var("CHAOS_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);
    if let Err(err) = tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish()) {
        eprintln!("tracing already initialised: {err}");
    }
}

// Optional first argument: JSON parameter file.
fn initial_config() -> ConfigStore {
    let Some(path) = std::env::args().nth(1) else {
        return ConfigStore::default();
    };
    match ConfigStore::load(&path) {
        Ok(store) => {
            info!(%path, "loaded parameters");
            store
        }
        Err(err) => {
            warn!(%err, "falling back to default parameters");
            ConfigStore::default()
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Chaos Sandbox".to_owned(),
        window_width: 1200,
        window_height: 900,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    // 1. configuration collaborator and the loop it feeds
    let mut store = initial_config();
    let mut sim = SimulationLoop::new(store.params(), store.epoch());

    // 2. drawing collaborator and parameter sliders
    let mut renderer = PendulumRenderer::new();
    let mut panel = ControlPanel::new(store.params());

    info!(params = ?store.params(), "starting simulation");

    loop {
        if is_key_pressed(KeyCode::Space) {
            sim.toggle_run_pause();
        }
        if is_key_pressed(KeyCode::R) {
            sim.reset(&mut renderer);
        }

        // 3. tick (no-op while frozen), then redraw the latest frame
        sim.on_frame(&store, &mut renderer);
        renderer.present(sim.run_state());

        // 4. edits land in the store and take effect on the next tick
        match panel.draw(&mut store, sim.run_state()) {
            PanelAction::TogglePause => sim.toggle_run_pause(),
            PanelAction::Reset => sim.reset(&mut renderer),
            PanelAction::None => {}
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await
    }
}
