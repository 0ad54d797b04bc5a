//! Owner of the live parameter set, edited by the control panel or loaded from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::physics::parameters::SimulationParameters;
use crate::sim_loop::ParameterSource;

/// Holds the current parameters and bumps an epoch on every accepted edit,
/// so that each change pairs with a simulation reset.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    params: SimulationParameters,
    epoch: u64,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self { params: SimulationParameters::default(), epoch: 0 }
    }
}

impl ConfigStore {
    pub fn new(params: SimulationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, epoch: 0 })
    }

    /// Reads a JSON parameter file; all eight fields must be present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let params = read_parameters(path.as_ref())?;
        Self::new(params)
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Validates and stores `params`. Returns whether anything changed.
    pub fn set(&mut self, params: SimulationParameters) -> Result<bool> {
        params.validate()?;
        if params == self.params {
            return Ok(false);
        }
        self.params = params;
        self.epoch += 1;
        debug!(epoch = self.epoch, ?params, "parameters updated");
        Ok(true)
    }

    /// Replaces the parameters from a JSON file, bumping the epoch on change.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let params = read_parameters(path.as_ref())?;
        self.set(params)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.params)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        fs::write(path, json).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }
}

impl ParameterSource for ConfigStore {
    fn snapshot(&self) -> SimulationParameters {
        self.params
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

fn read_parameters(path: &Path) -> Result<SimulationParameters> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chaos_pendulum_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn set_bumps_epoch_only_on_change() {
        let mut store = ConfigStore::default();
        assert_eq!(store.epoch(), 0);

        assert!(!store.set(SimulationParameters::default()).unwrap());
        assert_eq!(store.epoch(), 0);

        let heavier = SimulationParameters { m2: 20.0, ..SimulationParameters::default() };
        assert!(store.set(heavier).unwrap());
        assert_eq!(store.epoch(), 1);
        assert_eq!(store.snapshot(), heavier);
    }

    #[test]
    fn invalid_edit_is_rejected_and_keeps_state() {
        let mut store = ConfigStore::default();
        let bad = SimulationParameters { dt: 0.0, ..SimulationParameters::default() };
        assert!(matches!(store.set(bad), Err(ConfigError::OutOfRange { name: "dt", .. })));
        assert_eq!(store.epoch(), 0);
        assert_eq!(store.params(), &SimulationParameters::default());
    }

    #[test]
    fn load_reads_complete_json() {
        let path = temp_file(
            "full.json",
            r#"{"m1":5,"m2":12.5,"l1":100,"l2":200,"g":2,"dt":0.1,"speed":2,"accuracy":3}"#,
        );
        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.params().m2, 12.5);
        assert_eq!(store.params().substeps(), 3);
        fs::remove_file(path).ok();
    }

    #[test]
    fn load_rejects_missing_field() {
        let path = temp_file("partial.json", r#"{"m1":5,"m2":5,"l1":100,"l2":100,"g":1,"dt":0.2,"speed":1}"#);
        assert!(matches!(ConfigStore::load(&path), Err(ConfigError::Parse { .. })));
        fs::remove_file(path).ok();
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("chaos_pendulum_definitely_absent.json");
        assert!(matches!(ConfigStore::load(path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn parameter_edit_resets_running_loop() {
        use crate::sim_loop::{FrameSink, RenderSnapshot, SimulationLoop};

        struct Discard;
        impl FrameSink for Discard {
            fn draw(&mut self, _snapshot: &RenderSnapshot) {}
            fn clear(&mut self) {}
        }

        let mut store = ConfigStore::default();
        let mut sim = SimulationLoop::new(store.params(), store.epoch());
        for _ in 0..10 {
            sim.on_frame(&store, &mut Discard);
        }
        assert_eq!(sim.ticks(), 10);

        store.set(SimulationParameters { g: 2.0, ..SimulationParameters::default() }).unwrap();
        sim.on_frame(&store, &mut Discard);
        assert_eq!(sim.ticks(), 1);
        assert_eq!(sim.snapshot().params.g, 2.0);
    }

    #[test]
    fn save_then_reload_bumps_epoch() {
        let path = std::env::temp_dir().join(format!("chaos_pendulum_{}_saved.json", std::process::id()));
        let tuned = SimulationParameters { g: 2.5, ..SimulationParameters::default() };
        ConfigStore::new(tuned).unwrap().save(&path).unwrap();

        let mut store = ConfigStore::default();
        assert!(store.reload(&path).unwrap());
        assert_eq!(store.epoch(), 1);
        assert_eq!(store.params().g, 2.5);
        fs::remove_file(path).ok();
    }
}
