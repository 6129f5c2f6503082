use std::path::{Path, PathBuf};

use trams_core::simulation::SimulationContext;

use super::{GameStore, StoreError};

/// stores a game as a single pretty-printed JSON document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> JsonFileStore {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl GameStore for JsonFileStore {
    /// writes next to the target and renames, so an interrupted save keeps the
    /// previous game file intact.
    fn save(&self, context: &SimulationContext) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(context).map_err(|e| self.json_error(e))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        log::info!("saved game '{}' to {:?}", context.company_name, self.path);
        Ok(())
    }

    fn load(&self) -> Result<SimulationContext, StoreError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let context: SimulationContext =
            serde_json::from_str(&json).map_err(|e| self.json_error(e))?;
        log::info!("loaded game '{}' from {:?}", context.company_name, self.path);
        Ok(context)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scenario::Scenario;
    use trams_core::{model::ScheduleKey, simulation::SimulationPolicy};

    fn context() -> SimulationContext {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("resources")
            .join("airport_scenario.json");
        Scenario::try_from(&path.to_string_lossy().to_string())
            .unwrap()
            .create_context(SimulationPolicy::default(), None)
            .unwrap()
    }

    #[test]
    fn test_saved_game_loads_back() {
        let path = std::env::temp_dir().join("trams_json_file_store_test.json");
        let store = JsonFileStore::new(&path);
        let mut ctx = context();
        ctx.add_additional_tour("2");
        ctx.adjust_satisfaction(-12.5);
        store.save(&ctx).unwrap();
        let loaded = store.load().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, ctx);
        assert_eq!(
            loaded.position_of(&ScheduleKey::new("1", 1)),
            ctx.position_of(&ScheduleKey::new("1", 1))
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let store = JsonFileStore::new(std::env::temp_dir().join("trams_no_such_game.json"));
        assert!(matches!(store.load(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = std::env::temp_dir().join("trams_corrupt_game_test.json");
        std::fs::write(&path, "{ \"company_name\": ").unwrap();
        let result = JsonFileStore::new(&path).load();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }
}
