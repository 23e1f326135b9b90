use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

/// Durable storage for the best score across sessions.
pub trait HighScoreStore: Send {
    fn load(&self) -> Result<u32, String>;
    fn save(&self, high_score: u32) -> Result<(), String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

impl Validate for HighScoreRecord {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Keeps the record in a YAML document next to the game config.
pub struct FileHighScoreStore {
    manager: ConfigManager<FileContentConfigProvider, HighScoreRecord, YamlConfigSerializer>,
}

impl FileHighScoreStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            manager: ConfigManager::from_yaml_file(file_path),
        }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        self.manager.get_config().map(|record| record.high_score)
    }

    fn save(&self, high_score: u32) -> Result<(), String> {
        self.manager.set_config(&HighScoreRecord { high_score })
    }
}

/// Process-local store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHighScoreStore {
    value: Arc<Mutex<u32>>,
}

impl InMemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
        }
    }
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        self.value
            .lock()
            .map(|value| *value)
            .map_err(|e| format!("High score lock poisoned: {}", e))
    }

    fn save(&self, high_score: u32) -> Result<(), String> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| format!("High score lock poisoned: {}", e))?;
        *value = high_score;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_high_score_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let store = FileHighScoreStore::new(get_temp_file_path());
        assert_eq!(store.load(), Ok(0));
    }

    #[test]
    fn test_file_store_persists_between_instances() {
        let path = get_temp_file_path();
        let store = FileHighScoreStore::new(path.clone());
        assert!(store.save(120).is_ok());

        let reopened = FileHighScoreStore::new(path.clone());
        assert_eq!(reopened.load(), Ok(120));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = get_temp_file_path();
        std::fs::write(&path, "high_score: [not a number").unwrap();
        let store = FileHighScoreStore::new(path.clone());
        assert!(store.load().is_err());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_in_memory_clones_share_value() {
        let store = InMemoryHighScoreStore::new(5);
        let observer = store.clone();
        store.save(70).unwrap();
        assert_eq!(observer.load(), Ok(70));
    }
}
