use std::path::{Path, PathBuf};

use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use common::games::snake::GameConfig;

const CONFIG_FILE_NAME: &str = "snake_config.yaml";

/// Config next to the executable, falling back to the working directory.
pub fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    config_path: &Path,
) -> ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(config_path)
}

/// Relative high score paths are taken relative to the config file.
pub fn resolve_high_score_path(config_path: &Path, high_score_file: &str) -> PathBuf {
    let high_score_path = Path::new(high_score_file);
    if high_score_path.is_absolute() {
        return high_score_path.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) => dir.join(high_score_path),
        None => high_score_path.to_path_buf(),
    }
}
