use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::grid::FieldSize;
use super::progression::ProgressionPolicy;

pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GRID_SIZE: usize = 100;
pub const MIN_SNAKE_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyPreset {
    pub initial_speed_ms: u64,
    pub grid_size: usize,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                initial_speed_ms: 200,
                grid_size: 20,
            },
            Difficulty::Medium => DifficultyPreset {
                initial_speed_ms: 150,
                grid_size: 20,
            },
            Difficulty::Hard => DifficultyPreset {
                initial_speed_ms: 100,
                grid_size: 25,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSettings {
    pub foods_eaten_for_level_up: u32,
    pub speed_decrease_ms: u64,
    pub floor_speed_ms: u64,
}

impl Default for ProgressionSettings {
    fn default() -> Self {
        Self {
            foods_eaten_for_level_up: 5,
            speed_decrease_ms: 20,
            floor_speed_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedBoostSettings {
    pub duration_ms: u64,
    pub speed_decrease_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvincibilitySettings {
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSettings {
    /// Chance that eating food spawns a power-up, checked only when none is on the board.
    pub spawn_probability: f32,
    pub speed_boost: SpeedBoostSettings,
    pub invincibility: InvincibilitySettings,
}

impl Default for PowerUpSettings {
    fn default() -> Self {
        Self {
            spawn_probability: 0.15,
            speed_boost: SpeedBoostSettings {
                duration_ms: 5000,
                speed_decrease_ms: 50,
            },
            invincibility: InvincibilitySettings { duration_ms: 8000 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub progression: ProgressionSettings,
    #[serde(default)]
    pub power_ups: PowerUpSettings,
    pub initial_length: usize,
    pub max_spawn_attempts: usize,
    pub high_score_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            progression: ProgressionSettings::default(),
            power_ups: PowerUpSettings::default(),
            initial_length: MIN_SNAKE_LENGTH,
            max_spawn_attempts: 10_000,
            high_score_file: "snake_high_score.yaml".to_string(),
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        let preset = self.difficulty.preset();
        if preset.grid_size < MIN_GRID_SIZE || preset.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "Grid size must be between {} and {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE
            ));
        }
        if self.initial_length < MIN_SNAKE_LENGTH || self.initial_length > preset.grid_size / 2 {
            return Err(format!(
                "Initial length must be between {} and {}",
                MIN_SNAKE_LENGTH,
                preset.grid_size / 2
            ));
        }
        if self.max_spawn_attempts == 0 {
            return Err("Max spawn attempts must be positive".to_string());
        }
        if self.progression.foods_eaten_for_level_up == 0 {
            return Err("Foods eaten for level up must be positive".to_string());
        }
        if self.progression.floor_speed_ms == 0 {
            return Err("Floor speed must be positive".to_string());
        }
        if self.progression.floor_speed_ms > preset.initial_speed_ms {
            return Err("Floor speed must not exceed the initial speed".to_string());
        }
        if !(0.0..=1.0).contains(&self.power_ups.spawn_probability) {
            return Err("Power-up spawn probability must be between 0.0 and 1.0".to_string());
        }
        if self.power_ups.speed_boost.duration_ms == 0
            || self.power_ups.invincibility.duration_ms == 0
        {
            return Err("Power-up durations must be positive".to_string());
        }
        if self.high_score_file.trim().is_empty() {
            return Err("High score file must not be empty".to_string());
        }
        Ok(())
    }
}

/// Everything a session needs, resolved from a validated config.
#[derive(Debug, Clone)]
pub struct SnakeSessionSettings {
    pub field_size: FieldSize,
    pub progression: ProgressionPolicy,
    pub power_ups: PowerUpSettings,
    pub initial_length: usize,
    pub max_spawn_attempts: usize,
}

impl From<&GameConfig> for SnakeSessionSettings {
    fn from(config: &GameConfig) -> Self {
        let preset = config.difficulty.preset();
        Self {
            field_size: FieldSize::square(preset.grid_size),
            progression: ProgressionPolicy {
                foods_eaten_for_level_up: config.progression.foods_eaten_for_level_up.max(1),
                base_speed_ms: preset.initial_speed_ms,
                speed_decrease_ms: config.progression.speed_decrease_ms,
                floor_speed_ms: config.progression.floor_speed_ms.max(1),
            },
            power_ups: config.power_ups.clone(),
            initial_length: config.initial_length.max(1),
            max_spawn_attempts: config.max_spawn_attempts.max(1),
        }
    }
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}
