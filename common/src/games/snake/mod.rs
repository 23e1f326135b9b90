mod clock;
mod driver;
mod entity;
mod events;
mod game_state;
mod grid;
mod high_score;
mod power_up;
mod progression;
mod session;
mod settings;
mod snapshot;
mod spawn;
mod types;

pub use clock::{MAX_TICKS_PER_ADVANCE, SimulationClock};
pub use driver::run_session;
pub use entity::Snake;
pub use events::{SessionCommand, SessionEvent};
pub use game_state::{SnakeGameState, TickReport};
pub use grid::FieldSize;
pub use high_score::{
    FileHighScoreStore, HighScoreRecord, HighScoreStore, InMemoryHighScoreStore,
};
pub use power_up::{ActiveEffect, PowerUpManager};
pub use progression::{LevelUp, POINTS_PER_FOOD, ProgressionPolicy};
pub use session::{SessionError, SnakeSession};
pub use settings::{
    Difficulty, DifficultyPreset, GameConfig, InvincibilitySettings, MAX_GRID_SIZE, MIN_GRID_SIZE,
    MIN_SNAKE_LENGTH, PowerUpSettings, ProgressionSettings, SnakeSessionSettings,
    SpeedBoostSettings,
};
pub use snapshot::{ActiveEffectView, SessionSnapshot};
pub use spawn::{SpawnError, SpawnPolicy};
pub use types::{DeathReason, Direction, Point, PowerUp, PowerUpKind, SessionPhase};
