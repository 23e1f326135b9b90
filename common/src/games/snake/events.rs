use serde::{Deserialize, Serialize};

use super::types::{DeathReason, Direction, Point, PowerUpKind};

/// Discrete notifications for audio and other presentation collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started,
    Ate { position: Point, score: u32 },
    LevelUp { level: u32, speed_ms: u64 },
    PowerUpSpawned { position: Point, kind: PowerUpKind },
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    Paused,
    Resumed,
    GameOver {
        reason: DeathReason,
        score: u32,
        level: u32,
        high_score: u32,
        new_high_score: bool,
    },
}

/// Input intents posted by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Begin,
    Restart,
    Pause,
    Resume,
    TogglePause,
    Turn(Direction),
    Quit,
}
