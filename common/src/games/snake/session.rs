use std::time::Duration;

use crate::games::{RandomSource, SessionRng};
use crate::log;
use super::clock::{MAX_TICKS_PER_ADVANCE, SimulationClock};
use super::events::{SessionCommand, SessionEvent};
use super::game_state::SnakeGameState;
use super::high_score::HighScoreStore;
use super::settings::SnakeSessionSettings;
use super::snapshot::{ActiveEffectView, SessionSnapshot};
use super::spawn::SpawnError;
use super::types::{DeathReason, Direction, SessionPhase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidTransition {
        phase: SessionPhase,
        command: &'static str,
    },
    /// `events` holds everything the failing call produced before stopping,
    /// including the closing `GameOver`.
    Spawn {
        error: SpawnError,
        events: Vec<SessionEvent>,
    },
}

impl SessionError {
    /// Events still owed to presentation collaborators.
    pub fn into_events(self) -> Vec<SessionEvent> {
        match self {
            SessionError::Spawn { events, .. } => events,
            SessionError::InvalidTransition { .. } => Vec::new(),
        }
    }

    fn with_earlier_events(self, mut earlier: Vec<SessionEvent>) -> Self {
        match self {
            SessionError::Spawn { error, events } => {
                earlier.extend(events);
                SessionError::Spawn {
                    error,
                    events: earlier,
                }
            }
            other => other,
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidTransition { phase, command } => {
                write!(f, "Cannot {} while {:?}", command, phase)
            }
            SessionError::Spawn { error, .. } => write!(f, "Spawn failed: {}", error),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<SpawnError> for SessionError {
    fn from(error: SpawnError) -> Self {
        SessionError::Spawn {
            error,
            events: Vec::new(),
        }
    }
}

/// Owns one player's play-throughs: phase machine, logical clock, randomness and high score.
pub struct SnakeSession<R: RandomSource = SessionRng> {
    settings: SnakeSessionSettings,
    phase: SessionPhase,
    game_state: Option<SnakeGameState>,
    clock: SimulationClock,
    rng: R,
    high_scores: Box<dyn HighScoreStore>,
    high_score: u32,
}

impl<R: RandomSource> SnakeSession<R> {
    pub fn new(
        settings: SnakeSessionSettings,
        rng: R,
        high_scores: Box<dyn HighScoreStore>,
    ) -> Self {
        let high_score = match high_scores.load() {
            Ok(value) => value,
            Err(e) => {
                log!("Failed to load high score, starting from 0: {}", e);
                0
            }
        };

        Self {
            settings,
            phase: SessionPhase::Start,
            game_state: None,
            clock: SimulationClock::new(),
            rng,
            high_scores,
            high_score,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn game_state(&self) -> Option<&SnakeGameState> {
        self.game_state.as_ref()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn settings(&self) -> &SnakeSessionSettings {
        &self.settings
    }

    /// Takes effect on the next start or restart.
    pub fn set_settings(&mut self, settings: SnakeSessionSettings) {
        self.settings = settings;
    }

    /// Current speed; the scheduler re-reads it before every tick.
    pub fn tick_interval(&self) -> Duration {
        match &self.game_state {
            Some(state) => Duration::from_millis(state.speed_ms),
            None => self.settings.progression.interval_for_level(1),
        }
    }

    pub fn begin(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase != SessionPhase::Start {
            return Err(self.invalid("begin"));
        }
        let mut events = Vec::new();
        self.start_new_game(&mut events)?;
        Ok(events)
    }

    pub fn restart(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase == SessionPhase::Start {
            return Err(self.invalid("restart"));
        }
        let mut events = Vec::new();
        if let Some(state) = self.game_state.as_mut() {
            state.clear_power_ups(&mut events);
        }
        self.start_new_game(&mut events)?;
        Ok(events)
    }

    pub fn pause(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase != SessionPhase::Playing {
            return Err(self.invalid("pause"));
        }
        self.phase = SessionPhase::Paused;
        self.clock.stop();
        log!("Paused at tick {}", self.clock.ticks());
        Ok(vec![SessionEvent::Paused])
    }

    pub fn resume(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase != SessionPhase::Paused {
            return Err(self.invalid("resume"));
        }
        self.phase = SessionPhase::Playing;
        self.clock.start();
        log!("Resumed at tick {}", self.clock.ticks());
        Ok(vec![SessionEvent::Resumed])
    }

    pub fn toggle_pause(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        match self.phase {
            SessionPhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Queues a turn for the next tick. Returns false when the turn is ignored.
    pub fn post_direction(&mut self, direction: Direction) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        self.game_state
            .as_mut()
            .is_some_and(|state| state.propose_direction(direction))
    }

    /// Vector form of `post_direction`. Anything but a unit step along one axis is ignored.
    pub fn post_direction_vector(&mut self, dx: i32, dy: i32) -> bool {
        Direction::from_delta(dx, dy).is_some_and(|direction| self.post_direction(direction))
    }

    /// Runs exactly one tick, bypassing the frame accumulator.
    pub fn step(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase != SessionPhase::Playing {
            return Err(self.invalid("step"));
        }
        let interval = self.tick_interval();
        self.clock.record_tick(interval);
        self.run_tick()
    }

    /// Feeds elapsed wall time and runs every tick that became due.
    pub fn advance(&mut self, dt: Duration) -> Result<Vec<SessionEvent>, SessionError> {
        let mut events = Vec::new();
        if self.phase != SessionPhase::Playing {
            return Ok(events);
        }

        self.clock.accumulate(dt);
        let mut ticks = 0;
        while self.phase == SessionPhase::Playing
            && self.clock.take_due_tick(self.tick_interval())
        {
            match self.run_tick() {
                Ok(tick_events) => events.extend(tick_events),
                Err(e) => return Err(e.with_earlier_events(events)),
            }
            ticks += 1;
            if ticks >= MAX_TICKS_PER_ADVANCE {
                self.clock.discard_backlog();
                break;
            }
        }
        Ok(events)
    }

    pub fn handle_command(
        &mut self,
        command: SessionCommand,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        match command {
            SessionCommand::Begin if self.phase == SessionPhase::GameOver => self.restart(),
            SessionCommand::Begin => self.begin(),
            SessionCommand::Restart => self.restart(),
            SessionCommand::Pause => self.pause(),
            SessionCommand::Resume => self.resume(),
            SessionCommand::TogglePause => self.toggle_pause(),
            SessionCommand::Turn(direction) => {
                self.post_direction(direction);
                Ok(Vec::new())
            }
            SessionCommand::Quit => Ok(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let field_size = self
            .game_state
            .as_ref()
            .map(|state| state.field_size)
            .unwrap_or(self.settings.field_size);
        let now_ms = self.clock.now_ms();

        let mut snapshot = SessionSnapshot {
            phase: self.phase,
            width: field_size.width,
            height: field_size.height,
            snake: Vec::new(),
            head: None,
            direction: Direction::Right,
            food: None,
            power_up: None,
            active_effect: None,
            score: 0,
            level: 1,
            high_score: self.high_score,
            speed_ms: self.tick_interval().as_millis() as u64,
            tick: self.clock.ticks(),
        };

        if let Some(state) = &self.game_state {
            snapshot.snake = state.snake.cells().copied().collect();
            snapshot.head = Some(state.snake.head());
            snapshot.direction = state.snake.direction;
            snapshot.food = Some(state.food);
            snapshot.power_up = state.power_ups.spawned();
            snapshot.active_effect = state.power_ups.active().map(|effect| ActiveEffectView {
                kind: effect.kind,
                remaining_ms: effect.remaining_ms(now_ms),
            });
            snapshot.score = state.score;
            snapshot.level = state.level;
        }
        snapshot
    }

    fn start_new_game(&mut self, events: &mut Vec<SessionEvent>) -> Result<(), SessionError> {
        let state = SnakeGameState::new(&self.settings, &mut self.rng)?;
        log!(
            "Game started on {}x{} at {} ms per tick",
            state.field_size.width,
            state.field_size.height,
            state.speed_ms
        );
        self.game_state = Some(state);
        self.clock.reset();
        self.clock.start();
        self.phase = SessionPhase::Playing;
        events.push(SessionEvent::Started);
        Ok(())
    }

    fn run_tick(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        let now_ms = self.clock.now_ms();
        let Some(state) = self.game_state.as_mut() else {
            return Ok(Vec::new());
        };

        let report = state.update(now_ms, &mut self.rng);

        let mut events = report.events;
        if let Some(reason) = report.death {
            self.finish(reason, &mut events);
        }
        match report.spawn_error {
            Some(error) => Err(SessionError::Spawn { error, events }),
            None => Ok(events),
        }
    }

    fn finish(&mut self, reason: DeathReason, events: &mut Vec<SessionEvent>) {
        self.phase = SessionPhase::GameOver;
        self.clock.stop();

        let (score, level) = self
            .game_state
            .as_ref()
            .map(|state| (state.score, state.level))
            .unwrap_or((0, 1));

        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
            log!("New high score: {}", score);
            if let Err(e) = self.high_scores.save(score) {
                log!("Failed to save high score: {}", e);
            }
        }

        log!("Game over ({:?}): score {}, level {}", reason, score, level);
        events.push(SessionEvent::GameOver {
            reason,
            score,
            level,
            high_score: self.high_score,
            new_high_score,
        });
    }

    fn invalid(&self, command: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            phase: self.phase,
            command,
        }
    }
}
