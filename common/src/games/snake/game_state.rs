use std::collections::HashSet;

use crate::games::RandomSource;
use crate::log;
use super::entity::Snake;
use super::events::SessionEvent;
use super::grid::FieldSize;
use super::power_up::PowerUpManager;
use super::progression::{POINTS_PER_FOOD, ProgressionPolicy};
use super::settings::{MIN_SNAKE_LENGTH, SnakeSessionSettings};
use super::spawn::{SpawnError, SpawnPolicy};
use super::types::{DeathReason, Direction, Point, PowerUpKind};

#[derive(Debug, Default)]
pub struct TickReport {
    pub events: Vec<SessionEvent>,
    pub death: Option<DeathReason>,
    pub grew: bool,
    /// Set when no free cell was left for a spawn; the run ends with `BoardFull`.
    pub spawn_error: Option<SpawnError>,
}

/// Entities of one play-through. Created at start, discarded on restart.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub field_size: FieldSize,
    pub snake: Snake,
    pub food: Point,
    pub power_ups: PowerUpManager,
    pub score: u32,
    pub level: u32,
    pub foods_eaten: u32,
    pub speed_ms: u64,
    pub death_reason: Option<DeathReason>,
    progression: ProgressionPolicy,
    spawn: SpawnPolicy,
}

impl SnakeGameState {
    pub fn new(
        settings: &SnakeSessionSettings,
        rng: &mut impl RandomSource,
    ) -> Result<Self, SpawnError> {
        let field_size = settings.field_size;
        let snake = Snake::new(field_size.center(), Direction::Right, settings.initial_length);
        Self::with_snake(settings, snake, rng)
    }

    pub fn with_snake(
        settings: &SnakeSessionSettings,
        snake: Snake,
        rng: &mut impl RandomSource,
    ) -> Result<Self, SpawnError> {
        let spawn = SpawnPolicy::new(settings.field_size, settings.max_spawn_attempts);
        let occupied: HashSet<Point> = snake.cells().copied().collect();
        let food = spawn.place_food(&occupied, rng)?;

        Ok(Self {
            field_size: settings.field_size,
            snake,
            food,
            power_ups: PowerUpManager::new(settings.power_ups.clone()),
            score: 0,
            level: 1,
            foods_eaten: 0,
            speed_ms: settings.progression.base_speed_ms,
            death_reason: None,
            progression: settings.progression.clone(),
            spawn,
        })
    }

    pub fn progression(&self) -> &ProgressionPolicy {
        &self.progression
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    pub fn propose_direction(&mut self, direction: Direction) -> bool {
        self.is_alive() && self.snake.propose(direction)
    }

    /// Advances the simulation by one tick at logical time `now_ms`.
    pub fn update(&mut self, now_ms: u64, rng: &mut impl RandomSource) -> TickReport {
        let mut report = TickReport::default();
        if !self.is_alive() {
            return report;
        }

        self.snake.commit_direction();

        let invincible = self.power_ups.is_invincible();
        let next_head = match self.calculate_next_head(invincible) {
            Ok(point) => point,
            Err(reason) => {
                self.death_reason = Some(reason);
                report.death = Some(reason);
                return report;
            }
        };

        let grows = next_head == self.food;
        if !invincible && self.snake.collides_with_self(next_head, grows) {
            self.death_reason = Some(DeathReason::SelfCollision);
            report.death = Some(DeathReason::SelfCollision);
            return report;
        }

        self.snake.advance(next_head, grows);
        report.grew = grows;

        if grows && let Err(e) = self.eat_food(next_head, rng, &mut report.events) {
            log!("Board full at score {}: {}", self.score, e);
            self.death_reason = Some(DeathReason::BoardFull);
            report.death = Some(DeathReason::BoardFull);
            report.spawn_error = Some(e);
            return report;
        }

        if let Some(power_up) = self.power_ups.take_at(next_head) {
            self.activate_power_up(power_up.kind, now_ms, &mut report.events);
        }

        if let Some(expired) = self.power_ups.expire(now_ms) {
            self.end_effect(expired, &mut report.events);
        }

        report
    }

    fn calculate_next_head(&self, invincible: bool) -> Result<Point, DeathReason> {
        let next_head = self.snake.next_head();
        if self.field_size.contains(next_head) {
            return Ok(next_head);
        }
        if invincible {
            return Ok(self.field_size.wrap(next_head));
        }
        Err(DeathReason::WallCollision)
    }

    fn eat_food(
        &mut self,
        position: Point,
        rng: &mut impl RandomSource,
        events: &mut Vec<SessionEvent>,
    ) -> Result<(), SpawnError> {
        self.score += POINTS_PER_FOOD;
        self.foods_eaten += 1;
        events.push(SessionEvent::Ate {
            position,
            score: self.score,
        });

        let mut occupied: HashSet<Point> = self.snake.cells().copied().collect();
        if let Some(power_up) = self.power_ups.spawned() {
            occupied.insert(power_up.position);
        }
        self.food = self.spawn.place_food(&occupied, rng)?;

        if self.power_ups.should_spawn(rng) {
            occupied.insert(self.food);
            let (position, kind) = self.spawn.place_power_up(&occupied, rng)?;
            self.power_ups.place(position, kind);
            log!("Power-up {} spawned at ({}, {})", kind.as_str(), position.x, position.y);
            events.push(SessionEvent::PowerUpSpawned { position, kind });
        }

        if let Some(level_up) = self.progression.on_food_eaten(self.score) {
            self.level = level_up.level;
            self.speed_ms = level_up.speed_ms;
            log!("Level up: {} (tick interval {} ms)", self.level, self.speed_ms);
            events.push(SessionEvent::LevelUp {
                level: level_up.level,
                speed_ms: level_up.speed_ms,
            });
        }

        Ok(())
    }

    fn activate_power_up(
        &mut self,
        kind: PowerUpKind,
        now_ms: u64,
        events: &mut Vec<SessionEvent>,
    ) {
        match kind {
            PowerUpKind::Shrink => {
                let removed = self.snake.shrink(MIN_SNAKE_LENGTH);
                log!("Shrink removed {} segments, length now {}", removed, self.snake.len());
            }
            PowerUpKind::SpeedBoost | PowerUpKind::Invincibility => {
                if let Some(replaced) = self.power_ups.activate(kind, now_ms) {
                    self.end_effect(replaced, events);
                }
                if kind == PowerUpKind::SpeedBoost {
                    let decrease = self.power_ups.settings().speed_boost.speed_decrease_ms;
                    self.speed_ms = self.progression.boosted_speed(self.speed_ms, decrease);
                }
                if let Some(effect) = self.power_ups.active() {
                    log!("Power-up {} active until {} ms", kind.as_str(), effect.expires_at_ms);
                }
            }
        }
        events.push(SessionEvent::PowerUpActivated(kind));
    }

    fn end_effect(&mut self, kind: PowerUpKind, events: &mut Vec<SessionEvent>) {
        if kind == PowerUpKind::SpeedBoost {
            self.speed_ms = self.progression.speed_for_level(self.level);
        }
        log!("Power-up {} expired", kind.as_str());
        events.push(SessionEvent::PowerUpExpired(kind));
    }

    /// Ends any running effect, e.g. when the session restarts.
    pub fn clear_power_ups(&mut self, events: &mut Vec<SessionEvent>) {
        if let Some(kind) = self.power_ups.clear() {
            self.end_effect(kind, events);
        }
    }
}
