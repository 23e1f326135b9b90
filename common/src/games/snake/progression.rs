use std::time::Duration;

pub const POINTS_PER_FOOD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub speed_ms: u64,
}

/// Maps score to level and level to tick interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionPolicy {
    pub foods_eaten_for_level_up: u32,
    pub base_speed_ms: u64,
    pub speed_decrease_ms: u64,
    pub floor_speed_ms: u64,
}

impl ProgressionPolicy {
    pub fn speed_for_level(&self, level: u32) -> u64 {
        let decrease = u64::from(level.saturating_sub(1)).saturating_mul(self.speed_decrease_ms);
        self.base_speed_ms
            .saturating_sub(decrease)
            .max(self.floor_speed_ms)
    }

    pub fn interval_for_level(&self, level: u32) -> Duration {
        Duration::from_millis(self.speed_for_level(level))
    }

    pub fn level_for_score(&self, score: u32) -> u32 {
        let foods = score / POINTS_PER_FOOD;
        1 + foods / self.foods_eaten_for_level_up
    }

    /// Called with the score after it has been credited for a food item.
    pub fn on_food_eaten(&self, score: u32) -> Option<LevelUp> {
        let threshold = self.foods_eaten_for_level_up * POINTS_PER_FOOD;
        if score == 0 || score % threshold != 0 {
            return None;
        }
        let level = self.level_for_score(score);
        Some(LevelUp {
            level,
            speed_ms: self.speed_for_level(level),
        })
    }

    /// Applies a boost decrement on top of an interval, clamped at the floor.
    pub fn boosted_speed(&self, speed_ms: u64, decrease_ms: u64) -> u64 {
        speed_ms.saturating_sub(decrease_ms).max(self.floor_speed_ms)
    }
}
