use serde::{Deserialize, Serialize};

use crate::games::RandomSource;
use super::settings::PowerUpSettings;
use super::types::{Point, PowerUp, PowerUpKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

impl ActiveEffect {
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms)
    }
}

/// Tracks the power-up on the board and the single effect currently in force.
#[derive(Clone, Debug)]
pub struct PowerUpManager {
    settings: PowerUpSettings,
    spawned: Option<PowerUp>,
    active: Option<ActiveEffect>,
}

impl PowerUpManager {
    pub fn new(settings: PowerUpSettings) -> Self {
        Self {
            settings,
            spawned: None,
            active: None,
        }
    }

    pub fn settings(&self) -> &PowerUpSettings {
        &self.settings
    }

    pub fn spawned(&self) -> Option<PowerUp> {
        self.spawned
    }

    pub fn active(&self) -> Option<ActiveEffect> {
        self.active
    }

    pub fn active_kind(&self) -> Option<PowerUpKind> {
        self.active.map(|effect| effect.kind)
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active_kind() == Some(kind)
    }

    pub fn is_invincible(&self) -> bool {
        self.is_active(PowerUpKind::Invincibility)
    }

    /// Rolls the spawn chance; never rolls while a power-up is already on the board.
    pub fn should_spawn(&self, rng: &mut impl RandomSource) -> bool {
        self.spawned.is_none() && rng.chance(self.settings.spawn_probability)
    }

    pub fn place(&mut self, position: Point, kind: PowerUpKind) {
        self.spawned = Some(PowerUp { position, kind });
    }

    pub fn take_at(&mut self, position: Point) -> Option<PowerUp> {
        match self.spawned {
            Some(power_up) if power_up.position == position => self.spawned.take(),
            _ => None,
        }
    }

    pub fn duration_ms(&self, kind: PowerUpKind) -> Option<u64> {
        match kind {
            PowerUpKind::SpeedBoost => Some(self.settings.speed_boost.duration_ms),
            PowerUpKind::Invincibility => Some(self.settings.invincibility.duration_ms),
            PowerUpKind::Shrink => None,
        }
    }

    /// Starts a timed effect and returns the effect it replaced, if any.
    /// Instant kinds resolve in the caller and leave the current effect alone.
    pub fn activate(&mut self, kind: PowerUpKind, now_ms: u64) -> Option<PowerUpKind> {
        let duration = self.duration_ms(kind)?;
        let replaced = self.active.take().map(|effect| effect.kind);
        self.active = Some(ActiveEffect {
            kind,
            expires_at_ms: now_ms + duration,
        });
        replaced
    }

    pub fn expire(&mut self, now_ms: u64) -> Option<PowerUpKind> {
        match self.active {
            Some(effect) if now_ms > effect.expires_at_ms => {
                self.active = None;
                Some(effect.kind)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) -> Option<PowerUpKind> {
        self.spawned = None;
        self.active.take().map(|effect| effect.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ScriptedRandom;

    fn manager() -> PowerUpManager {
        PowerUpManager::new(PowerUpSettings::default())
    }

    #[test]
    fn test_spawn_rolls_only_when_board_is_empty() {
        let mut manager = manager();
        let mut rng = ScriptedRandom::new(vec![], vec![0.05]);
        assert!(manager.should_spawn(&mut rng));

        manager.place(Point::new(1, 1), PowerUpKind::Shrink);
        assert!(!manager.should_spawn(&mut rng));
    }

    #[test]
    fn test_spawn_chance_threshold() {
        let manager = manager();
        let mut rng = ScriptedRandom::new(vec![], vec![0.15, 0.149]);
        assert!(!manager.should_spawn(&mut rng));
        assert!(manager.should_spawn(&mut rng));
    }

    #[test]
    fn test_take_at_requires_matching_position() {
        let mut manager = manager();
        manager.place(Point::new(3, 3), PowerUpKind::SpeedBoost);
        assert_eq!(manager.take_at(Point::new(3, 4)), None);
        let taken = manager.take_at(Point::new(3, 3)).unwrap();
        assert_eq!(taken.kind, PowerUpKind::SpeedBoost);
        assert_eq!(manager.spawned(), None);
    }

    #[test]
    fn test_timed_effect_expires_strictly_after_deadline() {
        let mut manager = manager();
        assert_eq!(manager.activate(PowerUpKind::Invincibility, 1000), None);
        assert!(manager.is_invincible());

        assert_eq!(manager.expire(9000), None);
        assert_eq!(manager.expire(9001), Some(PowerUpKind::Invincibility));
        assert!(!manager.is_invincible());
    }

    #[test]
    fn test_shrink_never_becomes_active() {
        let mut manager = manager();
        manager.activate(PowerUpKind::SpeedBoost, 0);
        assert_eq!(manager.activate(PowerUpKind::Shrink, 10), None);
        assert_eq!(manager.active_kind(), Some(PowerUpKind::SpeedBoost));
    }

    #[test]
    fn test_new_timed_effect_replaces_old() {
        let mut manager = manager();
        manager.activate(PowerUpKind::SpeedBoost, 0);
        let replaced = manager.activate(PowerUpKind::Invincibility, 100);
        assert_eq!(replaced, Some(PowerUpKind::SpeedBoost));
        assert_eq!(manager.active().unwrap().expires_at_ms, 8100);
    }

    #[test]
    fn test_remaining_time() {
        let mut manager = manager();
        manager.activate(PowerUpKind::SpeedBoost, 200);
        let effect = manager.active().unwrap();
        assert_eq!(effect.remaining_ms(1200), 4000);
        assert_eq!(effect.remaining_ms(99_999), 0);
    }

    #[test]
    fn test_clear_drops_board_and_effect() {
        let mut manager = manager();
        manager.place(Point::new(0, 0), PowerUpKind::Shrink);
        manager.activate(PowerUpKind::SpeedBoost, 0);
        assert_eq!(manager.clear(), Some(PowerUpKind::SpeedBoost));
        assert_eq!(manager.spawned(), None);
        assert_eq!(manager.active(), None);
    }
}
