use std::collections::HashSet;

use crate::games::RandomSource;
use super::grid::FieldSize;
use super::types::{Point, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    GridExhausted { attempts: usize, occupied: usize, area: usize },
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnError::GridExhausted { attempts, occupied, area } => write!(
                f,
                "No free cell found after {} attempts ({} of {} cells occupied)",
                attempts, occupied, area
            ),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Uniform rejection sampling over the grid with a hard attempt cap.
#[derive(Clone, Debug)]
pub struct SpawnPolicy {
    pub field_size: FieldSize,
    pub max_attempts: usize,
}

impl SpawnPolicy {
    pub fn new(field_size: FieldSize, max_attempts: usize) -> Self {
        Self {
            field_size,
            max_attempts,
        }
    }

    pub fn place_food(
        &self,
        excluded: &HashSet<Point>,
        rng: &mut impl RandomSource,
    ) -> Result<Point, SpawnError> {
        self.sample_free_cell(excluded, rng)
    }

    pub fn place_power_up(
        &self,
        excluded: &HashSet<Point>,
        rng: &mut impl RandomSource,
    ) -> Result<(Point, PowerUpKind), SpawnError> {
        let position = self.sample_free_cell(excluded, rng)?;
        let kind = PowerUpKind::ALL[rng.next_index(PowerUpKind::ALL.len())];
        Ok((position, kind))
    }

    fn sample_free_cell(
        &self,
        excluded: &HashSet<Point>,
        rng: &mut impl RandomSource,
    ) -> Result<Point, SpawnError> {
        for _ in 0..self.max_attempts {
            let x = rng.next_index(self.field_size.width);
            let y = rng.next_index(self.field_size.height);
            let pos = Point::new(x as i32, y as i32);

            if !excluded.contains(&pos) {
                return Ok(pos);
            }
        }

        Err(SpawnError::GridExhausted {
            attempts: self.max_attempts,
            occupied: excluded.len(),
            area: self.field_size.area(),
        })
    }
}
