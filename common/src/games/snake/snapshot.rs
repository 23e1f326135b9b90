use serde::Serialize;

use super::types::{Direction, Point, PowerUp, PowerUpKind, SessionPhase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ActiveEffectView {
    pub kind: PowerUpKind,
    pub remaining_ms: u64,
}

/// Read-only view handed to renderers. Cells are ordered head first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub width: usize,
    pub height: usize,
    pub snake: Vec<Point>,
    pub head: Option<Point>,
    pub direction: Direction,
    pub food: Option<Point>,
    pub power_up: Option<PowerUp>,
    pub active_effect: Option<ActiveEffectView>,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub speed_ms: u64,
    pub tick: u64,
}

impl SessionSnapshot {
    pub fn is_snake_at(&self, point: Point) -> bool {
        self.snake.contains(&point)
    }

    /// One character per cell: `@` head, `o` body, `*` food, power-ups by initial.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 3) * (self.height + 2));
        let border = format!("+{}+\n", "-".repeat(self.width));
        out.push_str(&border);
        for y in 0..self.height as i32 {
            out.push('|');
            for x in 0..self.width as i32 {
                let point = Point::new(x, y);
                let cell = if self.head == Some(point) {
                    '@'
                } else if self.is_snake_at(point) {
                    'o'
                } else if self.food == Some(point) {
                    '*'
                } else if let Some(power_up) = self.power_up.filter(|p| p.position == point) {
                    power_up_glyph(power_up.kind)
                } else {
                    ' '
                };
                out.push(cell);
            }
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }
}

fn power_up_glyph(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::SpeedBoost => 'S',
        PowerUpKind::Shrink => 'R',
        PowerUpKind::Invincibility => 'I',
    }
}
