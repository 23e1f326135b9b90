use std::collections::VecDeque;

use super::types::{Direction, Point};

#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
}

impl Snake {
    /// Builds a straight snake whose tail trails behind `head`, opposite to `direction`.
    pub fn new(head: Point, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| Point::new(head.x - dx * i, head.y - dy * i))
            .collect();

        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Point>, direction: Direction) -> Self {
        let body: VecDeque<Point> = cells.into_iter().collect();
        assert!(!body.is_empty(), "Snake body should never be empty");
        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// Records a direction change for the next tick.
    ///
    /// The slot is last-write-wins, but a proposal is dropped when it reverses the
    /// committed direction or the direction already waiting in the slot.
    pub fn propose(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        if let Some(pending) = self.pending_direction
            && direction.is_opposite(&pending)
        {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn commit_direction(&mut self) -> Direction {
        if let Some(new_direction) = self.pending_direction.take() {
            self.direction = new_direction;
        }
        self.direction
    }

    pub fn next_head(&self) -> Point {
        self.head().step(self.direction)
    }

    /// The tail cell is skipped on a non-growth tick because it is vacated in the same move.
    pub fn collides_with_self(&self, candidate: Point, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|p| *p == candidate)
    }

    pub fn advance(&mut self, new_head: Point, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Cuts the body to `max(min_length, len / 2)` segments. Left untouched when
    /// halving would eat into the last `min_length` segments.
    pub fn shrink(&mut self, min_length: usize) -> usize {
        let length = self.body.len();
        let half = length / 2;
        if half + min_length > length {
            return 0;
        }
        let new_length = half.max(min_length);
        self.body.truncate(new_length);
        length - new_length
    }

    pub fn has_overlap(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .any(|(i, p)| self.body.iter().skip(i + 1).any(|q| q == p))
    }
}
