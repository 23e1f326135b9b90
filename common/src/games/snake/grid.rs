use serde::{Deserialize, Serialize};

use super::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// Toroidal wrap, so stepping off one edge re-enters from the opposite one.
    pub fn wrap(&self, point: Point) -> Point {
        let width = self.width as i32;
        let height = self.height as i32;
        Point::new(point.x.rem_euclid(width), point.y.rem_euclid(height))
    }

    pub fn center(&self) -> Point {
        Point::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_checks_all_edges() {
        let field = FieldSize::square(20);
        assert!(field.contains(Point::new(0, 0)));
        assert!(field.contains(Point::new(19, 19)));
        assert!(!field.contains(Point::new(-1, 5)));
        assert!(!field.contains(Point::new(5, -1)));
        assert!(!field.contains(Point::new(20, 5)));
        assert!(!field.contains(Point::new(5, 20)));
    }

    #[test]
    fn test_wrap_maps_to_opposite_edge() {
        let field = FieldSize::new(20, 10);
        assert_eq!(field.wrap(Point::new(-1, 3)), Point::new(19, 3));
        assert_eq!(field.wrap(Point::new(20, 3)), Point::new(0, 3));
        assert_eq!(field.wrap(Point::new(4, -1)), Point::new(4, 9));
        assert_eq!(field.wrap(Point::new(4, 10)), Point::new(4, 0));
        assert_eq!(field.wrap(Point::new(7, 7)), Point::new(7, 7));
    }

    #[test]
    fn test_center_of_even_grid() {
        assert_eq!(FieldSize::square(20).center(), Point::new(10, 10));
        assert_eq!(FieldSize::square(25).center(), Point::new(12, 12));
    }
}
