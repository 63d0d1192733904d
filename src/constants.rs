use nalgebra::Vector2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Direction4 {
    Left,
    Right,
    Up,
    Down,
}

pub const DIRECTIONS: &[Direction4; 4] = &[
    Direction4::Left,
    Direction4::Right,
    Direction4::Up,
    Direction4::Down,
];

impl Direction4 {
    // x, z
    pub fn to_vec2(self) -> Vector2<i32> {
        match self {
            Direction4::Left => Vector2::new(-1, 0),
            Direction4::Right => Vector2::new(1, 0),
            Direction4::Up => Vector2::new(0, 1),
            Direction4::Down => Vector2::new(0, -1),
        }
    }

    /// Returns `None` unless `v` is one of the four axis-aligned unit vectors.
    pub fn from_vec2(v: &Vector2<i32>) -> Option<Self> {
        DIRECTIONS.iter().copied().find(|dir| dir.to_vec2() == *v)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction4::Left => Direction4::Right,
            Direction4::Right => Direction4::Left,
            Direction4::Up => Direction4::Down,
            Direction4::Down => Direction4::Up,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction4::Left | Direction4::Right)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Floor,
}

#[cfg(test)]
mod tests {
    use crate::constants::{Direction4, DIRECTIONS};
    use nalgebra::Vector2;

    #[test]
    fn test_from_vec2_accepts_only_cardinals() {
        for dir in DIRECTIONS {
            assert_eq!(Direction4::from_vec2(&dir.to_vec2()), Some(*dir));
        }
        assert_eq!(Direction4::from_vec2(&Vector2::new(0, 0)), None);
        assert_eq!(Direction4::from_vec2(&Vector2::new(1, 1)), None);
        assert_eq!(Direction4::from_vec2(&Vector2::new(2, 0)), None);
    }

    #[test]
    fn test_opposite_negates_vector() {
        for dir in DIRECTIONS {
            assert_eq!(dir.opposite().to_vec2(), -dir.to_vec2());
            assert_eq!(dir.opposite().is_horizontal(), dir.is_horizontal());
            assert_eq!(dir.is_horizontal(), dir.to_vec2().y == 0);
        }
    }
}
