use nalgebra::{Vector2, Vector3};

/// Axis-aligned footprint of a room on the x/z plane.
///
/// Rooms are flat, so the y extent is always `0..1`. [`RoomBounds::origin`] and
/// [`RoomBounds::size`] expose the 3D form renderers expect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RoomBounds {
    pub x: i32,
    pub z: i32,
    pub width: i32,
    pub depth: i32,
}

impl RoomBounds {
    pub const HEIGHT: i32 = 1;

    pub fn new(x: i32, z: i32, width: i32, depth: i32) -> Self {
        RoomBounds {
            x,
            z,
            width,
            depth,
        }
    }

    pub fn origin(&self) -> Vector3<i32> {
        Vector3::new(self.x, 0, self.z)
    }

    pub fn size(&self) -> Vector3<i32> {
        Vector3::new(self.width, Self::HEIGHT, self.depth)
    }

    // exclusive
    pub fn x_max(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    // exclusive
    pub fn z_max(&self) -> i32 {
        self.z.saturating_add(self.depth)
    }

    pub fn contains(&self, cell: &Vector2<i32>) -> bool {
        self.x <= cell.x && cell.x < self.x_max() && self.z <= cell.y && cell.y < self.z_max()
    }

    pub fn expanded(&self, margin: i32) -> Self {
        RoomBounds {
            x: self.x - margin,
            z: self.z - margin,
            width: self.width + margin * 2,
            depth: self.depth + margin * 2,
        }
    }

    /// Half-open overlap test on x/z.
    pub fn intersects(&self, other: &RoomBounds) -> bool {
        self.x < other.x_max()
            && other.x < self.x_max()
            && self.z < other.z_max()
            && other.z < self.z_max()
    }

    /// True when `other` overlaps this footprint grown by `margin` cells on every side.
    pub fn is_contact(&self, other: &RoomBounds, margin: i32) -> bool {
        self.expanded(margin).intersects(other)
    }

    pub fn cells(&self) -> impl Iterator<Item = Vector2<i32>> {
        let (x_min, x_max) = (self.x, self.x_max());
        (self.z..self.z_max())
            .flat_map(move |z| (x_min..x_max).map(move |x| Vector2::new(x, z)))
    }
}

/// Clamp that tolerates `min > max`: values below `min` become `min`, otherwise values
/// above `max` become `max`.
pub fn clamp_lenient(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use crate::bounds::{clamp_lenient, RoomBounds};
    use nalgebra::{Vector2, Vector3};

    #[test]
    fn test_contains_is_half_open() {
        let b = RoomBounds::new(2, 3, 4, 5);
        assert!(b.contains(&Vector2::new(2, 3)));
        assert!(b.contains(&Vector2::new(5, 7)));
        assert!(!b.contains(&Vector2::new(6, 7)));
        assert!(!b.contains(&Vector2::new(5, 8)));
        assert!(!b.contains(&Vector2::new(1, 3)));
    }

    #[test]
    fn test_touching_rooms_do_not_intersect_but_are_in_contact() {
        let a = RoomBounds::new(0, 0, 4, 4);
        let b = RoomBounds::new(4, 0, 4, 4);
        assert!(!a.intersects(&b));
        assert!(a.is_contact(&b, 1));

        // a single empty column between them is enough for a wall
        let c = RoomBounds::new(5, 0, 4, 4);
        assert!(!a.is_contact(&c, 1));

        let d = RoomBounds::new(-3, 3, 4, 4);
        assert!(a.is_contact(&d, 1));
    }

    #[test]
    fn test_origin_and_size_are_flat() {
        let b = RoomBounds::new(7, 9, 3, 2);
        assert_eq!(b.origin(), Vector3::new(7, 0, 9));
        assert_eq!(b.size(), Vector3::new(3, 1, 2));
        assert_eq!(b.cells().count(), 6);
    }

    #[test]
    fn test_far_edges_saturate() {
        let b = RoomBounds::new(i32::MAX - 2, 5, i32::MAX, 3);
        assert_eq!(b.x_max(), i32::MAX);
        assert_eq!(b.z_max(), 8);
    }

    #[test]
    fn test_clamp_lenient_with_inverted_range() {
        assert_eq!(clamp_lenient(5, 2, 10), 5);
        assert_eq!(clamp_lenient(1, 2, 10), 2);
        assert_eq!(clamp_lenient(11, 2, 10), 10);
        assert_eq!(clamp_lenient(0, 4, 3), 4);
        assert_eq!(clamp_lenient(9, 4, 3), 3);
    }
}
