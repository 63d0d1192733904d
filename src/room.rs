use crate::bounds::RoomBounds;
use crate::room_type::RoomType;
use nalgebra::Vector2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub bounds: RoomBounds,
    pub room_type: RoomType,
    pub parent: Option<RoomId>, // lineage only, e.g. bonus room -> junction
}

impl Room {
    pub fn new(id: RoomId, bounds: RoomBounds, room_type: RoomType, parent: Option<RoomId>) -> Self {
        Room {
            id,
            bounds,
            room_type,
            parent,
        }
    }

    pub fn center(&self) -> Vector2<i32> {
        Vector2::new(
            self.bounds.x + self.bounds.width / 2,
            self.bounds.z + self.bounds.depth / 2,
        )
    }

    pub fn exit_left(&self) -> Vector2<i32> {
        Vector2::new(self.bounds.x, self.bounds.z + self.bounds.depth / 2)
    }

    pub fn exit_right(&self) -> Vector2<i32> {
        Vector2::new(self.bounds.x_max() - 1, self.bounds.z + self.bounds.depth / 2)
    }

    // midpoint of the top (+z) edge
    pub fn exit_up(&self) -> Vector2<i32> {
        Vector2::new(self.bounds.x + self.bounds.width / 2, self.bounds.z_max() - 1)
    }

    // midpoint of the bottom (-z) edge
    pub fn exit_down(&self) -> Vector2<i32> {
        Vector2::new(self.bounds.x + self.bounds.width / 2, self.bounds.z)
    }

    pub fn contains_cell(&self, x: i32, z: i32) -> bool {
        self.bounds.contains(&Vector2::new(x, z))
    }
}

/// Position of a room in the room list. Ids are handed out sequentially and never reused.
#[derive(Ord, PartialOrd, PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct RoomId(usize);

impl RoomId {
    pub fn new(index: usize) -> Self {
        RoomId(index)
    }

    pub fn first() -> Self {
        RoomId(0)
    }

    pub fn inner(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::bounds::RoomBounds;
    use crate::room::{Room, RoomId};
    use crate::room_type::RoomType;
    use nalgebra::Vector2;

    #[test]
    fn test_derived_cells() {
        let room = Room::new(
            RoomId::first(),
            RoomBounds::new(10, 4, 6, 5),
            RoomType::Normal,
            None,
        );
        assert_eq!(room.center(), Vector2::new(13, 6));
        assert_eq!(room.exit_left(), Vector2::new(10, 6));
        assert_eq!(room.exit_right(), Vector2::new(15, 6));
        assert_eq!(room.exit_up(), Vector2::new(13, 8));
        assert_eq!(room.exit_down(), Vector2::new(13, 4));
        assert!(room.contains_cell(15, 8));
        assert!(!room.contains_cell(16, 8));
    }
}
