use crate::room::RoomId;
use nalgebra::Vector2;
use std::hash::{Hash, Hasher};

/// One direction of a physical connection: the opening in room `a`'s wall leading to `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    pub a: RoomId,
    pub b: RoomId,
    pub cell: Vector2<i32>,
    pub normal: Vector2<i32>, // outward unit vector of a's wall
}

impl Door {
    pub fn new(a: RoomId, b: RoomId, cell: Vector2<i32>, normal: Vector2<i32>) -> Self {
        Door { a, b, cell, normal }
    }

    pub fn link(&self) -> RoomLink {
        RoomLink {
            room0_id: self.a,
            room1_id: self.b,
        }
    }
}

/// Undirected pair of rooms. `{a, b}` and `{b, a}` compare and hash equal.
#[derive(Debug, Copy, Clone)]
pub struct RoomLink {
    pub room0_id: RoomId,
    pub room1_id: RoomId,
}

impl RoomLink {
    pub fn new(room0_id: RoomId, room1_id: RoomId) -> Self {
        RoomLink { room0_id, room1_id }
    }

    fn ordered(&self) -> (RoomId, RoomId) {
        if self.room0_id <= self.room1_id {
            (self.room0_id, self.room1_id)
        } else {
            (self.room1_id, self.room0_id)
        }
    }
}

impl Eq for RoomLink {}

impl PartialEq for RoomLink {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Hash for RoomLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}
