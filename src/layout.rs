use crate::bounds::RoomBounds;
use crate::dataset::DungeonDataset;
use crate::door::{Door, RoomLink};
use crate::grid::Grid;
use crate::room::{Room, RoomId};
use crate::room_type::RoomType;
use nalgebra::Vector2;
use std::collections::HashSet;
use thiserror::Error;

/// Clearance kept around every room when testing a candidate footprint.
pub const ROOM_BUFFER: i32 = 1;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DoorPairError {
    #[error("rooms are already connected")]
    AlreadyConnected,
    #[error("room {0} has no connections left")]
    DegreeExhausted(RoomId),
}

/// Working state owned by a generator or builder while it mutates the layout.
#[derive(Clone, Debug)]
pub struct LayoutState {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    degrees: Vec<u32>,
    links: HashSet<RoomLink>,
    corridor_width: u32,
}

impl LayoutState {
    pub fn new(width: u32, depth: u32, corridor_width: u32) -> Self {
        LayoutState {
            grid: Grid::new(width, depth),
            rooms: Vec::new(),
            doors: Vec::new(),
            degrees: Vec::new(),
            links: HashSet::new(),
            corridor_width: corridor_width.max(1),
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.inner())
    }

    pub fn next_id(&self) -> RoomId {
        RoomId::new(self.rooms.len())
    }

    pub fn degree(&self, id: RoomId) -> u32 {
        self.degrees.get(id.inner()).copied().unwrap_or(0)
    }

    pub fn is_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.links.contains(&RoomLink::new(a, b))
    }

    pub fn has_degree_headroom(&self, id: RoomId) -> bool {
        self.room(id).is_some_and(|room| {
            self.degree(id) < room.room_type.spec().preferred_max_degree
        })
    }

    /// Candidate must sit inside the grid border and clear every room's 1-cell buffer.
    pub fn can_place(&self, b: &RoomBounds) -> bool {
        self.grid.contains_with_border(b) && !self.overlaps_existing_rooms(b)
    }

    pub fn overlaps_existing_rooms(&self, b: &RoomBounds) -> bool {
        self.rooms
            .iter()
            .any(|room| room.bounds.is_contact(b, ROOM_BUFFER))
    }

    /// Appends a room with the next sequential id and carves its floor.
    pub fn add_room(
        &mut self,
        bounds: RoomBounds,
        room_type: RoomType,
        parent: Option<RoomId>,
    ) -> &Room {
        let id = self.next_id();
        self.grid.carve_room(&bounds);
        self.rooms.push(Room::new(id, bounds, room_type, parent));
        self.degrees.push(0);
        log::trace!("placed {:?} room {} at {:?}", room_type, id, bounds);
        &self.rooms[id.inner()]
    }

    /// Rewrites a room's type in place, keeping id, bounds and parent.
    pub fn retype_room(&mut self, id: RoomId, room_type: RoomType) {
        if let Some(room) = self.rooms.get_mut(id.inner()) {
            log::debug!("room {} retyped {:?} -> {:?}", id, room.room_type, room_type);
            room.room_type = room_type;
        }
    }

    /// Adds a door pair with degree and duplicate checks, then carves the corridor.
    pub fn connect(
        &mut self,
        a: RoomId,
        b: RoomId,
        a_cell: Vector2<i32>,
        a_normal: Vector2<i32>,
        b_cell: Vector2<i32>,
        b_normal: Vector2<i32>,
    ) -> Result<(), DoorPairError> {
        if self.is_connected(a, b) {
            return Err(DoorPairError::AlreadyConnected);
        }
        if let Some(full) = [a, b].into_iter().find(|id| !self.has_degree_headroom(*id)) {
            return Err(DoorPairError::DegreeExhausted(full));
        }
        self.connect_unchecked(a, b, a_cell, a_normal, b_cell, b_normal);
        Ok(())
    }

    /// Adds a door pair and carves the corridor from `a_cell` to `b_cell`.
    pub fn connect_unchecked(
        &mut self,
        a: RoomId,
        b: RoomId,
        a_cell: Vector2<i32>,
        a_normal: Vector2<i32>,
        b_cell: Vector2<i32>,
        b_normal: Vector2<i32>,
    ) {
        self.grid
            .carve_l_corridor(&a_cell, &b_cell, self.corridor_width);
        self.doors.push(Door::new(a, b, a_cell, a_normal));
        self.doors.push(Door::new(b, a, b_cell, b_normal));
        self.links.insert(RoomLink::new(a, b));
        for id in [a, b] {
            if let Some(degree) = self.degrees.get_mut(id.inner()) {
                *degree += 1;
            }
        }
        log::trace!("door pair {} <-> {} ({:?} -> {:?})", a, b, a_cell, b_cell);
    }

    pub fn snapshot(&self) -> DungeonDataset {
        DungeonDataset::new(self.grid.clone(), self.rooms.clone(), self.doors.clone())
    }
}
