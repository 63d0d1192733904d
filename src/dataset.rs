use crate::constants::{Cell, DIRECTIONS};
use crate::door::Door;
use crate::grid::Grid;
use crate::room::{Room, RoomId};
use nalgebra::Vector2;
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Read-only snapshot of a layout: occupancy grid, rooms in id order and directed doors.
///
/// A dataset owns private copies of everything it holds, so later generation steps never
/// show through an earlier snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonDataset {
    grid: Grid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
}

impl DungeonDataset {
    pub fn new(grid: Grid, rooms: Vec<Room>, doors: Vec<Door>) -> Self {
        DungeonDataset { grid, rooms, doors }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.inner())
    }

    pub fn room_at(&self, x: i32, z: i32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains_cell(x, z))
    }

    pub fn degree(&self, id: RoomId) -> usize {
        self.doors.iter().filter(|door| door.a == id).count()
    }

    // in door order, without duplicates
    pub fn neighbors(&self, id: RoomId) -> Vec<RoomId> {
        let mut seen = HashSet::new();
        self.doors
            .iter()
            .filter(|door| door.a == id)
            .map(|door| door.b)
            .filter(|b| seen.insert(*b))
            .collect()
    }

    /// Rooms reachable from `id` through doors, including `id` itself, sorted by id.
    pub fn rooms_reachable_from(&self, id: RoomId) -> Vec<RoomId> {
        if self.room(id).is_none() {
            return Vec::new();
        }
        let mut reached = bfs_reach(id, |room_id| self.neighbors(*room_id)).collect::<Vec<_>>();
        reached.sort();
        reached
    }

    /// Whether every room's floor can be walked to from room 0 over carved cells.
    pub fn floor_connects_all_rooms(&self) -> bool {
        let Some(first) = self.rooms.first() else {
            return true;
        };
        let reached = bfs_reach(first.center(), |p| {
            let p = *p;
            DIRECTIONS
                .iter()
                .map(move |dir| p + dir.to_vec2())
                .filter(|next| self.grid.get(next) == Cell::Floor)
                .collect::<Vec<_>>()
        })
        .collect::<HashSet<Vector2<i32>>>();
        self.rooms.iter().all(|room| reached.contains(&room.center()))
    }

    /// Grid dump with each room's type symbol stamped on its center cell.
    pub fn render_ascii(&self) -> String {
        let mut lines = self
            .grid
            .to_string()
            .lines()
            .map(|line| line.chars().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let depth = lines.len() as i32;
        for room in &self.rooms {
            let c = room.center();
            let row = depth - 1 - c.y;
            if let Some(ch) = usize::try_from(row)
                .ok()
                .and_then(|row| lines.get_mut(row))
                .and_then(|line| line.get_mut(c.x as usize))
            {
                *ch = room.room_type.symbol();
            }
        }
        lines
            .into_iter()
            .map(|line| line.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::bounds::RoomBounds;
    use crate::layout::LayoutState;
    use crate::room::RoomId;
    use crate::room_type::RoomType;
    use nalgebra::Vector2;

    fn sample_state() -> LayoutState {
        let mut state = LayoutState::new(16, 8, 1);
        state.add_room(RoomBounds::new(1, 1, 3, 3), RoomType::Start, None);
        state.add_room(RoomBounds::new(7, 1, 3, 3), RoomType::Junction, None);
        state.add_room(RoomBounds::new(12, 4, 3, 3), RoomType::Boss, None);
        let (a, b) = (state.rooms[0].exit_right(), state.rooms[1].exit_left());
        state
            .connect(
                RoomId::new(0),
                RoomId::new(1),
                a,
                Vector2::new(1, 0),
                b,
                Vector2::new(-1, 0),
            )
            .unwrap();
        state
    }

    #[test]
    fn test_render_ascii() {
        let dataset = sample_state().snapshot();
        insta::assert_snapshot!(dataset.render_ascii(), @r"
        ################
        ############...#
        ############.B.#
        ############...#
        #...###...######
        #.S.....J.######
        #...###...######
        ################
        ");
    }

    #[test]
    fn test_reachability() {
        let dataset = sample_state().snapshot();
        assert_eq!(
            dataset.rooms_reachable_from(RoomId::new(0)),
            vec![RoomId::new(0), RoomId::new(1)]
        );
        assert_eq!(dataset.rooms_reachable_from(RoomId::new(2)), vec![RoomId::new(2)]);
        assert!(dataset.rooms_reachable_from(RoomId::new(9)).is_empty());
        assert!(!dataset.floor_connects_all_rooms());
        assert_eq!(dataset.neighbors(RoomId::new(1)), vec![RoomId::new(0)]);
        assert_eq!(dataset.degree(RoomId::new(1)), 1);
        assert_eq!(dataset.degree(RoomId::new(2)), 0);
    }

    #[test]
    fn test_room_at() {
        let dataset = sample_state().snapshot();
        assert_eq!(dataset.room_at(8, 2).map(|r| r.id), Some(RoomId::new(1)));
        assert_eq!(dataset.room_at(5, 2).map(|r| r.id), None);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut state = sample_state();
        let first = state.snapshot();
        let second = state.snapshot();
        assert_eq!(first, second);

        state.add_room(RoomBounds::new(12, 1, 2, 1), RoomType::Normal, None);
        assert_eq!(first.rooms().len(), 3);
        assert_ne!(first, state.snapshot());
    }
}
