use crate::bounds::{clamp_lenient, RoomBounds};
use crate::constants::Direction4;
use crate::dataset::DungeonDataset;
use crate::layout::LayoutState;
use crate::room::{Room, RoomId};
use crate::room_type::{sample_room_size, RoomType};
use nalgebra::Vector2;
use rand::SeedableRng;
use std::ops::RangeInclusive;
use thiserror::Error;

const ROOM_MARGIN: i32 = 2;

#[derive(Debug, Clone)]
pub struct RuntimeBuilderConfig {
    pub width: u32,  // Width of the grid (x-axis)
    pub depth: u32,  // Depth of the grid (z-axis)
    pub room_width_range: RangeInclusive<u32>,
    pub room_depth_range: RangeInclusive<u32>,
    pub corridor_width: u32,
    pub corridor_length: u32, // Empty cells between a door and the new room's edge
    pub seed: Option<u64>,    // Seed value for random dungeon generation
}

impl Default for RuntimeBuilderConfig {
    fn default() -> Self {
        RuntimeBuilderConfig {
            width: 80,
            depth: 40,
            room_width_range: 6..=12,
            room_depth_range: 6..=12,
            corridor_width: 3,
            corridor_length: 6,
            seed: None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderConfigError {
    #[error("a {width}x{depth} grid cannot hold a room inside its margin")]
    GridTooSmall { width: u32, depth: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("builder has not been initialized")]
    NotInitialized,
    #[error("no room with id {0}")]
    UnknownRoom(RoomId),
    #[error("{0:?} is not a cardinal direction")]
    NonCardinalDirection(Vector2<i32>),
    #[error("room at {0:?} would leave the grid")]
    OutOfBounds(RoomBounds),
    #[error("room at {0:?} would touch an existing room")]
    Overlap(RoomBounds),
}

/// Grows a dungeon one room at a time.
///
/// [`RuntimeBuilder::initialize`] places a single Start room in the middle of the grid; each
/// successful [`RuntimeBuilder::try_expand_from`] appends one Normal room and the corridor
/// leading to it. Rooms and doors already placed are never touched again, and a rejected
/// expansion changes nothing.
pub struct RuntimeBuilder {
    config: RuntimeBuilderConfig,
    rng: rand::rngs::StdRng,
    state: LayoutState,
}

impl RuntimeBuilder {
    pub fn new(config: RuntimeBuilderConfig) -> Result<Self, BuilderConfigError> {
        let min_extent = (ROOM_MARGIN * 2 + 1) as u32;
        if config.width < min_extent || config.depth < min_extent {
            return Err(BuilderConfigError::GridTooSmall {
                width: config.width,
                depth: config.depth,
            });
        }
        let rng = config
            .seed
            .map(SeedableRng::seed_from_u64)
            .unwrap_or_else(rand::rngs::StdRng::from_entropy);
        let state = LayoutState::new(config.width, config.depth, config.corridor_width);
        Ok(RuntimeBuilder { config, rng, state })
    }

    /// Starts a fresh session with one centered Start room.
    pub fn initialize(&mut self) -> DungeonDataset {
        self.state = LayoutState::new(
            self.config.width,
            self.config.depth,
            self.config.corridor_width,
        );
        let width = self.state.grid.width();
        let depth = self.state.grid.depth();

        let size = sample_room_size(
            &mut self.rng,
            RoomType::Start,
            &self.config.room_width_range,
            &self.config.room_depth_range,
        );
        let w = size.x.min(width - ROOM_MARGIN * 2);
        let d = size.y.min(depth - ROOM_MARGIN * 2);
        let x = clamp_lenient(width / 2 - w / 2, ROOM_MARGIN, width - w - ROOM_MARGIN);
        let z = clamp_lenient(depth / 2 - d / 2, ROOM_MARGIN, depth - d - ROOM_MARGIN);

        self.state
            .add_room(RoomBounds::new(x, z, w, d), RoomType::Start, None);
        self.dataset()
    }

    pub fn dataset(&self) -> DungeonDataset {
        self.state.snapshot()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.state.rooms
    }

    /// Attaches a new Normal room to the `direction` side of room `from_room_id`.
    pub fn try_expand_from(
        &mut self,
        from_room_id: RoomId,
        direction: Vector2<i32>,
    ) -> Result<Room, ExpandError> {
        if self.state.rooms.is_empty() {
            return Err(ExpandError::NotInitialized);
        }
        let from = self
            .state
            .room(from_room_id)
            .cloned()
            .ok_or(ExpandError::UnknownRoom(from_room_id))?;
        let dir = Direction4::from_vec2(&direction)
            .ok_or(ExpandError::NonCardinalDirection(direction))?;

        let size = sample_room_size(
            &mut self.rng,
            RoomType::Normal,
            &self.config.room_width_range,
            &self.config.room_depth_range,
        );
        let plan = self.plan_expansion(&from, dir, size);

        if !self.state.grid.contains_with_border(&plan.bounds) {
            log::debug!("expand {} {:?} rejected: out of bounds", from.id, dir);
            return Err(ExpandError::OutOfBounds(plan.bounds));
        }
        if self.state.overlaps_existing_rooms(&plan.bounds) {
            log::debug!("expand {} {:?} rejected: overlap", from.id, dir);
            return Err(ExpandError::Overlap(plan.bounds));
        }

        let room = self
            .state
            .add_room(plan.bounds, RoomType::Normal, Some(from.id))
            .clone();
        self.state.connect_unchecked(
            from.id,
            room.id,
            plan.from_door,
            dir.to_vec2(),
            plan.to_door,
            dir.opposite().to_vec2(),
        );
        Ok(room)
    }

    fn plan_expansion(&self, from: &Room, dir: Direction4, size: Vector2<i32>) -> Expansion {
        let width = self.state.grid.width();
        let depth = self.state.grid.depth();
        // capped at the grid extent, as in initialize
        let w = size.x.min(width - ROOM_MARGIN * 2);
        let d = size.y.min(depth - ROOM_MARGIN * 2);
        let reach = i32::try_from(self.config.corridor_length.max(1))
            .unwrap_or(i32::MAX)
            .saturating_add(1);

        let from_door = edge_door_cell(from, dir);
        let center = from.center();

        if dir.is_horizontal() {
            let room_z = clamp_lenient(center.y - d / 2, ROOM_MARGIN, depth - d - ROOM_MARGIN);
            let (room_x, door_x) = if dir == Direction4::Right {
                let near_x = from_door.x.saturating_add(reach);
                (near_x, near_x)
            } else {
                let near_x = from_door.x.saturating_sub(reach);
                (near_x.saturating_sub(w - 1), near_x)
            };
            Expansion {
                bounds: RoomBounds::new(room_x, room_z, w, d),
                from_door,
                to_door: Vector2::new(door_x, clamp_into_span(from_door.y, room_z, d)),
            }
        } else {
            let room_x = clamp_lenient(center.x - w / 2, ROOM_MARGIN, width - w - ROOM_MARGIN);
            let (room_z, door_z) = if dir == Direction4::Up {
                let near_z = from_door.y.saturating_add(reach);
                (near_z, near_z)
            } else {
                let near_z = from_door.y.saturating_sub(reach);
                (near_z.saturating_sub(d - 1), near_z)
            };
            Expansion {
                bounds: RoomBounds::new(room_x, room_z, w, d),
                from_door,
                to_door: Vector2::new(clamp_into_span(from_door.x, room_x, w), door_z),
            }
        }
    }
}

struct Expansion {
    bounds: RoomBounds,
    from_door: Vector2<i32>,
    to_door: Vector2<i32>,
}

fn edge_door_cell(room: &Room, dir: Direction4) -> Vector2<i32> {
    match dir {
        Direction4::Right => room.exit_right(),
        Direction4::Left => room.exit_left(),
        Direction4::Up => room.exit_up(),
        Direction4::Down => room.exit_down(),
    }
}

// keep off the corners when the span allows it
fn clamp_into_span(value: i32, start: i32, len: i32) -> i32 {
    let (lo, hi) = if len >= 3 {
        (start + 1, start + len - 2)
    } else {
        (start, start + len - 1)
    };
    value.clamp(lo, hi.max(lo))
}
