use crate::bounds::{clamp_lenient, RoomBounds};
use crate::constants::Direction4;
use crate::dataset::DungeonDataset;
use crate::layout::LayoutState;
use crate::room::{Room, RoomId};
use crate::room_type::{sample_room_size, RoomType};
use nalgebra::Vector2;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

const JUNCTION_PICK_ATTEMPTS: usize = 20;
const BONUS_GAP: i32 = 3;
const MAIN_PATH_START_X: i32 = 2;
const MAIN_PATH_MARGIN: i32 = 2;

#[derive(Debug, Clone)]
pub struct LayoutGeneratorConfig {
    pub width: u32,                          // Width of the grid (x-axis)
    pub depth: u32,                          // Depth of the grid (z-axis)
    pub main_room_count: usize,              // Rooms planned from Start to Boss
    pub room_width_range: RangeInclusive<u32>,
    pub room_depth_range: RangeInclusive<u32>,
    pub corridor_step_x: u32,                // Horizontal gap left after each room (min 1)
    pub corridor_width: u32,
    pub z_drift: u32,                        // Max vertical wander between neighbours
    pub seed: Option<u64>,                   // Seed value for random dungeon generation
}

impl Default for LayoutGeneratorConfig {
    fn default() -> Self {
        LayoutGeneratorConfig {
            width: 160,
            depth: 160,
            main_room_count: 7,
            room_width_range: 12..=20,
            room_depth_range: 12..=20,
            corridor_step_x: 8,
            corridor_width: 3,
            z_drift: 12,
            seed: None,
        }
    }
}

/// Builds a whole dungeon in one pass: a left-to-right main path from Start to Boss plus at
/// most one bonus room hanging off a junction.
///
/// Running out of room is not an error. The main path is truncated where it stops fitting and
/// the bonus branch is skipped when it cannot be placed.
pub fn generate_layout(config: LayoutGeneratorConfig) -> DungeonDataset {
    let mut rng: rand::rngs::StdRng = config
        .seed
        .map(SeedableRng::seed_from_u64)
        .unwrap_or_else(rand::rngs::StdRng::from_entropy);

    let mut state = LayoutState::new(config.width, config.depth, config.corridor_width);

    let planned_count = config.main_room_count;
    let shop_index = planned_count / 2;
    let junction_index = if planned_count >= 4 {
        pick_junction_index(&mut rng, planned_count, shop_index)
    } else {
        None
    };

    let main_path = place_main_path(
        &config,
        &mut rng,
        &mut state,
        planned_count,
        shop_index,
        junction_index,
    );
    connect_main_path(&mut state, &main_path);

    if let Some(parent_id) = junction_index.and_then(|index| main_path.get(index).copied()) {
        let is_junction = state
            .room(parent_id)
            .is_some_and(|room| room.room_type == RoomType::Junction);
        if is_junction {
            place_bonus_branch(&config, &mut rng, &mut state, parent_id);
        }
    }

    state.snapshot()
}

fn planned_room_type(
    index: usize,
    planned_count: usize,
    shop_index: usize,
    junction_index: Option<usize>,
) -> RoomType {
    if index == 0 {
        RoomType::Start
    } else if index == planned_count - 1 {
        RoomType::Boss
    } else if index == shop_index {
        RoomType::Shop
    } else if Some(index) == junction_index {
        RoomType::Junction
    } else {
        RoomType::Normal
    }
}

fn pick_junction_index<R: Rng>(
    rng: &mut R,
    planned_count: usize,
    shop_index: usize,
) -> Option<usize> {
    let last_index = planned_count.checked_sub(1)?;
    if last_index <= 1 {
        return None;
    }
    for _ in 0..JUNCTION_PICK_ATTEMPTS {
        let index = rng.gen_range(1..last_index);
        if index != shop_index {
            return Some(index);
        }
    }
    Some(if shop_index == 1 { 2 } else { 1 })
}

fn place_main_path<R: Rng>(
    config: &LayoutGeneratorConfig,
    rng: &mut R,
    state: &mut LayoutState,
    planned_count: usize,
    shop_index: usize,
    junction_index: Option<usize>,
) -> Vec<RoomId> {
    let width = state.grid.width();
    let depth = state.grid.depth();
    let z_drift = i32::try_from(config.z_drift).unwrap_or(i32::MAX);
    // at least one empty column between neighbours
    let step = i32::try_from(config.corridor_step_x.max(1)).unwrap_or(i32::MAX);

    let mut main_path: Vec<RoomId> = Vec::with_capacity(planned_count);
    let mut cursor_x = MAIN_PATH_START_X;

    for index in 0..planned_count {
        let room_type = planned_room_type(index, planned_count, shop_index, junction_index);
        let size = sample_room_size(
            rng,
            room_type,
            &config.room_width_range,
            &config.room_depth_range,
        );
        let (w, d) = (size.x, size.y);

        if cursor_x.saturating_add(w).saturating_add(MAIN_PATH_MARGIN) >= width {
            log::debug!("main path truncated at {}/{}: out of width", index, planned_count);
            break;
        }

        let z_min_base = MAIN_PATH_MARGIN;
        let z_max_base = depth.saturating_sub(d).saturating_sub(MAIN_PATH_MARGIN);
        if z_min_base >= z_max_base {
            log::debug!("main path truncated at {}/{}: out of depth", index, planned_count);
            break;
        }

        let prev_z_center = main_path
            .last()
            .and_then(|id| state.room(*id))
            .map(|room| room.center().y)
            .unwrap_or(depth / 2);
        let target_z = prev_z_center - d / 2;
        let z_min = clamp_lenient(target_z.saturating_sub(z_drift), z_min_base, z_max_base);
        let z_max = clamp_lenient(target_z.saturating_add(z_drift), z_min_base, z_max_base);
        let z = rng.gen_range(z_min..=z_max);

        let room = state.add_room(RoomBounds::new(cursor_x, z, w, d), room_type, None);
        main_path.push(room.id);

        cursor_x = cursor_x.saturating_add(w).saturating_add(step);
    }

    if let Some(last_id) = main_path.last().copied() {
        if state.room(last_id).map(|room| room.room_type) != Some(RoomType::Boss) {
            state.retype_room(last_id, RoomType::Boss);
        }
    }

    main_path
}

fn connect_main_path(state: &mut LayoutState, main_path: &[RoomId]) {
    for pair in main_path.windows(2) {
        let (Some(a), Some(b)) = (state.room(pair[0]), state.room(pair[1])) else {
            continue;
        };
        let (from, to) = (a.exit_right(), b.exit_left());
        if let Err(e) = state.connect(
            pair[0],
            pair[1],
            from,
            Direction4::Right.to_vec2(),
            to,
            Direction4::Left.to_vec2(),
        ) {
            log::debug!("main path link {} -> {} skipped: {}", pair[0], pair[1], e);
        }
    }
}

fn place_bonus_branch<R: Rng>(
    config: &LayoutGeneratorConfig,
    rng: &mut R,
    state: &mut LayoutState,
    parent_id: RoomId,
) {
    let Some(parent) = state.room(parent_id).cloned() else {
        return;
    };
    if !state.has_degree_headroom(parent_id) {
        log::debug!("bonus room skipped: junction {} is saturated", parent_id);
        return;
    }

    let size = sample_room_size(
        rng,
        RoomType::Bonus,
        &config.room_width_range,
        &config.room_depth_range,
    );
    let (w, d) = (size.x, size.y);
    let dir = if rng.gen_bool(0.5) {
        Direction4::Up
    } else {
        Direction4::Down
    };

    let offset_z = parent.bounds.depth / 2 + d / 2 + BONUS_GAP;
    let center = parent.center() + dir.to_vec2() * offset_z;
    let bounds = RoomBounds::new(center.x - w / 2, center.y - d / 2, w, d);

    if !state.can_place(&bounds) {
        log::debug!("bonus room skipped: no space {:?} of junction {}", dir, parent_id);
        return;
    }

    let bonus = state
        .add_room(bounds, RoomType::Bonus, Some(parent_id))
        .clone();
    let (from, to) = facing_cells(&parent, &bonus, dir);
    if let Err(e) = state.connect(
        parent_id,
        bonus.id,
        from,
        dir.to_vec2(),
        to,
        dir.opposite().to_vec2(),
    ) {
        log::debug!("bonus room {} left unconnected: {}", bonus.id, e);
    }
}

// door cells on the facing horizontal edges, each at its own room's center column
fn facing_cells(parent: &Room, child: &Room, dir: Direction4) -> (Vector2<i32>, Vector2<i32>) {
    match dir {
        Direction4::Down => (parent.exit_down(), child.exit_up()),
        _ => (parent.exit_up(), child.exit_down()),
    }
}

#[cfg(test)]
mod tests {
    use crate::generate_layout::{generate_layout, pick_junction_index, LayoutGeneratorConfig};
    use crate::room::RoomId;
    use crate::room_type::RoomType;
    use rand::SeedableRng;

    fn scenario(seed: u64) -> LayoutGeneratorConfig {
        LayoutGeneratorConfig {
            width: 80,
            depth: 40,
            main_room_count: 7,
            room_width_range: 4..=6,
            room_depth_range: 4..=6,
            corridor_step_x: 4,
            corridor_width: 3,
            z_drift: 6,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_seven_room_main_path() {
        for seed in 0..20 {
            let dataset = generate_layout(scenario(seed));
            let main = dataset
                .rooms()
                .iter()
                .filter(|room| room.room_type != RoomType::Bonus)
                .collect::<Vec<_>>();
            assert_eq!(main.len(), 7);
            assert_eq!(main[0].room_type, RoomType::Start);
            assert_eq!(main[3].room_type, RoomType::Shop);
            assert_eq!(main[6].room_type, RoomType::Boss);
            assert_eq!(
                main.iter()
                    .filter(|room| room.room_type == RoomType::Junction)
                    .count(),
                1
            );
            for pair in main.windows(2) {
                assert!(pair[0].bounds.x_max() <= pair[1].bounds.x);
            }

            let bonus_rooms = dataset.rooms().len() - main.len();
            assert!(bonus_rooms <= 1);
            assert_eq!(dataset.doors().len(), 12 + bonus_rooms * 2);
            assert_eq!(
                dataset.rooms_reachable_from(RoomId::first()).len(),
                dataset.rooms().len()
            );
            assert!(dataset.floor_connects_all_rooms());
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        assert_eq!(generate_layout(scenario(42)), generate_layout(scenario(42)));
    }

    #[test]
    fn test_bonus_room_hangs_off_junction() {
        let mut found = false;
        for seed in 0..50 {
            let dataset = generate_layout(scenario(seed));
            let Some(bonus) = dataset
                .rooms()
                .iter()
                .find(|room| room.room_type == RoomType::Bonus)
            else {
                continue;
            };
            found = true;
            let parent_id = bonus.parent.unwrap();
            let parent = dataset.room(parent_id).unwrap();
            assert_eq!(parent.room_type, RoomType::Junction);
            assert_eq!(dataset.degree(parent_id), 3);
            assert_eq!(dataset.degree(bonus.id), 1);
            assert_eq!(bonus.center().x, parent.center().x);
        }
        assert!(found, "no seed produced a bonus room");
    }

    #[test]
    fn test_truncated_path_still_ends_in_boss() {
        let dataset = generate_layout(LayoutGeneratorConfig {
            width: 40,
            depth: 30,
            main_room_count: 9,
            room_width_range: 6..=8,
            room_depth_range: 6..=8,
            seed: Some(7),
            ..Default::default()
        });
        let main = dataset
            .rooms()
            .iter()
            .filter(|room| room.room_type != RoomType::Bonus)
            .collect::<Vec<_>>();
        let bonus_rooms = dataset.rooms().len() - main.len();
        assert!(!main.is_empty() && main.len() < 9);
        assert_eq!(main.last().unwrap().room_type, RoomType::Boss);
        assert_eq!(
            dataset.doors().len(),
            (main.len() - 1) * 2 + bonus_rooms * 2
        );
    }

    #[test]
    fn test_single_room_is_boss() {
        let dataset = generate_layout(LayoutGeneratorConfig {
            main_room_count: 1,
            seed: Some(1),
            ..Default::default()
        });
        assert_eq!(dataset.rooms().len(), 1);
        assert_eq!(dataset.rooms()[0].room_type, RoomType::Boss);
        assert!(dataset.doors().is_empty());
    }

    #[test]
    fn test_grid_too_small_gives_empty_layout() {
        let dataset = generate_layout(LayoutGeneratorConfig {
            width: 8,
            depth: 8,
            seed: Some(0),
            ..Default::default()
        });
        assert!(dataset.rooms().is_empty());
        assert_eq!(dataset.grid().floor_count(), 0);
    }

    #[test]
    fn test_junction_pick_avoids_reserved_indices() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for count in 4..12 {
            let shop = count / 2;
            for _ in 0..50 {
                let index = pick_junction_index(&mut rng, count, shop).unwrap();
                assert!(index != 0 && index != shop && index != count - 1);
            }
        }
        assert_eq!(pick_junction_index(&mut rng, 2, 1), None);
    }
}
