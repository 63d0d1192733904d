use nalgebra::Vector2;
use rand::Rng;
use std::ops::RangeInclusive;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum RoomType {
    Start,
    Normal,
    Shop,
    Boss,
    Junction,
    Bonus,
}

pub const ROOM_TYPES: &[RoomType; 6] = &[
    RoomType::Start,
    RoomType::Normal,
    RoomType::Shop,
    RoomType::Boss,
    RoomType::Junction,
    RoomType::Bonus,
];

/// Sizing bounds and connectivity preferences shared by every room of one type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RoomTypeSpec {
    pub min_size: (u32, u32), // width, depth
    pub max_size: (u32, u32), // width, depth
    pub preferred_min_degree: u32,
    pub preferred_max_degree: u32,
    pub is_main_path_required: bool,
}

impl RoomTypeSpec {
    const BASE: RoomTypeSpec = RoomTypeSpec {
        min_size: (1, 1),
        max_size: (u32::MAX, u32::MAX),
        preferred_min_degree: 2,
        preferred_max_degree: 2,
        is_main_path_required: true,
    };
}

const START: RoomTypeSpec = RoomTypeSpec {
    preferred_min_degree: 1,
    preferred_max_degree: 1,
    ..RoomTypeSpec::BASE
};
const NORMAL: RoomTypeSpec = RoomTypeSpec::BASE;
const SHOP: RoomTypeSpec = RoomTypeSpec {
    min_size: (7, 7),
    ..RoomTypeSpec::BASE
};
const BOSS: RoomTypeSpec = RoomTypeSpec {
    min_size: (10, 10),
    preferred_min_degree: 1,
    preferred_max_degree: 1,
    ..RoomTypeSpec::BASE
};
const JUNCTION: RoomTypeSpec = RoomTypeSpec {
    preferred_max_degree: 3,
    ..RoomTypeSpec::BASE
};
const BONUS: RoomTypeSpec = RoomTypeSpec {
    max_size: (8, 8),
    preferred_min_degree: 1,
    preferred_max_degree: 1,
    is_main_path_required: false,
    ..RoomTypeSpec::BASE
};

impl RoomType {
    pub fn spec(self) -> &'static RoomTypeSpec {
        match self {
            RoomType::Start => &START,
            RoomType::Normal => &NORMAL,
            RoomType::Shop => &SHOP,
            RoomType::Boss => &BOSS,
            RoomType::Junction => &JUNCTION,
            RoomType::Bonus => &BONUS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RoomType::Start => "Start",
            RoomType::Normal => "Normal",
            RoomType::Shop => "Shop",
            RoomType::Boss => "Boss",
            RoomType::Junction => "Junction",
            RoomType::Bonus => "Bonus",
        }
    }

    /// Legend colour for debug renderers, as RGB in `0.0..=1.0`.
    pub fn debug_color(self) -> (f32, f32, f32) {
        match self {
            RoomType::Start => (0.0, 1.0, 0.0),
            RoomType::Normal => (0.5, 0.5, 0.5),
            RoomType::Shop => (1.0, 0.92, 0.016),
            RoomType::Boss => (1.0, 0.0, 0.0),
            RoomType::Junction => (0.85, 0.85, 0.85),
            RoomType::Bonus => (0.0, 1.0, 1.0),
        }
    }

    // single-letter tag for ascii dumps
    pub fn symbol(self) -> char {
        match self {
            RoomType::Start => 'S',
            RoomType::Normal => 'N',
            RoomType::Shop => '$',
            RoomType::Boss => 'B',
            RoomType::Junction => 'J',
            RoomType::Bonus => '+',
        }
    }
}

/// Intersects the caller's size range with the type's own bounds. An inverted result
/// collapses to its minimum.
pub fn room_size_range(
    room_type: RoomType,
    width_range: &RangeInclusive<u32>,
    depth_range: &RangeInclusive<u32>,
) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
    let spec = room_type.spec();
    let axis = |range: &RangeInclusive<u32>, type_min: u32, type_max: u32| {
        let min = (*range.start()).max(type_min);
        let max = (*range.end()).min(type_max).max(min);
        let to_i32 = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        to_i32(min)..=to_i32(max)
    };
    (
        axis(width_range, spec.min_size.0, spec.max_size.0),
        axis(depth_range, spec.min_size.1, spec.max_size.1),
    )
}

pub fn sample_room_size<R: Rng>(
    rng: &mut R,
    room_type: RoomType,
    width_range: &RangeInclusive<u32>,
    depth_range: &RangeInclusive<u32>,
) -> Vector2<i32> {
    let (w, d) = room_size_range(room_type, width_range, depth_range);
    Vector2::new(rng.gen_range(w), rng.gen_range(d))
}
