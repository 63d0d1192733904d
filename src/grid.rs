use crate::bounds::RoomBounds;
use crate::constants::Cell;
use nalgebra::Vector2;
use std::fmt;

/// Fixed-size occupancy map. Carving only ever turns `Empty` into `Floor`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    depth: i32,
    cells: Vec<Cell>, // row-major by z
}

impl Grid {
    pub fn new(width: u32, depth: u32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let depth = i32::try_from(depth).unwrap_or(i32::MAX);
        Self {
            width,
            depth,
            cells: vec![Cell::Empty; width as usize * depth as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn in_bounds(&self, point: &Vector2<i32>) -> bool {
        0 <= point.x && point.x < self.width && 0 <= point.y && point.y < self.depth
    }

    /// Out-of-range points read as `Empty`.
    pub fn get(&self, point: &Vector2<i32>) -> Cell {
        if self.in_bounds(point) {
            self.cells[self.index(point)]
        } else {
            Cell::Empty
        }
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Floor).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Whether `b` keeps at least one empty cell between itself and every grid edge.
    pub fn contains_with_border(&self, b: &RoomBounds) -> bool {
        b.x >= 1 && b.z >= 1 && b.x_max() < self.width - 1 && b.z_max() < self.depth - 1
    }

    pub fn carve_room(&mut self, b: &RoomBounds) {
        for p in b.cells() {
            self.carve(&p);
        }
    }

    /// Carves a horizontal run along `from`'s row, then a vertical run along `to`'s
    /// column, each widened to a `corridor_width` square brush.
    pub fn carve_l_corridor(
        &mut self,
        from: &Vector2<i32>,
        to: &Vector2<i32>,
        corridor_width: u32,
    ) {
        let radius = (corridor_width / 2) as i32;
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            self.carve_wide(&Vector2::new(x, from.y), radius);
        }
        for z in from.y.min(to.y)..=from.y.max(to.y) {
            self.carve_wide(&Vector2::new(to.x, z), radius);
        }
    }

    fn carve_wide(&mut self, center: &Vector2<i32>, radius: i32) {
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                self.carve(&(center + Vector2::new(dx, dz)));
            }
        }
    }

    fn carve(&mut self, point: &Vector2<i32>) {
        if self.in_bounds(point) {
            let index = self.index(point);
            self.cells[index] = Cell::Floor;
        }
    }

    #[inline]
    fn index(&self, point: &Vector2<i32>) -> usize {
        point.y as usize * self.width as usize + point.x as usize
    }
}

// '#' empty, '.' floor; highest z first so "up" reads as up
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows().collect::<Vec<_>>().into_iter().rev() {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '#',
                    Cell::Floor => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
