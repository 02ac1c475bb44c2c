use glam::Vec2;
use crate::core::geometry::Rect;

/// Solid-tile grid built from the world's collision layer.
///
/// Answers "is this box blocked by world geometry" and performs
/// axis-separated moves that stop on whichever axis would hit a wall.
/// Everything outside the grid counts as solid.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionGrid {
    width: u32,
    height: u32,
    tile_size: f32,
    solid: Vec<bool>,
}

impl CollisionGrid {
    /// A grid with no solid tiles.
    pub fn open(width: u32, height: u32, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            solid: vec![false; (width * height) as usize],
        }
    }

    /// Build from row-major tile flags. Missing trailing cells are open.
    pub fn from_flags(width: u32, height: u32, tile_size: f32, flags: impl IntoIterator<Item = bool>) -> Self {
        let mut grid = Self::open(width, height, tile_size);
        for (cell, flag) in grid.solid.iter_mut().zip(flags) {
            *cell = flag;
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn set_solid(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.solid[(y * self.width + x) as usize] = solid;
        }
    }

    pub fn is_solid(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.solid[(y * self.width + x) as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }

    /// World-space extent of the grid.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// Whether `rect` overlaps a solid tile or leaves the grid.
    pub fn is_blocked(&self, rect: &Rect) -> bool {
        let bounds = self.bounds();
        let max = rect.max();
        if rect.min.x < bounds.min.x
            || rect.min.y < bounds.min.y
            || max.x > bounds.max().x
            || max.y > bounds.max().y
        {
            return true;
        }
        let min_tx = (rect.min.x / self.tile_size).floor() as u32;
        let min_ty = (rect.min.y / self.tile_size).floor() as u32;
        // Exclusive upper edge: a box ending exactly on a tile line stays out of that tile.
        let max_tx = ((max.x / self.tile_size).ceil() as u32).min(self.width);
        let max_ty = ((max.y / self.tile_size).ceil() as u32).min(self.height);
        (min_ty..max_ty).any(|ty| (min_tx..max_tx).any(|tx| self.is_solid(tx, ty)))
    }

    /// Move `rect` by `delta`, one axis at a time.
    ///
    /// Returns the delta actually applied and which axes were blocked.
    pub fn sweep(&self, rect: &Rect, delta: Vec2) -> (Vec2, [bool; 2]) {
        let mut applied = Vec2::ZERO;
        let mut blocked = [false, false];

        if delta.x != 0.0 {
            let moved = rect.translate(Vec2::new(delta.x, 0.0));
            if self.is_blocked(&moved) {
                blocked[0] = true;
            } else {
                applied.x = delta.x;
            }
        }
        if delta.y != 0.0 {
            let moved = rect.translate(Vec2::new(applied.x, delta.y));
            if self.is_blocked(&moved) {
                blocked[1] = true;
            } else {
                applied.y = delta.y;
            }
        }
        (applied, blocked)
    }

    /// Horizontal runs of solid tiles as world rectangles, one per run.
    /// Used to build a small number of static colliders.
    pub fn solid_runs(&self) -> Vec<Rect> {
        let mut runs = Vec::new();
        for ty in 0..self.height {
            let mut tx = 0;
            while tx < self.width {
                if !self.is_solid(tx, ty) {
                    tx += 1;
                    continue;
                }
                let start = tx;
                while tx < self.width && self.is_solid(tx, ty) {
                    tx += 1;
                }
                runs.push(Rect::new(
                    start as f32 * self.tile_size,
                    ty as f32 * self.tile_size,
                    (tx - start) as f32 * self.tile_size,
                    self.tile_size,
                ));
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled() -> CollisionGrid {
        // 4x3 grid, solid column at x = 2
        let mut grid = CollisionGrid::open(4, 3, 32.0);
        for y in 0..3 {
            grid.set_solid(2, y, true);
        }
        grid
    }

    #[test]
    fn open_space_is_not_blocked() {
        let grid = walled();
        assert!(!grid.is_blocked(&Rect::new(2.0, 2.0, 30.0, 30.0)));
    }

    #[test]
    fn box_touching_wall_edge_is_not_blocked() {
        let grid = walled();
        assert!(!grid.is_blocked(&Rect::new(34.0, 0.0, 30.0, 30.0)));
        assert!(grid.is_blocked(&Rect::new(35.0, 0.0, 30.0, 30.0)));
    }

    #[test]
    fn leaving_the_grid_is_blocked() {
        let grid = walled();
        assert!(grid.is_blocked(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
        assert!(grid.is_blocked(&Rect::new(0.0, 90.0, 10.0, 10.0)));
    }

    #[test]
    fn sweep_slides_along_wall() {
        let grid = walled();
        let rect = Rect::new(30.0, 10.0, 30.0, 30.0);
        let (applied, blocked) = grid.sweep(&rect, Vec2::new(8.0, 5.0));
        assert_eq!(applied, Vec2::new(0.0, 5.0));
        assert_eq!(blocked, [true, false]);
    }

    #[test]
    fn solid_runs_merge_rows() {
        let mut grid = CollisionGrid::open(5, 2, 10.0);
        grid.set_solid(1, 0, true);
        grid.set_solid(2, 0, true);
        grid.set_solid(4, 0, true);
        grid.set_solid(0, 1, true);
        let runs = grid.solid_runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], Rect::new(10.0, 0.0, 20.0, 10.0));
        assert_eq!(runs[2], Rect::new(0.0, 10.0, 10.0, 10.0));
    }

    #[test]
    fn from_flags_is_row_major() {
        let grid = CollisionGrid::from_flags(2, 2, 16.0, [false, true, false, false]);
        assert!(grid.is_solid(1, 0));
        assert!(!grid.is_solid(0, 1));
        assert_eq!(grid.solid_count(), 1);
    }
}
