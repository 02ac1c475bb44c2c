//! Tile layers for rendering the walkable world.
//!
//! Tiles are stored in row-major order with the origin at the top-left
//! (Y grows downward, matching Tiled maps). Rendering is culled to the
//! camera's visible rectangle.

use crate::components::layer::RenderLayer;
use crate::components::sprite::AtlasId;
use crate::core::geometry::Rect;
use crate::renderer::instance::RenderInstance;
use glam::Vec2;

/// A single non-empty tile: its cell in the tileset atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub col: f32,
    pub row: f32,
}

impl Tile {
    pub fn new(col: f32, row: f32) -> Self {
        Self { col, row }
    }
}

/// One tile layer of the world.
#[derive(Debug, Clone)]
pub struct TilemapComponent {
    pub name: String,
    /// Width of the layer in tiles.
    pub width: u32,
    /// Height of the layer in tiles.
    pub height: u32,
    /// Size of each tile in world units.
    pub tile_size: f32,
    pub atlas: AtlasId,
    pub layer: RenderLayer,
    /// World-space position of the top-left corner.
    pub origin: Vec2,
    tiles: Vec<Option<Tile>>,
}

impl TilemapComponent {
    /// Create a new empty layer.
    pub fn new(name: impl Into<String>, width: u32, height: u32, tile_size: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            tile_size,
            atlas: AtlasId(0),
            layer: RenderLayer::Below,
            origin: Vec2::ZERO,
            tiles: vec![None; (width * height) as usize],
        }
    }

    pub fn with_atlas(mut self, atlas: AtlasId) -> Self {
        self.atlas = atlas;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[(y * self.width + x) as usize].as_ref()
    }

    pub fn set(&mut self, x: u32, y: u32, tile: Option<Tile>) {
        if x < self.width && y < self.height {
            self.tiles[(y * self.width + x) as usize] = tile;
        }
    }

    /// World-space bounds of the layer.
    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.origin,
            size: Vec2::new(
                self.width as f32 * self.tile_size,
                self.height as f32 * self.tile_size,
            ),
        }
    }

    /// Convert a tile coordinate to its world-space center.
    pub fn tile_to_world(&self, x: u32, y: u32) -> Vec2 {
        let half = self.tile_size / 2.0;
        self.origin + Vec2::new(
            x as f32 * self.tile_size + half,
            y as f32 * self.tile_size + half,
        )
    }

    /// Append instances for the tiles intersecting `visible`.
    pub fn push_visible_instances(&self, visible: &Rect, out: &mut Vec<RenderInstance>) {
        let local_min = visible.min - self.origin;
        let local_max = visible.max() - self.origin;

        let min_tx = ((local_min.x / self.tile_size).floor() as i32).max(0) as u32;
        let min_ty = ((local_min.y / self.tile_size).floor() as i32).max(0) as u32;
        let max_tx = (((local_max.x / self.tile_size).ceil() as i32).max(0) as u32).min(self.width);
        let max_ty = (((local_max.y / self.tile_size).ceil() as i32).max(0) as u32).min(self.height);

        for ty in min_ty..max_ty {
            for tx in min_tx..max_tx {
                if let Some(tile) = self.get(tx, ty) {
                    let center = self.tile_to_world(tx, ty);
                    out.push(RenderInstance {
                        x: center.x,
                        y: center.y,
                        width: self.tile_size,
                        height: self.tile_size,
                        atlas: self.atlas.0 as f32,
                        col: tile.col,
                        row: tile.row,
                        alpha: 1.0,
                    });
                }
            }
        }
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}
