//! Tiled (`.tmj`) world maps.
//!
//! Only what the engine consumes is parsed: map and tile size, tile layers,
//! object layers, and per-tile `collides` properties from embedded tilesets.

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::components::layer::RenderLayer;
use crate::components::sprite::AtlasId;
use crate::components::tilemap::{Tile, TilemapComponent};
use crate::core::collision::CollisionGrid;
use crate::core::geometry::Rect;

/// Width/height given to point objects and zero-sized rectangles.
pub const DEFAULT_OBJECT_SIZE: f32 = 32.0;

/// Tiled stores flip flags in the top bits of a gid.
const GID_MASK: u32 = 0x1FFF_FFFF;

/// Fatal problems while setting up a world. Missing named objects are not errors.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("invalid world JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tile layer '{0}' not found")]
    MissingLayer(String),
    #[error("world has no tilesets")]
    MissingTileset,
    #[error("tile layer '{name}' has {actual} cells, expected {expected}")]
    LayerSize {
        name: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorldMap {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    #[serde(default)]
    pub layers: Vec<MapLayer>,
    #[serde(default)]
    pub tilesets: Vec<Tileset>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum MapLayer {
    #[serde(rename = "tilelayer")]
    Tiles(TileLayer),
    #[serde(rename = "objectgroup")]
    Objects(ObjectLayer),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major gids; 0 is empty.
    #[serde(default)]
    pub data: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectLayer {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

/// A named object. `x`/`y` is the top-left corner for rectangles.
#[derive(Debug, Clone, Deserialize)]
pub struct MapObject {
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl MapObject {
    /// World rectangle of the object; zero sizes fall back to `DEFAULT_OBJECT_SIZE`.
    pub fn rect(&self) -> Rect {
        let w = if self.width > 0.0 { self.width } else { DEFAULT_OBJECT_SIZE };
        let h = if self.height > 0.0 { self.height } else { DEFAULT_OBJECT_SIZE };
        Rect::new(self.x, self.y, w, h)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tileset {
    #[serde(rename = "firstgid")]
    pub first_gid: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default)]
    pub tiles: Vec<TileInfo>,
}

fn default_columns() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileInfo {
    pub id: u32,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Tileset {
    fn collides(&self, local_id: u32) -> bool {
        self.tiles
            .iter()
            .find(|t| t.id == local_id)
            .map(|t| {
                t.properties
                    .iter()
                    .any(|p| p.name == "collides" && p.value == serde_json::Value::Bool(true))
            })
            .unwrap_or(false)
    }
}

impl WorldMap {
    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_width as f32
    }

    /// Map extent in world units.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            (self.width * self.tile_width) as f32,
            (self.height * self.tile_height) as f32,
        )
    }

    pub fn tile_layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find_map(|l| match l {
            MapLayer::Tiles(t) if t.name == name => Some(t),
            _ => None,
        })
    }

    pub fn object_layer(&self, name: &str) -> Option<&ObjectLayer> {
        self.layers.iter().find_map(|l| match l {
            MapLayer::Objects(o) if o.name == name => Some(o),
            _ => None,
        })
    }

    pub fn tileset(&self, name: &str) -> Option<&Tileset> {
        self.tilesets.iter().find(|t| t.name == name)
    }

    /// First object called `name` in object layer `layer`.
    pub fn find_object(&self, layer: &str, name: &str) -> Option<&MapObject> {
        self.object_layer(layer)?.objects.iter().find(|o| o.name == name)
    }

    /// Rectangle of a named object, if it exists.
    pub fn region(&self, layer: &str, name: &str) -> Option<Rect> {
        self.find_object(layer, name).map(MapObject::rect)
    }

    /// Position of a named point object, or `fallback` when absent.
    pub fn spawn_point(&self, layer: &str, name: &str, fallback: Vec2) -> Vec2 {
        match self.find_object(layer, name) {
            Some(obj) => Vec2::new(obj.x, obj.y),
            None => {
                log::debug!("spawn point '{}' not found, using {:?}", name, fallback);
                fallback
            }
        }
    }

    /// The tileset owning `gid` and the tile's local id within it.
    fn tileset_for(&self, gid: u32) -> Option<(usize, &Tileset, u32)> {
        let gid = gid & GID_MASK;
        if gid == 0 {
            return None;
        }
        self.tilesets
            .iter()
            .enumerate()
            .filter(|(_, ts)| ts.first_gid <= gid)
            .max_by_key(|(_, ts)| ts.first_gid)
            .map(|(i, ts)| (i, ts, gid - ts.first_gid))
    }

    /// Whether tile `gid` has `collides: true` in its tileset.
    pub fn is_collidable(&self, gid: u32) -> bool {
        self.tileset_for(gid)
            .map(|(_, ts, local)| ts.collides(local))
            .unwrap_or(false)
    }

    fn checked_layer(&self, name: &str) -> Result<&TileLayer, WorldError> {
        let layer = self
            .tile_layer(name)
            .ok_or_else(|| WorldError::MissingLayer(name.to_string()))?;
        let expected = (layer.width * layer.height) as usize;
        if layer.data.len() != expected {
            return Err(WorldError::LayerSize {
                name: name.to_string(),
                expected,
                actual: layer.data.len(),
            });
        }
        Ok(layer)
    }

    /// Solid-tile grid from the `collides` tiles of layer `name`.
    pub fn collision_grid(&self, name: &str) -> Result<CollisionGrid, WorldError> {
        if self.tilesets.is_empty() {
            return Err(WorldError::MissingTileset);
        }
        let layer = self.checked_layer(name)?;
        let grid = CollisionGrid::from_flags(
            layer.width,
            layer.height,
            self.tile_size(),
            layer.data.iter().map(|gid| self.is_collidable(*gid)),
        );
        log::debug!("collision grid '{}': {} solid tiles", name, grid.solid_count());
        Ok(grid)
    }

    /// Renderable tile layer `name`. The layer draws from the atlas of the
    /// tileset its first tile belongs to (`base_atlas + index`); tiles of
    /// other tilesets are skipped.
    pub fn tilemap(
        &self,
        name: &str,
        base_atlas: AtlasId,
        render_layer: RenderLayer,
    ) -> Result<TilemapComponent, WorldError> {
        if self.tilesets.is_empty() {
            return Err(WorldError::MissingTileset);
        }
        let layer = self.checked_layer(name)?;
        let mut map = TilemapComponent::new(name, layer.width, layer.height, self.tile_size())
            .with_atlas(base_atlas)
            .with_layer(render_layer);
        let mut layer_tileset = None;
        let mut skipped = 0usize;
        for (i, gid) in layer.data.iter().enumerate() {
            if let Some((ts_index, ts, local)) = self.tileset_for(*gid) {
                let owner = *layer_tileset.get_or_insert(ts_index);
                if owner != ts_index {
                    skipped += 1;
                    continue;
                }
                map.atlas = AtlasId(base_atlas.0 + ts_index as u32);
                let columns = ts.columns.max(1);
                let tile = Tile::new((local % columns) as f32, (local / columns) as f32);
                map.set(i as u32 % layer.width, i as u32 / layer.width, Some(tile));
            }
        }
        if skipped > 0 {
            log::warn!("tile layer '{}': {} tiles from a second tileset skipped", name, skipped);
        }
        Ok(map)
    }
}
