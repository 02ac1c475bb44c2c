//! Bitmap font text rendering system.
//!
//! Renders text using the existing sprite pipeline: each character becomes an
//! Entity with a SpriteComponent pointing to the appropriate glyph in a font atlas.
//!
//! Font atlases are standard sprite atlases with characters laid out in ASCII order,
//! typically 16 columns × 6 rows for printable ASCII (32-127).

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::sprite::{AtlasId, SpriteComponent};
use crate::core::geometry::Rect;
use crate::core::scene::Scene;
use glam::Vec2;

/// Configuration for a bitmap font atlas.
///
/// The atlas is a grid of character glyphs laid out in ASCII order,
/// starting from `start_char` (typically 32 = space).
#[derive(Debug, Clone)]
pub struct FontConfig {
    /// Which atlas contains the font glyphs.
    pub atlas: AtlasId,
    /// Number of columns in the font atlas grid.
    pub cols: u32,
    /// Number of rows in the font atlas grid.
    pub rows: u32,
    /// First ASCII code in the atlas (typically 32 = space).
    pub start_char: u8,
    /// Horizontal advance as fraction of character size (e.g., 0.55 for tight, 1.0 for monospace).
    pub spacing: f32,
    /// Layer glyph entities are spawned on.
    pub layer: RenderLayer,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            atlas: AtlasId(2), // Convention: 0 = tiles, 1 = characters, 2 = font
            cols: 16,
            rows: 6,
            start_char: 32, // space
            spacing: 0.55,
            layer: RenderLayer::Ui,
        }
    }
}

impl FontConfig {
    /// Create a new font config with the given atlas.
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }

    /// Set the grid dimensions.
    pub fn with_grid(mut self, cols: u32, rows: u32) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    /// Set the starting character (ASCII code).
    pub fn with_start_char(mut self, start_char: u8) -> Self {
        self.start_char = start_char;
        self
    }

    /// Set the character spacing.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Horizontal advance per character at `size`.
    pub fn advance(&self, size: f32) -> f32 {
        size * self.spacing
    }
}

/// Convert an ASCII character to grid coordinates (col, row) in the font atlas.
///
/// Returns `None` if the character is outside the valid range for this font.
pub fn char_to_grid(c: char, font: &FontConfig) -> Option<(f32, f32)> {
    let ascii = c as u32;
    let start = font.start_char as u32;

    if ascii < start {
        return None;
    }

    let index = ascii - start;
    let max_chars = font.cols * font.rows;

    if index >= max_chars {
        return None;
    }

    let col = (index % font.cols) as f32;
    let row = (index / font.cols) as f32;

    Some((col, row))
}

/// Greedy word wrap to lines no wider than `max_width`.
///
/// Explicit newlines always break. Words longer than a line are split.
pub fn wrap_text(text: &str, max_width: f32, size: f32, font: &FontConfig) -> Vec<String> {
    let advance = font.advance(size).max(f32::EPSILON);
    let max_chars = ((max_width / advance).floor() as usize).max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let mut word: Vec<char> = word.chars().collect();
            loop {
                let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
                if needed <= max_chars {
                    if line_len > 0 {
                        line.push(' ');
                        line_len += 1;
                    }
                    line.extend(word.iter());
                    line_len += word.len();
                    break;
                }
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                    continue;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.iter().collect());
                word = rest;
            }
        }
        lines.push(line);
    }
    lines
}

/// Build a vector of character entities for the given text.
///
/// Each printable character becomes an Entity with a SpriteComponent.
/// Characters outside the font's range are skipped.
///
/// # Arguments
/// * `text` - The text string to render
/// * `pos` - Position of the first character (top-left corner)
/// * `size` - Size of each character in world units
/// * `font` - Font configuration
/// * `tag` - Tag to assign to all character entities (for batch despawn)
/// * `id_gen` - Closure that generates unique EntityIds
pub fn build_text_entities<F>(
    text: &str,
    pos: Vec2,
    size: f32,
    font: &FontConfig,
    tag: &str,
    id_gen: &mut F,
) -> Vec<Entity>
where
    F: FnMut() -> EntityId,
{
    let mut entities = Vec::new();
    let mut cursor_x = pos.x;

    for c in text.chars() {
        if let Some((col, row)) = char_to_grid(c, font) {
            let id = id_gen();
            let entity = Entity::new(id)
                .with_tag(tag)
                .with_pos(Vec2::new(cursor_x + size / 2.0, pos.y + size / 2.0))
                .with_scale(Vec2::splat(size))
                .with_layer(font.layer)
                .with_sprite(SpriteComponent::new(font.atlas, col, row));
            entities.push(entity);
        }
        // Always advance cursor (even for skipped chars, to preserve spacing)
        cursor_x += font.advance(size);
    }

    entities
}

/// Word-wrapped text laid out inside `area`, one line every `line_height`.
/// Lines that would fall below the area are dropped.
pub fn build_wrapped_text_entities<F>(
    text: &str,
    area: &Rect,
    size: f32,
    line_height: f32,
    font: &FontConfig,
    tag: &str,
    id_gen: &mut F,
) -> Vec<Entity>
where
    F: FnMut() -> EntityId,
{
    let mut entities = Vec::new();
    for (i, line) in wrap_text(text, area.size.x, size, font).iter().enumerate() {
        let y = area.min.y + i as f32 * line_height;
        if y + size > area.max().y {
            break;
        }
        entities.extend(build_text_entities(line, Vec2::new(area.min.x, y), size, font, tag, id_gen));
    }
    entities
}

/// Despawn all entities with the given tag.
///
/// Useful for removing text that was spawned with a shared tag.
pub fn despawn_text(scene: &mut Scene, tag: &str) {
    scene.despawn_tagged(tag);
}
