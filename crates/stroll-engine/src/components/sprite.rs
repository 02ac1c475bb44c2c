/// Identifies which texture atlas a sprite belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Sprite component: one atlas cell drawn at the entity's position.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Which atlas this sprite belongs to.
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl SpriteComponent {
    pub fn new(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self {
            atlas,
            col,
            row,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Point this sprite at another cell of the same atlas.
    pub fn set_cell(&mut self, col: f32, row: f32) {
        self.col = col;
        self.row = row;
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::new(AtlasId(0), 0.0, 0.0)
    }
}
