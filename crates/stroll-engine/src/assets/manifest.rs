use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing all atlases, named frames and frame animations.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases.
    pub atlases: Vec<AtlasDescriptor>,
    /// Named sprite lookup: name → atlas index + cell coordinates.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    /// Named animations built from sprite frames.
    #[serde(default)]
    pub animations: HashMap<String, AnimationDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "tiles").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the PNG file (e.g., "killjoy.png").
    pub path: String,
}

/// Describes a named sprite within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
}

/// A frame animation. Frames are either listed in `frames` or generated as
/// `prefix` + zero-padded numbers `start..=end` (e.g. `misa-left-walk.000`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    #[serde(default)]
    pub frames: Vec<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub zero_pad: usize,
    #[serde(default = "default_fps")]
    pub fps: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_fps() -> f32 {
    10.0
}

fn default_looping() -> bool {
    true
}

impl AnimationDescriptor {
    /// Frame names in playback order.
    pub fn frame_names(&self) -> Vec<String> {
        match &self.prefix {
            Some(prefix) if self.frames.is_empty() => (self.start..=self.end)
                .map(|i| format!("{}{:0width$}", prefix, i, width = self.zero_pad))
                .collect(),
            _ => self.frames.clone(),
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "tiles", "cols": 16, "rows": 8, "path": "tiles.png" }
            ],
            "sprites": {
                "misa-front": { "atlas": 0, "col": 0, "row": 0 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.atlases.len(), 1);
        assert_eq!(manifest.atlases[0].cols, 16);
        assert_eq!(manifest.sprites["misa-front"].atlas, 0);
        assert!(manifest.animations.is_empty());
    }

    #[test]
    fn generated_frame_names_are_zero_padded() {
        let json = r#"{
            "atlases": [],
            "animations": {
                "misa-left-walk": { "prefix": "misa-left-walk.", "start": 0, "end": 3, "zero_pad": 3 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let walk = &manifest.animations["misa-left-walk"];
        assert_eq!(walk.fps, 10.0);
        assert!(walk.looping);
        assert_eq!(
            walk.frame_names(),
            ["misa-left-walk.000", "misa-left-walk.001", "misa-left-walk.002", "misa-left-walk.003"]
        );
    }

    #[test]
    fn explicit_frames_win_over_prefix() {
        let anim = AnimationDescriptor {
            frames: vec!["a".into(), "b".into()],
            prefix: Some("x".into()),
            start: 0,
            end: 9,
            zero_pad: 0,
            fps: 5.0,
            looping: false,
        };
        assert_eq!(anim.frame_names(), ["a", "b"]);
    }
}
