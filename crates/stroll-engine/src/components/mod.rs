pub mod animation;
pub mod avatar;
pub mod entity;
pub mod layer;
pub mod sprite;
pub mod tilemap;
