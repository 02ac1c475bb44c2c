pub mod animation;
pub mod panel;
pub mod render;
pub mod text;
