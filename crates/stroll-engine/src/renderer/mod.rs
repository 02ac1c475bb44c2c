pub mod camera;
pub mod instance;
pub mod viewport;

pub use camera::Camera2D;
pub use instance::{RenderBuffer, RenderInstance};
pub use viewport::ZoomPolicy;
