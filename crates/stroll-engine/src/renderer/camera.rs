use glam::Vec2;
use crate::core::geometry::Rect;
use crate::renderer::viewport::ZoomPolicy;

/// 2D follow camera over a Y-down world.
///
/// The viewport is measured in screen pixels; `zoom` screen pixels cover one
/// world unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Camera center position in world space.
    pub center: Vec2,
    /// Screen pixels per world unit.
    pub zoom: f32,
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
    /// World rectangle the view may not leave.
    pub bounds: Option<Rect>,
}

impl Camera2D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 1.0,
            viewport: Vec2::new(viewport_width, viewport_height),
            bounds: None,
        }
    }

    /// Resize the viewport (e.g. on window resize) and recompute the zoom.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32, policy: &ZoomPolicy) {
        self.viewport = Vec2::new(viewport_width.max(1.0), viewport_height.max(1.0));
        self.zoom = policy.zoom_for_width(viewport_width);
        self.clamp_to_bounds();
    }

    /// Set world bounds for camera clamping.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        self.clamp_to_bounds();
    }

    /// Snap the camera onto `target`, respecting bounds.
    pub fn follow(&mut self, target: Vec2) {
        self.center = target;
        self.clamp_to_bounds();
    }

    /// Size of the view in world units.
    pub fn view_size(&self) -> Vec2 {
        self.viewport / self.zoom.max(f32::EPSILON)
    }

    /// The world rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_center(self.center, self.view_size())
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.center + (screen - self.viewport / 2.0) / self.zoom.max(f32::EPSILON)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.center) * self.zoom + self.viewport / 2.0
    }

    fn clamp_to_bounds(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let half = self.view_size() / 2.0;
        let min = bounds.min;
        let max = bounds.max();

        // Axes where the view is larger than the world stay centered.
        self.center.x = if half.x * 2.0 >= bounds.size.x {
            bounds.center().x
        } else {
            self.center.x.clamp(min.x + half.x, max.x - half.x)
        };
        self.center.y = if half.y * 2.0 >= bounds.size.y {
            bounds.center().y
        } else {
            self.center.y.clamp(min.y + half.y, max.y - half.y)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_applies_zoom_policy() {
        let mut cam = Camera2D::new(100.0, 100.0);
        cam.resize(1280.0, 720.0, &ZoomPolicy::default());
        assert_eq!(cam.zoom, 2.0);
        assert_eq!(cam.view_size(), Vec2::new(640.0, 360.0));

        cam.resize(410.0, 800.0, &ZoomPolicy::default());
        assert_eq!(cam.zoom, 0.75);
    }

    #[test]
    fn screen_world_round_trip() {
        let mut cam = Camera2D::new(800.0, 600.0);
        cam.zoom = 2.0;
        cam.center = Vec2::new(300.0, 200.0);
        let world = cam.screen_to_world(Vec2::new(400.0, 300.0));
        assert_eq!(world, Vec2::new(300.0, 200.0));
        let world = cam.screen_to_world(Vec2::new(600.0, 300.0));
        assert_eq!(world, Vec2::new(400.0, 200.0));
        assert_eq!(cam.world_to_screen(world), Vec2::new(600.0, 300.0));
    }

    #[test]
    fn follow_clamps_to_bounds() {
        let mut cam = Camera2D::new(100.0, 100.0);
        cam.set_bounds(Rect::new(0.0, 0.0, 500.0, 400.0));
        cam.follow(Vec2::ZERO);
        assert_eq!(cam.center, Vec2::new(50.0, 50.0));
        cam.follow(Vec2::new(1000.0, 1000.0));
        assert_eq!(cam.center, Vec2::new(450.0, 350.0));
    }

    #[test]
    fn small_world_stays_centered() {
        let mut cam = Camera2D::new(1000.0, 1000.0);
        cam.set_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));
        cam.follow(Vec2::new(10.0, 10.0));
        assert_eq!(cam.center, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn visible_rect_tracks_zoom() {
        let mut cam = Camera2D::new(800.0, 600.0);
        cam.zoom = 2.0;
        cam.center = Vec2::new(200.0, 150.0);
        let rect = cam.visible_rect();
        assert_eq!(rect.min, Vec2::ZERO);
        assert_eq!(rect.size, Vec2::new(400.0, 300.0));
    }
}
