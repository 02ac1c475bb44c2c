/// Render layer. Controls draw order.
///
/// Layers are drawn back-to-front: ground first, UI last. The avatar walks
/// between the `World` tiles and the `Above` canopy layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Below = 0,
    World = 1,
    #[default]
    Actors = 2,
    Above = 3,
    /// Screen-space; positions are viewport pixels and ignore the camera.
    Ui = 4,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 5;

    pub const ALL: [RenderLayer; Self::COUNT] = [
        Self::Below,
        Self::World,
        Self::Actors,
        Self::Above,
        Self::Ui,
    ];

    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_screen_space(self) -> bool {
        self == Self::Ui
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_actors() {
        assert_eq!(RenderLayer::default(), RenderLayer::Actors);
    }

    #[test]
    fn canopy_draws_over_actors() {
        assert!(RenderLayer::Below < RenderLayer::World);
        assert!(RenderLayer::World < RenderLayer::Actors);
        assert!(RenderLayer::Actors < RenderLayer::Above);
        assert!(RenderLayer::Above < RenderLayer::Ui);
    }

    #[test]
    fn only_ui_is_screen_space() {
        let screen: Vec<_> = RenderLayer::ALL.iter().filter(|l| l.is_screen_space()).collect();
        assert_eq!(screen, vec![&RenderLayer::Ui]);
    }
}
