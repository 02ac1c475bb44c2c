use serde::{Deserialize, Serialize};

/// Maps viewport width (CSS pixels) to a camera zoom factor.
///
/// Narrow (mobile) viewports scale the zoom with the width so more of the
/// world fits; anything wider than `mobile_threshold` gets `desktop_zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomPolicy {
    /// Widths at or below this are treated as mobile.
    pub mobile_threshold: f32,
    /// Width that maps to zoom 1.0 on mobile.
    pub reference_width: f32,
    /// Lowest zoom a mobile viewport can get.
    pub floor_zoom: f32,
    /// Zoom for desktop viewports, and the mobile ceiling.
    pub desktop_zoom: f32,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            mobile_threshold: 820.0,
            reference_width: 820.0,
            floor_zoom: 0.75,
            desktop_zoom: 2.0,
        }
    }
}

impl ZoomPolicy {
    /// Zoom for a viewport `width` pixels wide. Pure and deterministic.
    pub fn zoom_for_width(&self, width: f32) -> f32 {
        if width <= self.mobile_threshold {
            let scaled = width / self.reference_width.max(f32::EPSILON);
            // max-then-min rather than clamp: never panics on odd configs.
            scaled.max(self.floor_zoom).min(self.desktop_zoom)
        } else {
            self.desktop_zoom
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_widths_get_constant_zoom() {
        let policy = ZoomPolicy::default();
        assert_eq!(policy.zoom_for_width(821.0), 2.0);
        assert_eq!(policy.zoom_for_width(1920.0), 2.0);
        assert_eq!(policy.zoom_for_width(10_000.0), 2.0);
    }

    #[test]
    fn mobile_widths_scale_with_reference() {
        let policy = ZoomPolicy::default();
        assert!((policy.zoom_for_width(820.0) - 1.0).abs() < 1e-6);
        assert!((policy.zoom_for_width(700.0) - 700.0 / 820.0).abs() < 1e-6);
    }

    #[test]
    fn mobile_zoom_never_drops_below_floor() {
        let policy = ZoomPolicy::default();
        assert_eq!(policy.zoom_for_width(320.0), 0.75);
        assert_eq!(policy.zoom_for_width(0.0), 0.75);
        assert_eq!(policy.zoom_for_width(-40.0), 0.75);
    }

    #[test]
    fn monotonic_up_to_threshold() {
        let policy = ZoomPolicy::default();
        let mut last = policy.zoom_for_width(0.0);
        let mut w = 0.0;
        while w <= policy.mobile_threshold {
            let z = policy.zoom_for_width(w);
            assert!(z >= last, "zoom decreased at width {}", w);
            last = z;
            w += 7.5;
        }
    }

    #[test]
    fn mobile_ceiling_is_desktop_zoom() {
        let policy = ZoomPolicy {
            reference_width: 100.0,
            ..ZoomPolicy::default()
        };
        assert_eq!(policy.zoom_for_width(800.0), 2.0);
    }

    #[test]
    fn deserializes_partial_json() {
        let policy: ZoomPolicy = serde_json::from_str(r#"{ "desktop_zoom": 3.0 }"#).unwrap();
        assert_eq!(policy.desktop_zoom, 3.0);
        assert_eq!(policy.mobile_threshold, 820.0);
    }
}
