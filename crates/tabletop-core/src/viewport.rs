//! Mapping between screen pixels and scene coordinates.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::{ScaleLimits, StageConfig};
use crate::coordinate::Coordinate;

/// How the table is shown on screen: `screen = scene × scale + offset`.
///
/// A viewport is a plain value. Panning, zooming and fitting return a new
/// viewport; the [`Stage`](crate::stage::Stage) decides which one to keep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    offset: Vec2,
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Viewport {
    /// One scene unit per pixel, scene origin at the screen's top-left corner.
    pub const IDENTITY: Viewport = Viewport {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn new(offset: Vec2, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Initial view of a stage, with the scale kept inside the configured limits.
    pub fn from_config(config: &StageConfig) -> Self {
        Self::new(config.view_offset, config.view_limits.clamp(config.view_scale))
    }

    /// Screen position of the scene origin, in pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Pixels per scene unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scene to screen.
    pub fn to_screen(&self) -> Affine {
        Affine::new([self.scale, 0.0, 0.0, self.scale, self.offset.x, self.offset.y])
    }

    /// Screen to scene.
    pub fn to_scene(&self) -> Affine {
        self.to_screen().inverse()
    }

    pub fn screen_to_scene(&self, screen: Point) -> Coordinate {
        (self.to_scene() * screen).into()
    }

    pub fn scene_to_screen(&self, scene: Coordinate) -> Point {
        self.to_screen() * scene.to_point()
    }

    /// A pointer movement in pixels expressed in scene units.
    pub fn screen_delta_to_scene(&self, delta: Vec2) -> Coordinate {
        Coordinate::from(delta / self.scale)
    }

    /// The same view moved by `delta` pixels.
    pub fn panned(self, delta: Vec2) -> Self {
        Self::new(self.offset + delta, self.scale)
    }

    /// The view at `scale`, with the scene point under `anchor` left in place.
    pub fn scaled_about(self, anchor: Point, scale: f64) -> Self {
        let pinned = self.screen_to_scene(anchor);
        Self::new(anchor.to_vec2() - pinned.to_vec2() * scale, scale)
    }

    /// The view that centers `bounds` in a screen `area`, leaving `padding`
    /// pixels free on every side. Returns `None` for bounds without area.
    pub fn fitting(bounds: Rect, area: Size, padding: f64, limits: ScaleLimits) -> Option<Self> {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return None;
        }
        let room = Size::new(
            (area.width - 2.0 * padding).max(1.0),
            (area.height - 2.0 * padding).max(1.0),
        );
        let scale = limits.clamp((room.width / bounds.width()).min(room.height / bounds.height()));
        let screen_center = Vec2::new(area.width / 2.0, area.height / 2.0);
        Some(Self::new(screen_center - bounds.center().to_vec2() * scale, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual - expected).hypot() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_identity_maps_pixels_to_units() {
        let viewport = Viewport::default();
        assert_eq!(viewport.screen_to_scene(Point::new(100.0, 200.0)), Coordinate::new(100.0, 200.0));
        assert_eq!(viewport.screen_delta_to_scene(Vec2::new(3.0, 4.0)), Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn test_scale_applies_before_offset() {
        let viewport = Viewport::new(Vec2::new(50.0, 100.0), 2.0);
        let scene = viewport.screen_to_scene(Point::new(150.0, 300.0));
        assert!(scene.approx_eq(Coordinate::new(50.0, 100.0), EPSILON));
        assert_point_eq(viewport.scene_to_screen(scene), Point::new(150.0, 300.0));
        assert_eq!(viewport.screen_delta_to_scene(Vec2::new(10.0, -4.0)), Coordinate::new(5.0, -2.0));
    }

    #[test]
    fn test_panned_shifts_the_scene_under_the_pointer() {
        let viewport = Viewport::IDENTITY.panned(Vec2::new(30.0, -20.0));
        assert_eq!(viewport.offset(), Vec2::new(30.0, -20.0));
        assert!(viewport
            .screen_to_scene(Point::new(30.0, -20.0))
            .approx_eq(Coordinate::ORIGIN, EPSILON));
    }

    #[test]
    fn test_scaled_about_pins_the_anchor() {
        let viewport = Viewport::new(Vec2::new(12.0, 7.0), 1.5);
        let anchor = Point::new(200.0, 100.0);
        let pinned = viewport.screen_to_scene(anchor);

        let zoomed = viewport.scaled_about(anchor, 3.0);
        assert_eq!(zoomed.scale(), 3.0);
        assert!(zoomed.screen_to_scene(anchor).approx_eq(pinned, EPSILON));
    }

    #[test]
    fn test_fitting_centers_bounds() {
        let limits = ScaleLimits::default();
        let viewport = Viewport::fitting(Rect::new(0.0, 0.0, 200.0, 100.0), Size::new(440.0, 440.0), 20.0, limits)
            .unwrap();
        assert!((viewport.scale() - 2.0).abs() < EPSILON);
        assert_point_eq(viewport.scene_to_screen(Coordinate::new(100.0, 50.0)), Point::new(220.0, 220.0));
    }

    #[test]
    fn test_fitting_respects_limits_and_rejects_empty_bounds() {
        let limits = ScaleLimits { min: 0.5, max: 2.0 };
        let tiny = Viewport::fitting(Rect::new(0.0, 0.0, 1.0, 1.0), Size::new(800.0, 600.0), 0.0, limits).unwrap();
        assert_eq!(tiny.scale(), 2.0);

        let line = Rect::new(0.0, 0.0, 100.0, 0.0);
        assert_eq!(Viewport::fitting(line, Size::new(800.0, 600.0), 0.0, limits), None);
    }

    #[test]
    fn test_from_config_clamps_scale() {
        let config = StageConfig {
            view_scale: 50.0,
            ..StageConfig::default()
        };
        assert_eq!(Viewport::from_config(&config).scale(), config.view_limits.max);
    }
}
