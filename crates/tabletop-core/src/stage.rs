//! The root context tying the scene, the view and pointer input together.

use kurbo::{Point, Size, Vec2};

use crate::config::StageConfig;
use crate::coordinate::Coordinate;
use crate::drag::{DragError, DragNegotiator, DragResult, DropOutcome, pick};
use crate::scene::{ComponentId, Scene};
use crate::viewport::Viewport;

/// Owns the scene, the viewport and the one drag negotiator. Pointer input
/// arrives in screen pixels.
#[derive(Debug)]
pub struct Stage {
    config: StageConfig,
    scene: Scene,
    viewport: Viewport,
    negotiator: DragNegotiator,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        Self {
            viewport: Viewport::from_config(&config),
            negotiator: DragNegotiator::new(config.drag),
            scene: Scene::new(),
            config,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn negotiator(&self) -> &DragNegotiator {
        &self.negotiator
    }

    pub fn is_dragging(&self) -> bool {
        self.negotiator.is_dragging()
    }

    /// Fit the whole scene into the stage area. An empty scene keeps the
    /// current view.
    pub fn fit_view(&mut self, padding: f64) {
        let area = Size::new(self.config.width, self.config.height);
        let fitted = self
            .scene
            .scene_bounds()
            .and_then(|bounds| Viewport::fitting(bounds, area, padding, self.config.view_limits));
        if let Some(viewport) = fitted {
            self.viewport = viewport;
        }
    }

    /// Scroll the table by `delta` screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.viewport = self.viewport.panned(delta);
    }

    /// Multiply the view scale by `factor`, keeping the scene point under
    /// `screen` fixed. Returns `false` if the scale did not change, either
    /// because `factor` is not a positive number or a limit was reached.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let scale = self.config.view_limits.clamp(self.viewport.scale() * factor);
        if scale == self.viewport.scale() {
            return false;
        }
        self.viewport = self.viewport.scaled_about(screen, scale);
        log::trace!("View scale now {scale}");
        true
    }

    fn to_scene(&self, screen: Point) -> Coordinate {
        self.viewport.screen_to_scene(screen)
    }

    /// Start dragging whatever draggable component is under the pointer.
    /// Returns `None` if there is nothing to grab.
    pub fn pointer_down(&mut self, screen: Point) -> DragResult<Option<ComponentId>> {
        if let Some(session) = self.negotiator.session() {
            return Err(DragError::AlreadyDragging(session.dragged));
        }
        let pointer = self.to_scene(screen);
        let Some(target) = pick(&self.scene, pointer) else {
            return Ok(None);
        };
        self.negotiator.begin(&mut self.scene, target, pointer)?;
        Ok(Some(target))
    }

    /// Start dragging a specific component.
    pub fn begin_drag(&mut self, id: ComponentId, screen: Point) -> DragResult<()> {
        let pointer = self.to_scene(screen);
        self.negotiator.begin(&mut self.scene, id, pointer)
    }

    /// Returns the dragged component's new position, or `None` when idle.
    pub fn pointer_move(&mut self, screen: Point) -> DragResult<Option<Coordinate>> {
        if !self.negotiator.is_dragging() {
            return Ok(None);
        }
        let pointer = self.to_scene(screen);
        self.negotiator.update(&mut self.scene, pointer).map(Some)
    }

    /// Returns `None` when no drag was in progress.
    pub fn pointer_up(&mut self, screen: Point) -> DragResult<Option<DropOutcome>> {
        if !self.negotiator.is_dragging() {
            return Ok(None);
        }
        let pointer = self.to_scene(screen);
        self.negotiator.end(&mut self.scene, pointer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Component;

    fn zoomed_stage() -> Stage {
        let config = StageConfig {
            view_scale: 2.0,
            view_offset: Vec2::new(100.0, 0.0),
            ..StageConfig::default()
        };
        Stage::new(config)
    }

    #[test]
    fn test_pointer_down_converts_screen_to_scene() {
        let mut stage = zoomed_stage();
        let card = stage
            .scene_mut()
            .spawn_root(Component::leaf(10.0, 10.0).at(20.0, 20.0).draggable())
            .unwrap();

        // Scene (25, 25) is screen (150, 50).
        assert_eq!(stage.pointer_down(Point::new(150.0, 50.0)).unwrap(), Some(card));
        assert!(stage.is_dragging());
        assert_eq!(
            stage.pointer_down(Point::new(150.0, 50.0)),
            Err(DragError::AlreadyDragging(card))
        );

        // 20 screen pixels are 10 scene units.
        let position = stage.pointer_move(Point::new(170.0, 50.0)).unwrap();
        assert_eq!(position, Some(Coordinate::new(30.0, 20.0)));

        let outcome = stage.pointer_up(Point::new(170.0, 50.0)).unwrap().unwrap();
        assert!(!outcome.accepted());
        assert_eq!(stage.scene().get(card).unwrap().position(), Coordinate::new(20.0, 20.0));
    }

    #[test]
    fn test_idle_pointer_events_are_noops() {
        let mut stage = Stage::default();
        assert_eq!(stage.pointer_down(Point::new(5.0, 5.0)).unwrap(), None);
        assert_eq!(stage.pointer_move(Point::new(5.0, 5.0)).unwrap(), None);
        assert_eq!(stage.pointer_up(Point::new(5.0, 5.0)).unwrap(), None);
    }

    #[test]
    fn test_hidden_component_cannot_be_grabbed() {
        let mut stage = Stage::default();
        let card = stage
            .scene_mut()
            .spawn_root(Component::leaf(10.0, 10.0).draggable())
            .unwrap();
        stage.scene_mut().component_mut(card).unwrap().set_visible(false);

        assert_eq!(stage.pointer_down(Point::new(5.0, 5.0)).unwrap(), None);
        assert_eq!(
            stage.begin_drag(card, Point::new(5.0, 5.0)),
            Err(DragError::NotDraggable(card))
        );
    }

    #[test]
    fn test_fit_view_centers_scene() {
        let mut stage = Stage::new(StageConfig {
            width: 400.0,
            height: 400.0,
            ..StageConfig::default()
        });
        stage
            .scene_mut()
            .spawn_root(Component::pane(200.0, 100.0))
            .unwrap();
        stage.fit_view(0.0);
        assert!((stage.viewport().scale() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_view_keeps_view_for_empty_scene() {
        let mut stage = zoomed_stage();
        stage.fit_view(10.0);
        assert_eq!(*stage.viewport(), Viewport::new(Vec2::new(100.0, 0.0), 2.0));
    }

    #[test]
    fn test_pan_moves_what_is_under_the_pointer() {
        let mut stage = Stage::default();
        let card = stage
            .scene_mut()
            .spawn_root(Component::leaf(10.0, 10.0).at(20.0, 20.0).draggable())
            .unwrap();

        stage.pan(Vec2::new(100.0, 0.0));
        assert_eq!(stage.pointer_down(Point::new(25.0, 25.0)).unwrap(), None);
        assert_eq!(stage.pointer_down(Point::new(125.0, 25.0)).unwrap(), Some(card));

        // Drag deltas are unaffected by the pan offset.
        let position = stage.pointer_move(Point::new(135.0, 30.0)).unwrap();
        assert_eq!(position, Some(Coordinate::new(30.0, 25.0)));
    }

    #[test]
    fn test_zoom_at_keeps_pointer_anchor() {
        let mut stage = Stage::default();
        let card = stage
            .scene_mut()
            .spawn_root(Component::leaf(10.0, 10.0).at(20.0, 20.0).draggable())
            .unwrap();

        // Screen (17, 17) misses the card at scale 1.
        assert_eq!(stage.pointer_down(Point::new(17.0, 17.0)).unwrap(), None);

        // Zooming about the card's center leaves it under the same pixel and
        // grows it toward (17, 17), which now maps to scene (21, 21).
        assert!(stage.zoom_at(Point::new(25.0, 25.0), 2.0));
        assert_eq!(stage.viewport().scale(), 2.0);
        assert!(stage
            .viewport()
            .screen_to_scene(Point::new(25.0, 25.0))
            .approx_eq(Coordinate::new(25.0, 25.0), 1e-9));
        assert_eq!(stage.pointer_down(Point::new(17.0, 17.0)).unwrap(), Some(card));

        // 10 screen pixels are now 5 scene units.
        let position = stage.pointer_move(Point::new(27.0, 17.0)).unwrap();
        assert_eq!(position, Some(Coordinate::new(25.0, 20.0)));
    }

    #[test]
    fn test_zoom_at_stops_at_limits() {
        let mut stage = Stage::default();
        let anchor = Point::new(300.0, 200.0);

        assert!(stage.zoom_at(anchor, 100.0));
        assert_eq!(stage.viewport().scale(), stage.config().view_limits.max);
        assert!(!stage.zoom_at(anchor, 2.0));

        assert!(!stage.zoom_at(anchor, 0.0));
        assert!(!stage.zoom_at(anchor, f64::NAN));
        assert!(stage.zoom_at(anchor, 1e-6));
        assert_eq!(stage.viewport().scale(), stage.config().view_limits.min);
    }
}
