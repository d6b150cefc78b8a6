//! State captured when a drag gesture starts.

use crate::coordinate::Coordinate;
use crate::scene::{Component, ComponentId, Scene};

/// One in-flight drag. Created on pointer-down, consumed on pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub dragged: ComponentId,
    /// Pointer at gesture start, in scene space.
    pub pointer_start: Coordinate,
    /// Position of the dragged component at gesture start, in its parent's frame.
    pub component_start: Coordinate,
    /// Sum of the rotations of every ancestor, root to parent.
    pub accumulated_rotation: f64,
    /// Product of the scales of every ancestor, root to parent.
    pub accumulated_scale: f64,
}

impl DragSession {
    /// Returns `None` if `dragged` is not in the scene.
    pub fn capture(scene: &Scene, dragged: ComponentId, pointer: Coordinate) -> Option<Self> {
        let component = scene.get(dragged)?;
        let ancestors: Vec<&Component> = scene
            .ancestors(dragged)
            .into_iter()
            .filter_map(|id| scene.get(id))
            .collect();

        Some(Self {
            dragged,
            pointer_start: pointer,
            component_start: component.position(),
            accumulated_rotation: ancestors.iter().map(|a| a.rotation()).sum(),
            accumulated_scale: ancestors.iter().map(|a| a.scale()).product(),
        })
    }

    /// Position in the parent frame that keeps the component under the pointer.
    pub fn position_for(&self, pointer: Coordinate) -> Coordinate {
        let delta = (pointer - self.pointer_start).rotated(-self.accumulated_rotation);
        self.component_start + delta / self.accumulated_scale
    }

    /// Snap the dragged component back to where it started.
    pub fn rollback(&self, scene: &mut Scene) {
        if let Err(err) = scene.set_position(self.dragged, self.component_start) {
            log::warn!("Rollback of {} failed: {err}", self.dragged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_capture_accumulates_ancestors() {
        let mut scene = Scene::new();
        let outer = scene
            .spawn_root(Component::pane(100.0, 100.0).with_rotation(30.0).with_scale(2.0))
            .unwrap();
        let inner = scene
            .spawn_child(outer, Component::pane(50.0, 50.0).with_rotation(60.0).with_scale(0.5))
            .unwrap();
        let card = scene
            .spawn_child(inner, Component::leaf(10.0, 10.0).at(3.0, 4.0).with_rotation(45.0))
            .unwrap();

        let session = DragSession::capture(&scene, card, Coordinate::new(1.0, 1.0)).unwrap();
        assert!((session.accumulated_rotation - 90.0).abs() < EPSILON);
        assert!((session.accumulated_scale - 1.0).abs() < EPSILON);
        assert_eq!(session.component_start, Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn test_position_for_counter_rotates_and_scales() {
        let session = DragSession {
            dragged: uuid::Uuid::new_v4(),
            pointer_start: Coordinate::new(10.0, 10.0),
            component_start: Coordinate::new(5.0, 5.0),
            accumulated_rotation: 90.0,
            accumulated_scale: 2.0,
        };
        // Moving right on screen is moving "up" in a frame rotated by 90°.
        let position = session.position_for(Coordinate::new(30.0, 10.0));
        assert!(position.approx_eq(Coordinate::new(5.0, -5.0), EPSILON));
    }
}
