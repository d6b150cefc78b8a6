//! Uniform child enumeration over every container kind.

use super::component::{ComponentKind, Pane};
use super::{ComponentId, Scene};
use crate::coordinate::Coordinate;
use crate::layout::{CardStack, GridPane, LinearLayout};

/// A node whose children can be enumerated and located.
///
/// Drop resolution and snapshots only go through this trait, so they work the
/// same for list containers and grid panes.
pub trait Traversable {
    /// Children in paint order, back to front.
    fn children(&self) -> Vec<ComponentId>;

    /// Where the child's unrotated box sits in this container's local frame.
    fn child_coordinate(&self, scene: &Scene, child: ComponentId) -> Option<Coordinate>;
}

fn listed_position(children: &[ComponentId], scene: &Scene, child: ComponentId) -> Option<Coordinate> {
    if !children.contains(&child) {
        return None;
    }
    scene.get(child).map(|component| component.position())
}

impl Traversable for Pane {
    fn children(&self) -> Vec<ComponentId> {
        self.children.clone()
    }

    fn child_coordinate(&self, scene: &Scene, child: ComponentId) -> Option<Coordinate> {
        listed_position(&self.children, scene, child)
    }
}

impl Traversable for LinearLayout {
    fn children(&self) -> Vec<ComponentId> {
        self.children.clone()
    }

    fn child_coordinate(&self, scene: &Scene, child: ComponentId) -> Option<Coordinate> {
        listed_position(&self.children, scene, child)
    }
}

impl Traversable for CardStack {
    fn children(&self) -> Vec<ComponentId> {
        self.children.clone()
    }

    fn child_coordinate(&self, scene: &Scene, child: ComponentId) -> Option<Coordinate> {
        listed_position(&self.children, scene, child)
    }
}

impl Traversable for GridPane {
    /// Occupants in column-major order.
    fn children(&self) -> Vec<ComponentId> {
        self.grid.occupied().map(|(_, _, id)| *id).collect()
    }

    /// Cell anchor from the last layout pass plus the occupant's own offset.
    fn child_coordinate(&self, scene: &Scene, child: ComponentId) -> Option<Coordinate> {
        let anchor = self.anchors.get(&child)?;
        let offset = scene.get(child)?.position();
        Some(*anchor + offset)
    }
}

impl ComponentKind {
    pub fn as_traversable(&self) -> Option<&dyn Traversable> {
        match self {
            ComponentKind::Leaf => None,
            ComponentKind::Pane(pane) => Some(pane),
            ComponentKind::LinearLayout(layout) => Some(layout),
            ComponentKind::CardStack(stack) => Some(stack),
            ComponentKind::GridPane(pane) => Some(pane),
        }
    }
}
