//! Hit testing for drag start and drop target resolution.

use crate::config::DragConfig;
use crate::coordinate::Coordinate;
use crate::scene::{Component, ComponentId, Scene};

use super::DragEvent;

/// A node under the pointer together with the pointer in that node's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropCandidate {
    pub component: ComponentId,
    pub local_pointer: Coordinate,
}

fn eligible(component: &Component, config: &DragConfig) -> bool {
    !(config.skip_hidden && !component.is_visible()) && !(config.skip_disabled && component.is_disabled())
}

/// Topmost draggable component under `pointer` (scene space), preferring the
/// deepest one. Hidden and disabled components cannot be grabbed.
pub fn pick(scene: &Scene, pointer: Coordinate) -> Option<ComponentId> {
    scene.roots().iter().rev().find_map(|root| {
        let component = scene.get(*root)?;
        pick_in(scene, *root, component.to_local(component.position(), pointer))
    })
}

fn pick_in(scene: &Scene, id: ComponentId, local: Coordinate) -> Option<ComponentId> {
    let component = scene.get(id)?;
    if !component.is_visible() || component.is_disabled() || !component.contains_local(local) {
        return None;
    }
    if let Some(traversable) = component.kind().as_traversable() {
        for child in traversable.children().into_iter().rev() {
            let (Some(child_component), Some(coordinate)) = (scene.get(child), traversable.child_coordinate(scene, child))
            else {
                continue;
            };
            if let Some(found) = pick_in(scene, child, child_component.to_local(coordinate, local)) {
                return Some(found);
            }
        }
    }
    component.is_draggable().then_some(id)
}

/// Every chain of nested nodes under `pointer`, one per containing root.
///
/// A chain runs from the innermost node to its root and always ends with the
/// root itself. Roots are not exclusive: overlapping roots each contribute a
/// chain. The dragged component and its subtree are never part of a chain.
pub fn drop_chains(
    scene: &Scene,
    pointer: Coordinate,
    dragged: ComponentId,
    config: &DragConfig,
) -> Vec<Vec<DropCandidate>> {
    scene
        .roots()
        .iter()
        .filter(|root| **root != dragged)
        .filter_map(|root| {
            let component = scene.get(*root)?;
            if !eligible(component, config) {
                return None;
            }
            let local = component.to_local(component.position(), pointer);
            if !component.contains_local(local) {
                return None;
            }
            let mut chain = Vec::new();
            collect(scene, *root, local, dragged, config, &mut chain);
            chain.push(DropCandidate {
                component: *root,
                local_pointer: local,
            });
            Some(chain)
        })
        .collect()
}

/// Depth-first: a matching child's descendants are pushed before the child.
fn collect(
    scene: &Scene,
    node: ComponentId,
    local: Coordinate,
    dragged: ComponentId,
    config: &DragConfig,
    chain: &mut Vec<DropCandidate>,
) {
    let Some(traversable) = scene.get(node).and_then(|component| component.kind().as_traversable()) else {
        return;
    };
    for child in traversable.children() {
        if child == dragged {
            continue;
        }
        let Some(component) = scene.get(child).filter(|component| eligible(component, config)) else {
            continue;
        };
        let Some(coordinate) = traversable.child_coordinate(scene, child) else {
            continue;
        };
        let child_local = component.to_local(coordinate, local);
        if component.contains_local(child_local) {
            collect(scene, child, child_local, dragged, config, chain);
            chain.push(DropCandidate {
                component: child,
                local_pointer: child_local,
            });
        }
    }
}

/// Ask every candidate except the dragged component; keep those that accept,
/// in chain order.
pub fn accepting_targets(scene: &Scene, chains: &[Vec<DropCandidate>], event: &DragEvent) -> Vec<ComponentId> {
    chains
        .iter()
        .flatten()
        .filter(|candidate| candidate.component != event.dragged)
        .filter(|candidate| {
            scene
                .get(candidate.component)
                .is_some_and(|component| component.handlers().accepts(scene, event))
        })
        .map(|candidate| candidate.component)
        .collect()
}
