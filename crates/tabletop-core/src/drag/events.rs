//! Drag events and the handlers a component can register for them.

use std::fmt;
use std::rc::Rc;

use crate::scene::{ComponentId, Scene};

/// Passed to acceptors and per-target callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEvent {
    pub dragged: ComponentId,
}

/// Passed to the dragged component when the gesture ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub dragged: ComponentId,
    /// Every component that accepted the drop, innermost first per subtree.
    pub targets: Vec<ComponentId>,
}

/// Decides whether a component accepts the dragged component.
pub type DropAcceptor = Rc<dyn Fn(&Scene, &DragEvent) -> bool>;
/// Gesture started/moved callbacks on the dragged component, and the drop
/// callback on an accepting target.
pub type DragCallback = Rc<dyn Fn(&mut Scene, &DragEvent)>;
/// Gesture ended callback; the flag tells whether any target accepted.
pub type DragEndedCallback = Rc<dyn Fn(&mut Scene, &DropEvent, bool)>;

#[derive(Clone, Default)]
pub struct DragHandlers {
    pub drop_acceptor: Option<DropAcceptor>,
    pub on_drag_dropped: Option<DragCallback>,
    pub on_drag_gesture_started: Option<DragCallback>,
    pub on_drag_gesture_moved: Option<DragCallback>,
    pub on_drag_gesture_ended: Option<DragEndedCallback>,
}

impl DragHandlers {
    /// True if the acceptor exists and returns true. Components without an
    /// acceptor never accept drops.
    pub fn accepts(&self, scene: &Scene, event: &DragEvent) -> bool {
        self.drop_acceptor.as_ref().is_some_and(|acceptor| acceptor(scene, event))
    }
}

impl fmt::Debug for DragHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragHandlers")
            .field("drop_acceptor", &self.drop_acceptor.is_some())
            .field("on_drag_dropped", &self.on_drag_dropped.is_some())
            .field("on_drag_gesture_started", &self.on_drag_gesture_started.is_some())
            .field("on_drag_gesture_moved", &self.on_drag_gesture_moved.is_some())
            .field("on_drag_gesture_ended", &self.on_drag_gesture_ended.is_some())
            .finish()
    }
}
