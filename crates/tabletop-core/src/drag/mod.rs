//! Drag-and-drop negotiation.
//!
//! A gesture goes `Idle → Dragging → (committed | rolled back) → Idle`. While
//! dragging, pointer moves only reposition the dragged component. On release
//! the negotiator collects every node under the pointer, asks each for
//! acceptance, and either keeps the new position or snaps back.

mod events;
mod resolve;
mod session;

pub use events::{DragCallback, DragEndedCallback, DragEvent, DragHandlers, DropAcceptor, DropEvent};
pub use resolve::{DropCandidate, accepting_targets, drop_chains, pick};
pub use session::DragSession;

use thiserror::Error;

use crate::config::DragConfig;
use crate::coordinate::Coordinate;
use crate::scene::{ComponentId, Scene};

/// Drag gesture errors. Ending a drag without any accepting target is a
/// rollback, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("A drag of {0} is already in progress")]
    AlreadyDragging(ComponentId),
    #[error("Component {0} is not draggable")]
    NotDraggable(ComponentId),
    #[error("Unknown component: {0}")]
    UnknownComponent(ComponentId),
    #[error("No drag in progress")]
    NotDragging,
}

/// Result type for drag operations.
pub type DragResult<T> = Result<T, DragError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// At least one target accepted; the dragged component keeps its position.
    Committed {
        dragged: ComponentId,
        targets: Vec<ComponentId>,
    },
    /// Nobody accepted; the dragged component was restored.
    RolledBack { dragged: ComponentId },
}

impl DropOutcome {
    pub fn dragged(&self) -> ComponentId {
        match self {
            DropOutcome::Committed { dragged, .. } | DropOutcome::RolledBack { dragged } => *dragged,
        }
    }

    pub fn accepted(&self) -> bool {
        matches!(self, DropOutcome::Committed { .. })
    }

    pub fn targets(&self) -> &[ComponentId] {
        match self {
            DropOutcome::Committed { targets, .. } => targets,
            DropOutcome::RolledBack { .. } => &[],
        }
    }
}

/// Owns the single active [`DragSession`].
#[derive(Debug, Default)]
pub struct DragNegotiator {
    session: Option<DragSession>,
    config: DragConfig,
}

impl DragNegotiator {
    pub fn new(config: DragConfig) -> Self {
        Self { session: None, config }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start dragging `dragged` with the pointer at `pointer` (scene space).
    pub fn begin(&mut self, scene: &mut Scene, dragged: ComponentId, pointer: Coordinate) -> DragResult<()> {
        if let Some(session) = &self.session {
            log::warn!("Ignoring drag of {dragged}: {} is still being dragged", session.dragged);
            return Err(DragError::AlreadyDragging(session.dragged));
        }
        let component = scene.get(dragged).ok_or(DragError::UnknownComponent(dragged))?;
        if !component.is_draggable() || !component.is_visible() || component.is_disabled() {
            return Err(DragError::NotDraggable(dragged));
        }
        let session = DragSession::capture(scene, dragged, pointer).ok_or(DragError::UnknownComponent(dragged))?;
        log::debug!("Drag started: {dragged} at {}", session.component_start);
        self.session = Some(session);

        if let Some(callback) = scene
            .get(dragged)
            .and_then(|component| component.handlers().on_drag_gesture_started.clone())
        {
            callback(scene, &DragEvent { dragged });
        }
        Ok(())
    }

    /// Move the dragged component along with the pointer. Returns its new position.
    ///
    /// If the dragged component has been removed from the scene the drag is
    /// abandoned and `UnknownComponent` is returned.
    pub fn update(&mut self, scene: &mut Scene, pointer: Coordinate) -> DragResult<Coordinate> {
        let session = self.session.as_ref().ok_or(DragError::NotDragging)?;
        let dragged = session.dragged;
        let position = session.position_for(pointer);
        if !scene.drag_to(dragged, position) {
            log::warn!("Abandoning drag: {dragged} is no longer in the scene");
            self.session = None;
            return Err(DragError::UnknownComponent(dragged));
        }

        if let Some(callback) = scene
            .get(dragged)
            .and_then(|component| component.handlers().on_drag_gesture_moved.clone())
        {
            callback(scene, &DragEvent { dragged });
        }
        Ok(position)
    }

    /// Release the pointer at `pointer` (scene space) and settle the gesture.
    ///
    /// Callbacks run in this order: the rollback (if nobody accepted), the
    /// dragged component's gesture-ended callback, then the drop callback of
    /// every accepting target in resolution order.
    pub fn end(&mut self, scene: &mut Scene, pointer: Coordinate) -> DragResult<DropOutcome> {
        let session = self.session.take().ok_or(DragError::NotDragging)?;
        let dragged = session.dragged;
        let event = DragEvent { dragged };

        let chains = drop_chains(scene, pointer, dragged, &self.config);
        let targets = accepting_targets(scene, &chains, &event);
        let accepted = !targets.is_empty();

        if accepted {
            log::info!("Dropped {dragged} onto {} target(s)", targets.len());
        } else {
            log::debug!("No target accepted {dragged}, rolling back");
            session.rollback(scene);
        }

        if let Some(callback) = scene
            .get(dragged)
            .and_then(|component| component.handlers().on_drag_gesture_ended.clone())
        {
            let drop = DropEvent {
                dragged,
                targets: targets.clone(),
            };
            callback(scene, &drop, accepted);
        }

        for target in &targets {
            if let Some(callback) = scene
                .get(*target)
                .and_then(|component| component.handlers().on_drag_dropped.clone())
            {
                callback(scene, &event);
            }
        }

        Ok(if accepted {
            DropOutcome::Committed { dragged, targets }
        } else {
            DropOutcome::RolledBack { dragged }
        })
    }
}
