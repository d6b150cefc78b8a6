//! Components: the nodes of the scene tree.

use std::rc::Rc;

use kurbo::Size;
use uuid::Uuid;

use super::{ComponentId, Scene, SceneError, SceneResult};
use crate::alignment::Alignment;
use crate::coordinate::{Coordinate, normalize_rotation};
use crate::drag::{DragEvent, DragHandlers, DropEvent};
use crate::layout::{CardStack, GridPane, LinearLayout};
use crate::observable::{Observers, Property};

/// A container that keeps whatever positions its children have.
#[derive(Debug, Default)]
pub struct Pane {
    pub(crate) children: Vec<ComponentId>,
}

impl Pane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children from back to front.
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }
}

/// What a component is, and for containers, the state of its layout.
#[derive(Debug)]
pub enum ComponentKind {
    Leaf,
    Pane(Pane),
    LinearLayout(LinearLayout),
    CardStack(CardStack),
    GridPane(GridPane),
}

impl ComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Leaf => "leaf",
            ComponentKind::Pane(_) => "pane",
            ComponentKind::LinearLayout(_) => "linear layout",
            ComponentKind::CardStack(_) => "card stack",
            ComponentKind::GridPane(_) => "grid pane",
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, ComponentKind::Leaf)
    }

    /// Ordered child list of containers that keep one.
    pub(crate) fn child_list(&self) -> Option<&Vec<ComponentId>> {
        match self {
            ComponentKind::Pane(pane) => Some(&pane.children),
            ComponentKind::LinearLayout(layout) => Some(&layout.children),
            ComponentKind::CardStack(stack) => Some(&stack.children),
            ComponentKind::Leaf | ComponentKind::GridPane(_) => None,
        }
    }

    pub(crate) fn child_list_mut(&mut self) -> Option<&mut Vec<ComponentId>> {
        match self {
            ComponentKind::Pane(pane) => Some(&mut pane.children),
            ComponentKind::LinearLayout(layout) => Some(&mut layout.children),
            ComponentKind::CardStack(stack) => Some(&mut stack.children),
            ComponentKind::Leaf | ComponentKind::GridPane(_) => None,
        }
    }
}

/// A positioned, rotatable, scalable node.
///
/// `position` is the top-left corner of the unrotated box in the parent's
/// frame. Rotation and scale are applied about the box center. For grid pane
/// occupants the position is an offset inside the cell.
#[derive(Debug)]
pub struct Component {
    pub(crate) id: ComponentId,
    pub(crate) name: String,
    pub(crate) kind: ComponentKind,
    pub(crate) position: Property<Coordinate>,
    pub(crate) width: Property<f64>,
    pub(crate) height: Property<f64>,
    pub(crate) rotation: Property<f64>,
    pub(crate) scale: Property<f64>,
    pub(crate) draggable: bool,
    pub(crate) visible: bool,
    pub(crate) disabled: bool,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) handlers: DragHandlers,
}

impl Component {
    pub fn new(kind: ComponentKind, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            kind,
            position: Property::new(Coordinate::ORIGIN),
            width: Property::new(width),
            height: Property::new(height),
            rotation: Property::new(0.0),
            scale: Property::new(1.0),
            draggable: false,
            visible: true,
            disabled: false,
            parent: None,
            handlers: DragHandlers::default(),
        }
    }

    pub fn leaf(width: f64, height: f64) -> Self {
        Self::new(ComponentKind::Leaf, width, height)
    }

    pub fn pane(width: f64, height: f64) -> Self {
        Self::new(ComponentKind::Pane(Pane::new()), width, height)
    }

    pub fn linear_layout(width: f64, height: f64, layout: LinearLayout) -> Self {
        Self::new(ComponentKind::LinearLayout(layout), width, height)
    }

    pub fn card_stack(width: f64, height: f64, alignment: Alignment) -> Self {
        Self::new(ComponentKind::CardStack(CardStack::new(alignment)), width, height)
    }

    /// Grid panes size themselves from their content.
    pub fn grid_pane(pane: GridPane) -> Self {
        Self::new(ComponentKind::GridPane(pane), 0.0, 0.0)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position.set_silent(Coordinate::new(x, y));
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation.set_silent(normalize_rotation(rotation));
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale.set_silent(scale);
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn on_drop_accept(mut self, acceptor: impl Fn(&Scene, &DragEvent) -> bool + 'static) -> Self {
        self.handlers.drop_acceptor = Some(Rc::new(acceptor));
        self
    }

    pub fn on_drag_dropped(mut self, callback: impl Fn(&mut Scene, &DragEvent) + 'static) -> Self {
        self.handlers.on_drag_dropped = Some(Rc::new(callback));
        self
    }

    pub fn on_drag_gesture_started(mut self, callback: impl Fn(&mut Scene, &DragEvent) + 'static) -> Self {
        self.handlers.on_drag_gesture_started = Some(Rc::new(callback));
        self
    }

    pub fn on_drag_gesture_moved(mut self, callback: impl Fn(&mut Scene, &DragEvent) + 'static) -> Self {
        self.handlers.on_drag_gesture_moved = Some(Rc::new(callback));
        self
    }

    pub fn on_drag_gesture_ended(mut self, callback: impl Fn(&mut Scene, &DropEvent, bool) + 'static) -> Self {
        self.handlers.on_drag_gesture_ended = Some(Rc::new(callback));
        self
    }

    /// Reject sizes and scales the layout math cannot work with.
    pub(crate) fn validate(&self) -> SceneResult<()> {
        check_dimension(self.width())?;
        check_dimension(self.height())?;
        check_rotation(self.rotation())?;
        check_scale(self.scale())
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn position(&self) -> Coordinate {
        *self.position.get()
    }

    pub fn width(&self) -> f64 {
        *self.width.get()
    }

    pub fn height(&self) -> f64 {
        *self.height.get()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Rotation in degrees, always within `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        *self.rotation.get()
    }

    pub fn scale(&self) -> f64 {
        *self.scale.get()
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn handlers(&self) -> &DragHandlers {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut DragHandlers {
        &mut self.handlers
    }

    pub fn position_observers(&mut self) -> &mut Observers<Coordinate> {
        self.position.observers_mut()
    }

    pub fn width_observers(&mut self) -> &mut Observers<f64> {
        self.width.observers_mut()
    }

    pub fn height_observers(&mut self) -> &mut Observers<f64> {
        self.height.observers_mut()
    }

    pub fn rotation_observers(&mut self) -> &mut Observers<f64> {
        self.rotation.observers_mut()
    }

    pub fn scale_observers(&mut self) -> &mut Observers<f64> {
        self.scale.observers_mut()
    }

    pub fn as_linear_layout_mut(&mut self) -> Option<&mut LinearLayout> {
        match &mut self.kind {
            ComponentKind::LinearLayout(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn as_card_stack_mut(&mut self) -> Option<&mut CardStack> {
        match &mut self.kind {
            ComponentKind::CardStack(stack) => Some(stack),
            _ => None,
        }
    }

    pub fn as_grid_pane_mut(&mut self) -> Option<&mut GridPane> {
        match &mut self.kind {
            ComponentKind::GridPane(pane) => Some(pane),
            _ => None,
        }
    }

    /// Map `point` from the parent frame into this component's local frame,
    /// given where the parent places this component.
    pub fn to_local(&self, coordinate: Coordinate, point: Coordinate) -> Coordinate {
        let center = Coordinate::new(self.width() / 2.0, self.height() / 2.0);
        let relative = point - coordinate - center;
        center + relative.rotated(-self.rotation()) / self.scale()
    }

    /// Inverse of [`Component::to_local`].
    pub fn to_parent(&self, coordinate: Coordinate, local: Coordinate) -> Coordinate {
        let center = Coordinate::new(self.width() / 2.0, self.height() / 2.0);
        coordinate + center + ((local - center) * self.scale()).rotated(self.rotation())
    }

    /// Inclusive test against the `[0, width] × [0, height]` hit box.
    pub fn contains_local(&self, local: Coordinate) -> bool {
        (0.0..=self.width()).contains(&local.x()) && (0.0..=self.height()).contains(&local.y())
    }
}

pub(crate) fn check_dimension(value: f64) -> SceneResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidDimension(value))
    }
}

/// Non-finite angles cannot be normalized.
pub(crate) fn check_rotation(value: f64) -> SceneResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidRotation(value))
    }
}

pub(crate) fn check_scale(value: f64) -> SceneResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidScale(value))
    }
}
