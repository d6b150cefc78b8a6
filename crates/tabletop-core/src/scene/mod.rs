//! The component tree.
//!
//! Components live in an arena keyed by [`ComponentId`]. Containers own their
//! children through id lists (or grid cells); each child keeps a non-owning
//! back-reference to its container. Root components are kept in paint order,
//! back to front.

mod component;
mod traverse;

pub use component::{Component, ComponentKind, Pane};
pub use traverse::Traversable;

use std::collections::{HashMap, HashSet};

use kurbo::{Rect, Size};
use thiserror::Error;
use uuid::Uuid;

use crate::alignment::Alignment;
use crate::coordinate::{Coordinate, normalize_rotation};
use crate::grid::{Grid, GridError, GridResult};
use crate::layout::{CardStack, CellMetrics, GridLayout, GridPane, LinearLayout, Orientation, check_spacing};
use crate::observable::Property;
use component::{check_dimension, check_rotation, check_scale};

/// Unique identifier for components.
pub type ComponentId = Uuid;

/// Errors raised by scene operations. A failing call leaves the scene unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("Unknown component: {0}")]
    UnknownComponent(ComponentId),
    #[error("Component {id} is a {actual}, expected a {expected}")]
    WrongKind {
        id: ComponentId,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Component {0} already has a parent")]
    AlreadyHasParent(ComponentId),
    #[error("Component {child} cannot be placed inside its own descendant {container}")]
    CyclicContainment { container: ComponentId, child: ComponentId },
    #[error("Child index {index} out of range 0..={len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Spacing must be non-negative, got {0}")]
    InvalidSpacing(f64),
    #[error("Width and height must be finite and non-negative, got {0}")]
    InvalidDimension(f64),
    #[error("Scale must be finite and positive, got {0}")]
    InvalidScale(f64),
    #[error("Rotation must be finite, got {0}")]
    InvalidRotation(f64),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

const LIST_CONTAINER: &str = "pane, linear layout or card stack";

type Selector<T> = fn(&mut Component) -> Option<&mut Property<T>>;

fn position_of(component: &mut Component) -> Option<&mut Property<Coordinate>> {
    Some(&mut component.position)
}

fn width_of(component: &mut Component) -> Option<&mut Property<f64>> {
    Some(&mut component.width)
}

fn height_of(component: &mut Component) -> Option<&mut Property<f64>> {
    Some(&mut component.height)
}

fn rotation_of(component: &mut Component) -> Option<&mut Property<f64>> {
    Some(&mut component.rotation)
}

fn scale_of(component: &mut Component) -> Option<&mut Property<f64>> {
    Some(&mut component.scale)
}

fn spacing_of(component: &mut Component) -> Option<&mut Property<f64>> {
    match &mut component.kind {
        ComponentKind::LinearLayout(layout) => Some(&mut layout.spacing),
        ComponentKind::GridPane(pane) => Some(&mut pane.spacing),
        _ => None,
    }
}

fn orientation_of(component: &mut Component) -> Option<&mut Property<Orientation>> {
    match &mut component.kind {
        ComponentKind::LinearLayout(layout) => Some(&mut layout.orientation),
        _ => None,
    }
}

fn alignment_of(component: &mut Component) -> Option<&mut Property<Alignment>> {
    match &mut component.kind {
        ComponentKind::LinearLayout(layout) => Some(&mut layout.alignment),
        ComponentKind::CardStack(stack) => Some(&mut stack.alignment),
        _ => None,
    }
}

/// Arena of components plus the ordered list of roots.
#[derive(Debug, Default)]
pub struct Scene {
    components: HashMap<ComponentId, Component>,
    roots: Vec<ComponentId>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    // --- lookup ---

    /// Look up a component, `None` if the id is unknown.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Mutable lookup. See [`Scene::component_mut`] for what is safe to change.
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(&id)
    }

    /// Like [`Scene::get`] but reports an unknown id as an error.
    pub fn component(&self, id: ComponentId) -> SceneResult<&Component> {
        self.get(id).ok_or(SceneError::UnknownComponent(id))
    }

    /// Mutable access for listeners, handlers and flags. Layout inputs are
    /// changed through the `set_*` methods on [`Scene`].
    pub fn component_mut(&mut self, id: ComponentId) -> SceneResult<&mut Component> {
        self.get_mut(id).ok_or(SceneError::UnknownComponent(id))
    }

    /// Whether `id` is in the arena, attached or not.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Number of components in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Root components from back to front.
    pub fn roots(&self) -> &[ComponentId] {
        &self.roots
    }

    /// The container holding `id`. Roots and detached components have none.
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.get(id).and_then(Component::parent)
    }

    /// Children of a container in paint order; empty for leaves.
    pub fn children(&self, id: ComponentId) -> Vec<ComponentId> {
        self.get(id)
            .and_then(|component| component.kind.as_traversable())
            .map(|traversable| traversable.children())
            .unwrap_or_default()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut ancestors = Vec::new();
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            ancestors.push(current);
            cursor = self.parent(current);
        }
        ancestors
    }

    /// The layout state of a linear layout container.
    pub fn linear_layout(&self, id: ComponentId) -> SceneResult<&LinearLayout> {
        let component = self.component(id)?;
        match &component.kind {
            ComponentKind::LinearLayout(layout) => Ok(layout),
            other => Err(wrong_kind(id, "linear layout", other)),
        }
    }

    /// The stack state of a card stack.
    pub fn card_stack(&self, id: ComponentId) -> SceneResult<&CardStack> {
        let component = self.component(id)?;
        match &component.kind {
            ComponentKind::CardStack(stack) => Ok(stack),
            other => Err(wrong_kind(id, "card stack", other)),
        }
    }

    /// The grid of a grid pane.
    pub fn grid_pane(&self, id: ComponentId) -> SceneResult<&GridPane> {
        let component = self.component(id)?;
        match &component.kind {
            ComponentKind::GridPane(pane) => Ok(pane),
            other => Err(wrong_kind(id, "grid pane", other)),
        }
    }

    // --- insertion and removal ---

    /// Add a detached component to the arena.
    pub fn insert(&mut self, component: Component) -> SceneResult<ComponentId> {
        component.validate()?;
        let id = component.id;
        log::debug!("Inserted {} {id}", component.kind.name());
        self.components.insert(id, component);
        self.relayout(id);
        Ok(id)
    }

    /// Insert a component and put it on top of the roots.
    pub fn spawn_root(&mut self, component: Component) -> SceneResult<ComponentId> {
        let id = self.insert(component)?;
        self.add_root(id)?;
        Ok(id)
    }

    /// Insert a component and append it to a list container.
    pub fn spawn_child(&mut self, container: ComponentId, component: Component) -> SceneResult<ComponentId> {
        self.child_list(container)?;
        let id = self.insert(component)?;
        if let Err(err) = self.add_child(container, id) {
            self.components.remove(&id);
            return Err(err);
        }
        Ok(id)
    }

    /// Remove a component and its whole subtree from the arena. Returns the
    /// number of removed components.
    pub fn remove(&mut self, id: ComponentId) -> SceneResult<usize> {
        self.detach(id)?;
        let mut pending = vec![id];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            if let Some(component) = self.components.remove(&next) {
                if let Some(traversable) = component.kind.as_traversable() {
                    pending.extend(traversable.children());
                }
                removed += 1;
            }
        }
        log::debug!("Removed {id} and {} descendants", removed - 1);
        Ok(removed)
    }

    /// Put a detached component on top of the roots.
    pub fn add_root(&mut self, id: ComponentId) -> SceneResult<()> {
        let component = self.component(id)?;
        if component.parent.is_some() || self.roots.contains(&id) {
            return Err(SceneError::AlreadyHasParent(id));
        }
        self.roots.push(id);
        Ok(())
    }

    /// Take a component out of the roots without dropping it from the arena.
    pub fn remove_root(&mut self, id: ComponentId) -> bool {
        let before = self.roots.len();
        self.roots.retain(|root| *root != id);
        self.roots.len() != before
    }

    // --- list containers ---

    fn child_list(&self, container: ComponentId) -> SceneResult<&Vec<ComponentId>> {
        let component = self.component(container)?;
        component
            .kind
            .child_list()
            .ok_or_else(|| wrong_kind(container, LIST_CONTAINER, &component.kind))
    }

    /// A child must be free and must not be the container or one of its ancestors.
    fn check_attachable(&self, container: ComponentId, child: ComponentId) -> SceneResult<()> {
        let component = self.component(child)?;
        if component.parent.is_some() || self.roots.contains(&child) {
            return Err(SceneError::AlreadyHasParent(child));
        }
        let mut cursor = Some(container);
        while let Some(current) = cursor {
            if current == child {
                return Err(SceneError::CyclicContainment { container, child });
            }
            cursor = self.parent(current);
        }
        Ok(())
    }

    /// Append `child` to a list container.
    pub fn add_child(&mut self, container: ComponentId, child: ComponentId) -> SceneResult<()> {
        let len = self.child_list(container)?.len();
        self.add_child_at(container, child, len)
    }

    /// Insert `child` before `index`; `index == len` appends.
    pub fn add_child_at(&mut self, container: ComponentId, child: ComponentId, index: usize) -> SceneResult<()> {
        let len = self.child_list(container)?.len();
        self.check_attachable(container, child)?;
        if index > len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }

        if let Some(children) = self.components.get_mut(&container).and_then(|c| c.kind.child_list_mut()) {
            children.insert(index, child);
        }
        if let Some(component) = self.components.get_mut(&child) {
            component.parent = Some(container);
        }
        log::debug!("Added {child} to {container} at {index}");
        self.relayout(container);
        Ok(())
    }

    /// Returns false if `child` was not in the container.
    pub fn remove_child(&mut self, container: ComponentId, child: ComponentId) -> SceneResult<bool> {
        if !self.child_list(container)?.contains(&child) {
            return Ok(false);
        }
        if let Some(children) = self.components.get_mut(&container).and_then(|c| c.kind.child_list_mut()) {
            children.retain(|id| *id != child);
        }
        if let Some(component) = self.components.get_mut(&child) {
            component.parent = None;
        }
        log::debug!("Removed {child} from {container}");
        self.relayout(container);
        Ok(true)
    }

    /// Detach every child of a list container and return them in order.
    pub fn clear_children(&mut self, container: ComponentId) -> SceneResult<Vec<ComponentId>> {
        self.child_list(container)?;
        let children = self
            .components
            .get_mut(&container)
            .and_then(|c| c.kind.child_list_mut())
            .map(std::mem::take)
            .unwrap_or_default();
        for child in &children {
            if let Some(component) = self.components.get_mut(child) {
                component.parent = None;
            }
        }
        self.relayout(container);
        Ok(children)
    }

    /// Detach a component from wherever it is: a list container, a grid cell
    /// or the roots. Returns the former container.
    pub fn detach(&mut self, id: ComponentId) -> SceneResult<Option<ComponentId>> {
        let Some(parent) = self.component(id)?.parent else {
            self.remove_root(id);
            return Ok(None);
        };

        if self.grid_pane(parent).is_ok() {
            self.update_grid(parent, |grid| {
                if let Some((column, row)) = grid.position_of(&id) {
                    grid.set(column, row, None)?;
                }
                Ok(())
            })?;
        } else {
            self.remove_child(parent, id)?;
        }
        Ok(Some(parent))
    }

    fn sibling_list_mut(&mut self, id: ComponentId) -> Option<&mut Vec<ComponentId>> {
        let parent = self.get(id)?.parent;
        match parent {
            Some(parent) => self.components.get_mut(&parent)?.kind.child_list_mut(),
            None if self.roots.contains(&id) => Some(&mut self.roots),
            None => None,
        }
    }

    /// Move a component to the end of its sibling list (painted last).
    /// Returns false for grid occupants and detached components.
    pub fn to_front(&mut self, id: ComponentId) -> SceneResult<bool> {
        self.reorder(id, |siblings, id| siblings.push(id))
    }

    /// Move a component to the start of its sibling list (painted first).
    pub fn to_back(&mut self, id: ComponentId) -> SceneResult<bool> {
        self.reorder(id, |siblings, id| siblings.insert(0, id))
    }

    fn reorder(&mut self, id: ComponentId, place: impl FnOnce(&mut Vec<ComponentId>, ComponentId)) -> SceneResult<bool> {
        let parent = self.component(id)?.parent;
        let Some(siblings) = self.sibling_list_mut(id) else {
            return Ok(false);
        };
        siblings.retain(|sibling| *sibling != id);
        place(siblings, id);
        if let Some(parent) = parent {
            self.relayout(parent);
        }
        Ok(true)
    }

    // --- card stacks ---

    /// Put `child` on top of the stack.
    pub fn push(&mut self, stack: ComponentId, child: ComponentId) -> SceneResult<()> {
        self.card_stack(stack)?;
        self.add_child(stack, child)
    }

    /// Detach and return the top of the stack.
    pub fn pop(&mut self, stack: ComponentId) -> SceneResult<Option<ComponentId>> {
        let top = self.card_stack(stack)?.peek();
        if let Some(top) = top {
            self.remove_child(stack, top)?;
        }
        Ok(top)
    }

    /// Top of the stack without removing it.
    pub fn peek(&self, stack: ComponentId) -> SceneResult<Option<ComponentId>> {
        Ok(self.card_stack(stack)?.peek())
    }

    // --- grid panes ---

    /// Place `occupant` in a cell, or clear the cell with `None`. The previous
    /// occupant, if any, is detached and returned.
    pub fn set_cell(
        &mut self,
        grid: ComponentId,
        column: usize,
        row: usize,
        occupant: Option<ComponentId>,
    ) -> SceneResult<Option<ComponentId>> {
        self.update_grid(grid, |cells| cells.set(column, row, occupant))
    }

    /// Apply a structural change to a grid pane's grid.
    ///
    /// The change runs on a copy and is committed only if it succeeds and every
    /// newly placed occupant is attachable. Occupants that disappear from the
    /// grid are detached. After the commit the pane is laid out again, then its
    /// structure observers see the old and new dimensions.
    pub fn update_grid<R>(
        &mut self,
        id: ComponentId,
        update: impl FnOnce(&mut Grid<ComponentId>) -> GridResult<R>,
    ) -> SceneResult<R> {
        let pane = self.grid_pane(id)?;
        let old_dimensions = pane.dimensions();
        let before: HashSet<ComponentId> = pane.grid.occupied().map(|(_, _, child)| *child).collect();
        let mut grid = pane.grid.clone();

        let result = update(&mut grid)?;

        let mut after = HashSet::new();
        for (_, _, child) in grid.occupied() {
            if !after.insert(*child) {
                return Err(SceneError::AlreadyHasParent(*child));
            }
        }
        for added in after.difference(&before) {
            self.check_attachable(id, *added)?;
        }

        let new_dimensions = (grid.columns(), grid.rows());
        if let Some(pane) = self.components.get_mut(&id).and_then(Component::as_grid_pane_mut) {
            pane.grid = grid;
        }
        for removed in before.difference(&after) {
            if let Some(component) = self.components.get_mut(removed) {
                component.parent = None;
            }
        }
        for added in after.difference(&before) {
            if let Some(component) = self.components.get_mut(added) {
                component.parent = Some(id);
            }
        }
        log::debug!(
            "Grid {id} committed: {}x{} -> {}x{}",
            old_dimensions.0,
            old_dimensions.1,
            new_dimensions.0,
            new_dimensions.1
        );

        self.relayout(id);
        if let Some(pane) = self.components.get_mut(&id).and_then(Component::as_grid_pane_mut) {
            pane.structure.notify(&old_dimensions, &new_dimensions);
        }
        Ok(result)
    }

    // --- layout inputs ---

    /// Commit a layout input: store silently, re-layout, then notify the
    /// public observers. Returns false if the value ends up unchanged, which
    /// includes a container layout overriding it.
    fn commit<T: Clone + PartialEq>(
        &mut self,
        id: ComponentId,
        value: T,
        select: Selector<T>,
        expected: &'static str,
    ) -> SceneResult<bool> {
        let component = self.component_mut(id)?;
        let actual = component.kind.name();
        let Some(property) = select(component) else {
            return Err(SceneError::WrongKind { id, expected, actual });
        };
        if *property.get() == value {
            return Ok(false);
        }
        let old = property.set_silent(value);

        self.layout_input_changed(id);

        let Some(property) = self.components.get_mut(&id).and_then(select) else {
            return Ok(false);
        };
        if *property.get() == old {
            return Ok(false);
        }
        property.notify(&old);
        Ok(true)
    }

    fn layout_input_changed(&mut self, id: ComponentId) {
        self.relayout(id);
        if let Some(parent) = self.parent(id) {
            self.relayout(parent);
        }
    }

    /// Inside a linear layout or card stack the layout overrides the
    /// requested position.
    pub fn set_position(&mut self, id: ComponentId, position: Coordinate) -> SceneResult<bool> {
        self.commit(id, position, position_of, "component")
    }

    /// Returns whether the width changed.
    pub fn set_width(&mut self, id: ComponentId, width: f64) -> SceneResult<bool> {
        check_dimension(width)?;
        self.commit(id, width, width_of, "component")
    }

    /// Returns whether the height changed.
    pub fn set_height(&mut self, id: ComponentId, height: f64) -> SceneResult<bool> {
        check_dimension(height)?;
        self.commit(id, height, height_of, "component")
    }

    /// Both dimensions are validated before either is applied.
    pub fn set_size(&mut self, id: ComponentId, size: Size) -> SceneResult<bool> {
        check_dimension(size.width)?;
        check_dimension(size.height)?;
        let width = self.set_width(id, size.width)?;
        let height = self.set_height(id, size.height)?;
        Ok(width || height)
    }

    /// Rotation in degrees; stored normalized to `[0, 360)`.
    pub fn set_rotation(&mut self, id: ComponentId, rotation: f64) -> SceneResult<bool> {
        check_rotation(rotation)?;
        self.commit(id, normalize_rotation(rotation), rotation_of, "component")
    }

    /// Scale must be positive and finite.
    pub fn set_scale(&mut self, id: ComponentId, scale: f64) -> SceneResult<bool> {
        check_scale(scale)?;
        self.commit(id, scale, scale_of, "component")
    }

    /// Linear layouts accept any spacing; grid panes only non-negative values.
    pub fn set_spacing(&mut self, id: ComponentId, spacing: f64) -> SceneResult<bool> {
        if self.grid_pane(id).is_ok() {
            check_spacing(spacing)?;
        }
        self.commit(id, spacing, spacing_of, "linear layout or grid pane")
    }

    /// Packing direction of a linear layout.
    pub fn set_orientation(&mut self, id: ComponentId, orientation: Orientation) -> SceneResult<bool> {
        self.commit(id, orientation, orientation_of, "linear layout")
    }

    /// Alignment of a linear layout or card stack.
    pub fn set_alignment(&mut self, id: ComponentId, alignment: Alignment) -> SceneResult<bool> {
        self.commit(id, alignment, alignment_of, "linear layout or card stack")
    }

    /// Move a component during a drag: observers are notified but the parent
    /// layout does not run.
    pub(crate) fn drag_to(&mut self, id: ComponentId, position: Coordinate) -> bool {
        let Some(component) = self.components.get_mut(&id) else {
            return false;
        };
        let old = component.position.set_silent(position);
        if old != position {
            component.position.notify(&old);
        }
        true
    }

    // --- layout ---

    /// Recompute the positions of a container's children. Leaves and panes
    /// have nothing to do.
    pub fn relayout(&mut self, id: ComponentId) {
        let Some(component) = self.components.get(&id) else {
            return;
        };
        let container = component.size();
        match &component.kind {
            ComponentKind::LinearLayout(layout) => {
                let children = layout.children.clone();
                let positions = layout.packer().pack(container, &self.sizes_of(&children));
                self.place_children(&children, positions);
            }
            ComponentKind::CardStack(stack) => {
                let children = stack.children.clone();
                let positions = stack.aligner().pack(container, &self.sizes_of(&children));
                self.place_children(&children, positions);
            }
            ComponentKind::GridPane(_) => self.relayout_grid(id),
            ComponentKind::Leaf | ComponentKind::Pane(_) => {}
        }
    }

    fn sizes_of(&self, children: &[ComponentId]) -> Vec<Size> {
        children
            .iter()
            .map(|child| self.get(*child).map(Component::size).unwrap_or(Size::ZERO))
            .collect()
    }

    fn place_children(&mut self, children: &[ComponentId], positions: Vec<Coordinate>) {
        for (child, position) in children.iter().zip(positions) {
            if let Some(component) = self.components.get_mut(child) {
                component.position.set_silent(position);
            }
        }
    }

    fn cell_metrics(&self, id: ComponentId) -> Option<CellMetrics> {
        let component = self.get(id)?;
        Some(CellMetrics {
            size: component.size(),
            offset: component.position(),
            rotation: component.rotation(),
            scale: component.scale(),
        })
    }

    fn relayout_grid(&mut self, id: ComponentId) {
        let Ok(pane) = self.grid_pane(id) else {
            return;
        };
        let layout = GridLayout::compute(&pane.grid, pane.spacing(), |child| self.cell_metrics(*child));
        let anchors: HashMap<ComponentId, Coordinate> = pane
            .grid
            .occupied()
            .filter_map(|(column, row, child)| {
                let metrics = self.cell_metrics(*child)?;
                let alignment = pane.grid.cell_center_mode(column, row).ok()?;
                Some((*child, layout.place(column, row, alignment, &metrics) - metrics.offset))
            })
            .collect();
        let size = layout.size();

        if let Some(pane) = self.components.get_mut(&id).and_then(Component::as_grid_pane_mut) {
            pane.layout = layout;
            pane.anchors = anchors;
        }
        self.resize_from_layout(id, size);
    }

    /// Apply a size computed by the container itself, then re-layout the
    /// parent and notify observers.
    fn resize_from_layout(&mut self, id: ComponentId, size: Size) {
        let Some(component) = self.components.get_mut(&id) else {
            return;
        };
        let old_width = component.width.set_silent(size.width);
        let old_height = component.height.set_silent(size.height);
        if old_width == size.width && old_height == size.height {
            return;
        }
        let parent = component.parent;

        if let Some(parent) = parent {
            self.relayout(parent);
        }
        if let Some(component) = self.components.get_mut(&id) {
            if old_width != size.width {
                component.width.notify(&old_width);
            }
            if old_height != size.height {
                component.height.notify(&old_height);
            }
        }
    }

    // --- geometry ---

    /// Where `child` sits inside `parent`'s local frame.
    pub fn child_coordinate(&self, parent: ComponentId, child: ComponentId) -> Option<Coordinate> {
        self.get(parent)?.kind.as_traversable()?.child_coordinate(self, child)
    }

    /// Where a component sits in its parent's frame. Roots and detached
    /// components report their own position.
    pub fn coordinate_in_parent(&self, id: ComponentId) -> Option<Coordinate> {
        let component = self.get(id)?;
        match component.parent {
            Some(parent) => self.child_coordinate(parent, id),
            None => Some(component.position()),
        }
    }

    /// Map a point from a component's local frame into scene space.
    pub fn local_to_scene(&self, id: ComponentId, local: Coordinate) -> Option<Coordinate> {
        let mut point = local;
        let mut current = id;
        loop {
            let component = self.get(current)?;
            point = component.to_parent(self.coordinate_in_parent(current)?, point);
            match component.parent {
                Some(parent) => current = parent,
                None => return Some(point),
            }
        }
    }

    /// Map a scene-space point into a component's local frame.
    pub fn scene_to_local(&self, id: ComponentId, point: Coordinate) -> Option<Coordinate> {
        let mut path = self.ancestors(id);
        path.reverse();
        path.push(id);
        path.into_iter().try_fold(point, |point, node| {
            let component = self.get(node)?;
            Some(component.to_local(self.coordinate_in_parent(node)?, point))
        })
    }

    /// Axis-aligned scene-space bounds of a component's visual box.
    pub fn bounds(&self, id: ComponentId) -> Option<Rect> {
        let component = self.get(id)?;
        let (width, height) = (component.width(), component.height());
        let corners = [
            Coordinate::ORIGIN,
            Coordinate::new(width, 0.0),
            Coordinate::new(0.0, height),
            Coordinate::new(width, height),
        ];
        let mut bounds: Option<Rect> = None;
        for corner in corners {
            let point = self.local_to_scene(id, corner)?.to_point();
            bounds = Some(match bounds {
                Some(rect) => rect.union_pt(point),
                None => Rect::from_points(point, point),
            });
        }
        bounds
    }

    /// Union of the bounds of every root.
    pub fn scene_bounds(&self) -> Option<Rect> {
        self.roots
            .iter()
            .filter_map(|root| self.bounds(*root))
            .reduce(|a, b| a.union(b))
    }
}

fn wrong_kind(id: ComponentId, expected: &'static str, actual: &ComponentKind) -> SceneError {
    SceneError::WrongKind {
        id,
        expected,
        actual: actual.name(),
    }
}
