//! Immutable captures of a laid-out scene.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use tabletop_core::{Alignment, ComponentId, ComponentKind, Coordinate, GridPane, Scene};

/// One grid cell and what sits in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub column: usize,
    pub row: usize,
    pub occupant: Option<ComponentId>,
    pub alignment: Alignment,
}

/// Grid pane state: dimensions, computed track sizes and cells in
/// column-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub columns: usize,
    pub rows: usize,
    pub spacing: f64,
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    pub cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    fn capture(pane: &GridPane) -> Self {
        let grid = pane.grid();
        let cells = grid
            .iter()
            .map(|cell| CellSnapshot {
                column: cell.column,
                row: cell.row,
                occupant: cell.occupant.copied(),
                alignment: grid
                    .cell_center_mode(cell.column, cell.row)
                    .unwrap_or_default(),
            })
            .collect();
        let layout = pane.layout();
        Self {
            columns: grid.columns(),
            rows: grid.rows(),
            spacing: pane.spacing(),
            column_widths: layout.column_widths.clone(),
            row_heights: layout.row_heights.clone(),
            cells,
        }
    }
}

/// A component as it was laid out when captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub id: ComponentId,
    pub name: String,
    pub kind: String,
    pub parent: Option<ComponentId>,
    /// Final position in the parent's frame.
    pub position: Coordinate,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale: f64,
    pub visible: bool,
    pub draggable: bool,
    /// Paint order, bottom to top.
    pub children: Vec<ComponentId>,
    /// Axis-aligned bounds in scene space.
    pub bounds: Option<Rect>,
    pub grid: Option<GridSnapshot>,
}

/// Every component reachable from the roots, depth first in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub roots: Vec<ComponentId>,
    pub components: Vec<ComponentSnapshot>,
}

impl SceneSnapshot {
    /// Capture the current state of `scene`.
    pub fn capture(scene: &Scene) -> Self {
        let mut components = Vec::with_capacity(scene.len());
        let mut pending: Vec<ComponentId> = scene.roots().iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            let Some(component) = scene.get(id) else {
                continue;
            };
            let children = scene.children(id);
            pending.extend(children.iter().rev().copied());

            let grid = match component.kind() {
                ComponentKind::GridPane(pane) => Some(GridSnapshot::capture(pane)),
                _ => None,
            };
            components.push(ComponentSnapshot {
                id,
                name: component.name().to_string(),
                kind: component.kind().name().to_string(),
                parent: component.parent(),
                position: scene.coordinate_in_parent(id).unwrap_or(component.position()),
                width: component.width(),
                height: component.height(),
                rotation: component.rotation(),
                scale: component.scale(),
                visible: component.is_visible(),
                draggable: component.is_draggable(),
                children,
                bounds: scene.bounds(id),
                grid,
            });
        }
        Self {
            roots: scene.roots().to_vec(),
            components,
        }
    }

    pub fn get(&self, id: ComponentId) -> Option<&ComponentSnapshot> {
        self.components.iter().find(|component| component.id == id)
    }

    /// Find the first component with the given name.
    pub fn find(&self, name: &str) -> Option<&ComponentSnapshot> {
        self.components.iter().find(|component| component.name == name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_core::{Component, LinearLayout};

    #[test]
    fn test_capture_records_laid_out_positions() {
        let mut scene = Scene::new();
        let hand = scene
            .spawn_root(Component::linear_layout(100.0, 40.0, LinearLayout::default()).named("hand"))
            .unwrap();
        let cards: Vec<_> = (0..3)
            .map(|_| scene.spawn_child(hand, Component::leaf(40.0, 40.0)).unwrap())
            .collect();

        let snapshot = SceneSnapshot::capture(&scene);

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.roots, vec![hand]);
        let xs: Vec<f64> = cards
            .iter()
            .map(|card| snapshot.get(*card).unwrap().position.x())
            .collect();
        assert_eq!(xs, vec![0.0, 30.0, 60.0]);
        assert_eq!(snapshot.find("hand").unwrap().kind, "linear layout");
        assert_eq!(snapshot.get(cards[1]).unwrap().parent, Some(hand));
    }

    #[test]
    fn test_capture_is_depth_first() {
        let mut scene = Scene::new();
        let a = scene.spawn_root(Component::pane(10.0, 10.0).named("a")).unwrap();
        let b = scene.spawn_child(a, Component::leaf(1.0, 1.0).named("b")).unwrap();
        let c = scene.spawn_root(Component::pane(10.0, 10.0).named("c")).unwrap();

        let snapshot = SceneSnapshot::capture(&scene);
        let names: Vec<&str> = snapshot.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        let ids: Vec<ComponentId> = snapshot.components.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(snapshot.get(b).unwrap().parent, Some(a));
        assert_eq!(snapshot.get(c).unwrap().parent, None);
    }

    #[test]
    fn test_capture_grid_cells() {
        let mut scene = Scene::new();
        let board = scene
            .spawn_root(Component::grid_pane(GridPane::new(2, 1, 5.0).unwrap()))
            .unwrap();
        let token = scene.insert(Component::leaf(30.0, 20.0)).unwrap();
        scene.set_cell(board, 1, 0, Some(token)).unwrap();

        let snapshot = SceneSnapshot::capture(&scene);
        let grid = snapshot.get(board).unwrap().grid.as_ref().unwrap();

        assert_eq!((grid.columns, grid.rows), (2, 1));
        assert_eq!(grid.column_widths, vec![0.0, 30.0]);
        assert_eq!(grid.row_heights, vec![20.0]);
        assert_eq!(grid.cells.len(), 2);
        assert_eq!(grid.cells[1].occupant, Some(token));
        assert_eq!(grid.cells[1].alignment, Alignment::Center);
        assert_eq!(snapshot.get(token).unwrap().position, Coordinate::new(5.0, 0.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut scene = Scene::new();
        scene.spawn_root(Component::leaf(5.0, 5.0).named("chip")).unwrap();
        let snapshot = SceneSnapshot::capture(&scene);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
