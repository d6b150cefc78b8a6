//! Grid-backed container layout.

use std::collections::HashMap;

use kurbo::{Affine, Point, Rect, Size};

use crate::alignment::Alignment;
use crate::coordinate::Coordinate;
use crate::grid::{COLUMN_WIDTH_AUTO, Grid, ROW_HEIGHT_AUTO};
use crate::observable::{Observers, Property};
use crate::scene::{ComponentId, SceneError, SceneResult};

/// Grid dimensions as `(columns, rows)`, reported to structural observers.
pub type Structure = (usize, usize);

/// What the grid layout needs to know about one occupant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub size: Size,
    /// The occupant's own position, used as an offset inside its cell.
    pub offset: Coordinate,
    pub rotation: f64,
    pub scale: f64,
}

impl CellMetrics {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            offset: Coordinate::ORIGIN,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Axis-aligned size of the occupant after scaling and rotating about its center.
    pub fn layout_bounds(&self) -> Size {
        let scaled = Rect::from_origin_size(Point::ORIGIN, self.size * self.scale);
        if self.rotation % 360.0 == 0.0 {
            return scaled.size();
        }
        Affine::rotate(self.rotation.to_radians())
            .transform_rect_bbox(scaled)
            .size()
    }
}

/// Rendered extents of every column and row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    pub spacing: f64,
}

impl GridLayout {
    /// Resolve AUTO tracks from the occupants; fixed tracks are used as-is.
    pub fn compute<T>(grid: &Grid<T>, spacing: f64, metrics: impl Fn(&T) -> Option<CellMetrics>) -> Self {
        let mut auto_widths = vec![0.0_f64; grid.columns()];
        let mut auto_heights = vec![0.0_f64; grid.rows()];

        for (column, row, occupant) in grid.occupied() {
            let Some(metrics) = metrics(occupant) else {
                continue;
            };
            let bounds = metrics.layout_bounds();
            auto_widths[column] = auto_widths[column].max(bounds.width + metrics.offset.x());
            auto_heights[row] = auto_heights[row].max(bounds.height + metrics.offset.y());
        }

        let resolve = |fixed: &[f64], auto: Vec<f64>, sentinel: f64| -> Vec<f64> {
            fixed
                .iter()
                .zip(auto)
                .map(|(fixed, auto)| if *fixed == sentinel { auto } else { *fixed })
                .collect()
        };

        Self {
            column_widths: resolve(grid.column_widths(), auto_widths, COLUMN_WIDTH_AUTO),
            row_heights: resolve(grid.row_heights(), auto_heights, ROW_HEIGHT_AUTO),
            spacing,
        }
    }

    /// Total size: sum of the extents plus one spacing between neighbours.
    pub fn size(&self) -> Size {
        Size::new(
            Self::span(&self.column_widths, self.spacing),
            Self::span(&self.row_heights, self.spacing),
        )
    }

    fn span(extents: &[f64], spacing: f64) -> f64 {
        if extents.is_empty() {
            return 0.0;
        }
        extents.iter().sum::<f64>() + (extents.len() - 1) as f64 * spacing
    }

    /// Top-left corner of a cell.
    pub fn cell_origin(&self, column: usize, row: usize) -> Coordinate {
        let x: f64 = self.column_widths.iter().take(column).sum::<f64>() + column as f64 * self.spacing;
        let y: f64 = self.row_heights.iter().take(row).sum::<f64>() + row as f64 * self.spacing;
        Coordinate::new(x, y)
    }

    /// Position of an occupant's unrotated box so that its visual bounds sit
    /// at the requested anchor of the cell.
    pub fn place(&self, column: usize, row: usize, alignment: Alignment, metrics: &CellMetrics) -> Coordinate {
        let bounds = metrics.layout_bounds();
        let origin = self.cell_origin(column, row);
        let offset = metrics.offset;

        let delta_x = (bounds.width - metrics.size.width) / 2.0;
        let delta_y = (bounds.height - metrics.size.height) / 2.0;
        let column_width = self.column_widths.get(column).copied().unwrap_or_default();
        let row_height = self.row_heights.get(row).copied().unwrap_or_default();
        let remaining_x = column_width - bounds.width - offset.x();
        let remaining_y = row_height - bounds.height - offset.y();

        Coordinate::new(
            origin.x() + offset.x() + delta_x + remaining_x * alignment.horizontal().position_multiplier(),
            origin.y() + offset.y() + delta_y + remaining_y * alignment.vertical().position_multiplier(),
        )
    }
}

/// Container state of a grid pane.
#[derive(Debug)]
pub struct GridPane {
    pub(crate) grid: Grid<ComponentId>,
    pub(crate) spacing: Property<f64>,
    pub(crate) layout: GridLayout,
    /// Per occupant: placed position minus its own offset at layout time.
    pub(crate) anchors: HashMap<ComponentId, Coordinate>,
    pub(crate) structure: Observers<Structure>,
}

impl GridPane {
    pub fn new(columns: usize, rows: usize, spacing: f64) -> SceneResult<Self> {
        check_spacing(spacing)?;
        Ok(Self {
            grid: Grid::new(columns, rows),
            spacing: Property::new(spacing),
            layout: GridLayout::default(),
            anchors: HashMap::new(),
            structure: Observers::new(),
        })
    }

    pub fn grid(&self) -> &Grid<ComponentId> {
        &self.grid
    }

    pub fn dimensions(&self) -> Structure {
        (self.grid.columns(), self.grid.rows())
    }

    pub fn spacing(&self) -> f64 {
        *self.spacing.get()
    }

    /// Extents computed by the last layout pass.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn spacing_observers(&mut self) -> &mut Observers<f64> {
        self.spacing.observers_mut()
    }

    /// Observers notified with the old and new `(columns, rows)` after every
    /// committed grid change.
    pub fn structure_observers(&mut self) -> &mut Observers<Structure> {
        &mut self.structure
    }
}

pub(crate) fn check_spacing(spacing: f64) -> SceneResult<()> {
    if spacing >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidSpacing(spacing))
    }
}
