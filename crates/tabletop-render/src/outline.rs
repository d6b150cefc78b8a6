//! Plain-text renderer that prints the component tree.

use std::collections::HashMap;
use std::fmt::Write;

use tabletop_core::ComponentId;

use crate::renderer::{RenderResult, Renderer, RendererError};
use crate::snapshot::{CellSnapshot, ComponentSnapshot, SceneSnapshot};

/// Renders a snapshot as an indented outline, one line per component.
///
/// ```text
/// grid pane "board" (0, 0) 35x20 grid 2x1 columns [0, 30] rows [20]
///   [1,0] Center leaf "token" (5, 0) 30x20
/// ```
#[derive(Debug, Clone)]
pub struct OutlineRenderer {
    indent: usize,
    output: String,
    frames: usize,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self::with_indent(2)
    }

    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            output: String::new(),
            frames: 0,
        }
    }

    /// Text of the last rendered frame.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn write_component(
        &mut self,
        lookup: &HashMap<ComponentId, &ComponentSnapshot>,
        id: ComponentId,
        depth: usize,
        cell: Option<&CellSnapshot>,
    ) -> RenderResult<()> {
        let component = lookup
            .get(&id)
            .ok_or_else(|| RendererError::UnknownComponent(id.to_string()))?;

        let mut line = " ".repeat(depth * self.indent);
        if let Some(cell) = cell {
            write!(line, "[{},{}] {:?} ", cell.column, cell.row, cell.alignment).map_err(format_error)?;
        }
        line.push_str(&component.kind);
        if !component.name.is_empty() {
            write!(line, " \"{}\"", component.name).map_err(format_error)?;
        }
        write!(
            line,
            " ({}, {}) {}x{}",
            component.position.x(),
            component.position.y(),
            component.width,
            component.height
        )
        .map_err(format_error)?;
        if component.rotation != 0.0 {
            write!(line, " rot {}", component.rotation).map_err(format_error)?;
        }
        if component.scale != 1.0 {
            write!(line, " scale {}", component.scale).map_err(format_error)?;
        }
        if let Some(grid) = &component.grid {
            write!(
                line,
                " grid {}x{} columns {} rows {}",
                grid.columns,
                grid.rows,
                list(&grid.column_widths),
                list(&grid.row_heights)
            )
            .map_err(format_error)?;
        }
        if !component.visible {
            line.push_str(" hidden");
        }
        if component.draggable {
            line.push_str(" draggable");
        }
        self.output.push_str(&line);
        self.output.push('\n');

        for child in &component.children {
            let cell = component
                .grid
                .as_ref()
                .and_then(|grid| grid.cells.iter().find(|cell| cell.occupant == Some(*child)));
            self.write_component(lookup, *child, depth + 1, cell)?;
        }
        Ok(())
    }
}

impl Renderer for OutlineRenderer {
    fn render(&mut self, snapshot: &SceneSnapshot) -> RenderResult<()> {
        self.output.clear();
        let lookup: HashMap<ComponentId, &ComponentSnapshot> = snapshot
            .components
            .iter()
            .map(|component| (component.id, component))
            .collect();
        for root in &snapshot.roots {
            self.write_component(&lookup, *root, 0, None)?;
        }
        self.frames += 1;
        log::trace!("Outline frame {} has {} lines", self.frames, self.output.lines().count());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "outline"
    }
}

fn format_error(err: std::fmt::Error) -> RendererError {
    RendererError::RenderFailed(err.to_string())
}

fn list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|value| value.to_string()).collect();
    format!("[{}]", items.join(", "))
}
