//! Overlapping placement at a fixed anchor.

use kurbo::Size;

use crate::alignment::Alignment;
use crate::coordinate::Coordinate;
use crate::observable::{Observers, Property};
use crate::scene::ComponentId;

/// Places every child at the same anchor of the container, ignoring siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackAligner {
    pub alignment: Alignment,
}

impl StackAligner {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    pub fn place(&self, container: Size, child: Size) -> Coordinate {
        let (x, y) = self
            .alignment
            .anchor_offset(container.width, container.height, child.width, child.height);
        Coordinate::new(x, y)
    }

    pub fn pack(&self, container: Size, children: &[Size]) -> Vec<Coordinate> {
        children.iter().map(|child| self.place(container, *child)).collect()
    }
}

/// A pile of components; the last child is the top of the stack.
#[derive(Debug, Default)]
pub struct CardStack {
    pub(crate) children: Vec<ComponentId>,
    pub(crate) alignment: Property<Alignment>,
}

impl CardStack {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            children: Vec::new(),
            alignment: Property::new(alignment),
        }
    }

    /// Children from bottom to top.
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    pub fn peek(&self) -> Option<ComponentId> {
        self.children.last().copied()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn alignment(&self) -> Alignment {
        *self.alignment.get()
    }

    pub fn aligner(&self) -> StackAligner {
        StackAligner::new(self.alignment())
    }

    pub fn alignment_observers(&mut self) -> &mut Observers<Alignment> {
        self.alignment.observers_mut()
    }
}
