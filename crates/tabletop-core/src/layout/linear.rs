//! Packing components along one axis with adaptive spacing.

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;
use crate::coordinate::Coordinate;
use crate::observable::{Observers, Property};
use crate::scene::ComponentId;

/// Main axis of a [`LinearPacker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Places components one after another, shrinking the gaps when the content
/// does not fit.
///
/// If the content plus the requested spacing overflows the container, the
/// spacing is replaced by whatever value makes the sequence span the container
/// exactly. This can be negative, in which case neighbours overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPacker {
    pub spacing: f64,
    pub orientation: Orientation,
    pub alignment: Alignment,
}

impl Default for LinearPacker {
    fn default() -> Self {
        Self {
            spacing: 0.0,
            orientation: Orientation::Horizontal,
            alignment: Alignment::TopLeft,
        }
    }
}

impl LinearPacker {
    pub fn new(spacing: f64, orientation: Orientation, alignment: Alignment) -> Self {
        Self { spacing, orientation, alignment }
    }

    /// Spacing actually used for `count` items of `content` total length in an
    /// axis of length `available`.
    pub fn effective_spacing(&self, content: f64, available: f64, count: usize) -> f64 {
        if count < 2 {
            // No gaps to distribute; an oversized single item is simply placed.
            return if content > available { 0.0 } else { self.spacing };
        }
        let gaps = (count - 1) as f64;
        if content + gaps * self.spacing > available {
            -(content - available) / gaps
        } else {
            self.spacing
        }
    }

    /// Top-left position for each child, relative to the container.
    pub fn pack(&self, container: Size, children: &[Size]) -> Vec<Coordinate> {
        match self.orientation {
            Orientation::Horizontal => self.pack_along(
                container.width,
                container.height,
                children.iter().map(|s| (s.width, s.height)),
                self.alignment.horizontal().position_multiplier(),
                self.alignment.vertical().position_multiplier(),
            )
            .into_iter()
            .map(|(main, cross)| Coordinate::new(main, cross))
            .collect(),
            Orientation::Vertical => self.pack_along(
                container.height,
                container.width,
                children.iter().map(|s| (s.height, s.width)),
                self.alignment.vertical().position_multiplier(),
                self.alignment.horizontal().position_multiplier(),
            )
            .into_iter()
            .map(|(main, cross)| Coordinate::new(cross, main))
            .collect(),
        }
    }

    /// Axis-agnostic packing. Sizes are `(main, cross)`.
    fn pack_along(
        &self,
        main_available: f64,
        cross_available: f64,
        sizes: impl Iterator<Item = (f64, f64)> + Clone,
        main_multiplier: f64,
        cross_multiplier: f64,
    ) -> Vec<(f64, f64)> {
        let count = sizes.clone().count();
        if count == 0 {
            return Vec::new();
        }

        let content: f64 = sizes.clone().map(|(main, _)| main).sum();
        let spacing = self.effective_spacing(content, main_available, count);
        let total = content + (count - 1) as f64 * spacing;

        let mut cursor = (main_available - total) * main_multiplier;
        sizes
            .map(|(main, cross)| {
                let position = (cursor, (cross_available - cross) * cross_multiplier);
                cursor += main + spacing;
                position
            })
            .collect()
    }
}

/// Container state of a linear layout: ordered children plus the observable
/// packing inputs.
#[derive(Debug)]
pub struct LinearLayout {
    pub(crate) children: Vec<ComponentId>,
    pub(crate) spacing: Property<f64>,
    pub(crate) orientation: Property<Orientation>,
    pub(crate) alignment: Property<Alignment>,
}

impl LinearLayout {
    pub fn new(spacing: f64, orientation: Orientation, alignment: Alignment) -> Self {
        Self {
            children: Vec::new(),
            spacing: Property::new(spacing),
            orientation: Property::new(orientation),
            alignment: Property::new(alignment),
        }
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    pub fn spacing(&self) -> f64 {
        *self.spacing.get()
    }

    pub fn orientation(&self) -> Orientation {
        *self.orientation.get()
    }

    pub fn alignment(&self) -> Alignment {
        *self.alignment.get()
    }

    pub fn packer(&self) -> LinearPacker {
        LinearPacker::new(self.spacing(), self.orientation(), self.alignment())
    }

    pub fn spacing_observers(&mut self) -> &mut Observers<f64> {
        self.spacing.observers_mut()
    }

    pub fn orientation_observers(&mut self) -> &mut Observers<Orientation> {
        self.orientation.observers_mut()
    }

    pub fn alignment_observers(&mut self) -> &mut Observers<Alignment> {
        self.alignment.observers_mut()
    }
}

impl Default for LinearLayout {
    fn default() -> Self {
        let packer = LinearPacker::default();
        Self::new(packer.spacing, packer.orientation, packer.alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn sizes(widths: &[f64], height: f64) -> Vec<Size> {
        widths.iter().map(|w| Size::new(*w, height)).collect()
    }

    fn xs(positions: &[Coordinate]) -> Vec<f64> {
        positions.iter().map(|p| p.x()).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_overflow_shrinks_spacing() {
        let packer = LinearPacker::new(10.0, Orientation::Horizontal, Alignment::TopLeft);
        assert!((packer.effective_spacing(120.0, 100.0, 3) + 10.0).abs() < EPSILON);

        let positions = packer.pack(Size::new(100.0, 50.0), &sizes(&[40.0, 40.0, 40.0], 50.0));
        assert_close(&xs(&positions), &[0.0, 30.0, 60.0]);
    }

    #[test]
    fn test_fitting_content_keeps_user_spacing() {
        let packer = LinearPacker::new(5.0, Orientation::Horizontal, Alignment::TopLeft);
        let children = sizes(&[10.0, 20.0, 30.0], 10.0);
        let positions = packer.pack(Size::new(200.0, 10.0), &children);

        for i in 1..positions.len() {
            let gap = positions[i].x() - (positions[i - 1].x() + children[i - 1].width);
            assert!((gap - 5.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_overflow_tiles_container_for_every_alignment() {
        let children = sizes(&[70.0, 50.0, 30.0, 60.0], 20.0);
        for alignment in Alignment::ALL {
            let packer = LinearPacker::new(4.0, Orientation::Horizontal, alignment);
            let positions = packer.pack(Size::new(150.0, 40.0), &children);

            assert!(positions[0].x().abs() < EPSILON);
            let last = positions.len() - 1;
            assert!((positions[last].x() + children[last].width - 150.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_primary_alignment_offsets() {
        let children = sizes(&[10.0, 10.0], 10.0);
        let container = Size::new(100.0, 40.0);

        let center = LinearPacker::new(10.0, Orientation::Horizontal, Alignment::Center).pack(container, &children);
        assert_close(&xs(&center), &[35.0, 55.0]);
        assert!((center[0].y() - 15.0).abs() < EPSILON);

        let right = LinearPacker::new(10.0, Orientation::Horizontal, Alignment::BottomRight).pack(container, &children);
        assert_close(&xs(&right), &[70.0, 90.0]);
        assert!((right[0].y() - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_vertical_uses_heights() {
        let packer = LinearPacker::new(10.0, Orientation::Vertical, Alignment::TopCenter);
        let children = vec![Size::new(20.0, 40.0), Size::new(10.0, 40.0), Size::new(30.0, 40.0)];
        let positions = packer.pack(Size::new(60.0, 100.0), &children);

        let ys: Vec<f64> = positions.iter().map(|p| p.y()).collect();
        assert_close(&ys, &[0.0, 30.0, 60.0]);
        assert_close(&xs(&positions), &[20.0, 25.0, 15.0]);
    }

    #[test]
    fn test_single_oversized_child() {
        let packer = LinearPacker::new(10.0, Orientation::Horizontal, Alignment::CenterLeft);
        let positions = packer.pack(Size::new(50.0, 50.0), &sizes(&[80.0], 10.0));

        assert_eq!(positions.len(), 1);
        assert!(positions[0].x().is_finite());
        assert!(positions[0].x().abs() < EPSILON);
    }

    #[test]
    fn test_negative_user_spacing_overlaps() {
        let packer = LinearPacker::new(-5.0, Orientation::Horizontal, Alignment::TopLeft);
        let positions = packer.pack(Size::new(100.0, 10.0), &sizes(&[20.0, 20.0, 20.0], 10.0));
        assert_close(&xs(&positions), &[0.0, 15.0, 30.0]);
    }

    #[test]
    fn test_empty_input() {
        let packer = LinearPacker::default();
        assert!(packer.pack(Size::new(10.0, 10.0), &[]).is_empty());
    }
}
