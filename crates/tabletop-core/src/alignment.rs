//! Horizontal and vertical alignment used by layouts and grid cells.

use serde::{Deserialize, Serialize};

/// Horizontal component of an [`Alignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAlignment {
    /// Fraction of the remaining space placed before the content.
    pub fn position_multiplier(self) -> f64 {
        match self {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Center => 0.5,
            HorizontalAlignment::Right => 1.0,
        }
    }
}

/// Vertical component of an [`Alignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalAlignment {
    /// Fraction of the remaining space placed before the content.
    pub fn position_multiplier(self) -> f64 {
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => 0.5,
            VerticalAlignment::Bottom => 1.0,
        }
    }
}

/// One of the nine anchor points of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    /// All nine alignments, row by row.
    pub const ALL: [Alignment; 9] = [
        Alignment::TopLeft,
        Alignment::TopCenter,
        Alignment::TopRight,
        Alignment::CenterLeft,
        Alignment::Center,
        Alignment::CenterRight,
        Alignment::BottomLeft,
        Alignment::BottomCenter,
        Alignment::BottomRight,
    ];

    /// Combine a vertical and a horizontal component.
    pub fn of(vertical: VerticalAlignment, horizontal: HorizontalAlignment) -> Self {
        use HorizontalAlignment as H;
        use VerticalAlignment as V;
        match (vertical, horizontal) {
            (V::Top, H::Left) => Alignment::TopLeft,
            (V::Top, H::Center) => Alignment::TopCenter,
            (V::Top, H::Right) => Alignment::TopRight,
            (V::Center, H::Left) => Alignment::CenterLeft,
            (V::Center, H::Center) => Alignment::Center,
            (V::Center, H::Right) => Alignment::CenterRight,
            (V::Bottom, H::Left) => Alignment::BottomLeft,
            (V::Bottom, H::Center) => Alignment::BottomCenter,
            (V::Bottom, H::Right) => Alignment::BottomRight,
        }
    }

    pub fn horizontal(self) -> HorizontalAlignment {
        match self {
            Alignment::TopLeft | Alignment::CenterLeft | Alignment::BottomLeft => HorizontalAlignment::Left,
            Alignment::TopCenter | Alignment::Center | Alignment::BottomCenter => HorizontalAlignment::Center,
            Alignment::TopRight | Alignment::CenterRight | Alignment::BottomRight => HorizontalAlignment::Right,
        }
    }

    pub fn vertical(self) -> VerticalAlignment {
        match self {
            Alignment::TopLeft | Alignment::TopCenter | Alignment::TopRight => VerticalAlignment::Top,
            Alignment::CenterLeft | Alignment::Center | Alignment::CenterRight => VerticalAlignment::Center,
            Alignment::BottomLeft | Alignment::BottomCenter | Alignment::BottomRight => VerticalAlignment::Bottom,
        }
    }

    /// Offset that places a `(width, height)` box at this anchor inside a
    /// `(container_width, container_height)` box.
    pub fn anchor_offset(self, container_width: f64, container_height: f64, width: f64, height: f64) -> (f64, f64) {
        (
            (container_width - width) * self.horizontal().position_multiplier(),
            (container_height - height) * self.vertical().position_multiplier(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_roundtrips_components() {
        for alignment in Alignment::ALL {
            assert_eq!(Alignment::of(alignment.vertical(), alignment.horizontal()), alignment);
        }
    }

    #[test]
    fn test_default_is_center() {
        assert_eq!(Alignment::default(), Alignment::Center);
        assert_eq!(Alignment::default().horizontal(), HorizontalAlignment::Center);
        assert_eq!(Alignment::default().vertical(), VerticalAlignment::Center);
    }

    #[test]
    fn test_anchor_offset() {
        assert_eq!(Alignment::TopLeft.anchor_offset(100.0, 50.0, 20.0, 10.0), (0.0, 0.0));
        assert_eq!(Alignment::Center.anchor_offset(100.0, 50.0, 20.0, 10.0), (40.0, 20.0));
        assert_eq!(Alignment::BottomRight.anchor_offset(100.0, 50.0, 20.0, 10.0), (80.0, 40.0));
        assert_eq!(Alignment::CenterLeft.anchor_offset(100.0, 50.0, 20.0, 10.0), (0.0, 20.0));
    }
}
