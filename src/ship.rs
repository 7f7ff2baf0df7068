//! Ship templates and orientations.

use core::fmt;

/// Orientation of a ship footprint on the board.
///
/// `Horizontal` keeps the template's own `height × width`; `Vertical` swaps
/// the two. Square templates only ever use `Horizontal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Immutable ship template: name and rectangular footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipTemplate {
    name: &'static str,
    height: usize,
    width: usize,
}

impl ShipTemplate {
    /// Create a new ship template.
    pub const fn new(name: &'static str, height: usize, width: usize) -> Self {
        Self {
            name,
            height,
            width,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells the ship covers.
    pub const fn area(&self) -> usize {
        self.height * self.width
    }

    pub fn is_square(&self) -> bool {
        self.height == self.width
    }

    /// Distinct orientations, native first.
    pub fn orientations(&self) -> &'static [Orientation] {
        if self.is_square() {
            &[Orientation::Horizontal]
        } else {
            &[Orientation::Horizontal, Orientation::Vertical]
        }
    }

    /// `(rows, cols)` spanned by the footprint in `orientation`.
    pub fn dimensions(&self, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Horizontal => (self.height, self.width),
            Orientation::Vertical => (self.width, self.height),
        }
    }
}

impl fmt::Display for ShipTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.name, self.height, self.width)
    }
}
