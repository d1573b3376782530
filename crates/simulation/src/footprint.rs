//! Ground coverage of a building: how many plots it spans and which
//! neighbouring plots its anchor claims.

use serde::{Deserialize, Serialize};

/// Shape of a plot. The first four variants describe an anchor plot, the
/// last two describe plots that cannot be targeted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Footprint {
    /// 1x1.
    #[default]
    Single,
    /// 2x1, extends one plot in +X.
    Wide,
    /// 1x2, extends one plot in +Z.
    Deep,
    /// 2x2, extends in both directions.
    Quad,
    /// Consumed by a larger building anchored elsewhere.
    Claimed,
    /// No plot here; the map erased it.
    Void,
}

impl Footprint {
    /// Decodes the two low bits of a map layout digit.
    pub fn from_shape_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Footprint::Single,
            1 => Footprint::Wide,
            2 => Footprint::Deep,
            _ => Footprint::Quad,
        }
    }

    /// Numeric code handed to the renderer: `0..=3` for anchors, `-1` otherwise.
    pub fn code(self) -> i8 {
        match self {
            Footprint::Single => 0,
            Footprint::Wide => 1,
            Footprint::Deep => 2,
            Footprint::Quad => 3,
            Footprint::Claimed | Footprint::Void => -1,
        }
    }

    pub fn is_anchor(self) -> bool {
        !matches!(self, Footprint::Claimed | Footprint::Void)
    }

    pub fn extends_x(self) -> bool {
        matches!(self, Footprint::Wide | Footprint::Quad)
    }

    pub fn extends_z(self) -> bool {
        matches!(self, Footprint::Deep | Footprint::Quad)
    }

    /// Plots covered by a building with this footprint. Claimed and void
    /// plots cover nothing of their own.
    pub fn tile_count(self) -> u32 {
        match self {
            Footprint::Single => 1,
            Footprint::Wide | Footprint::Deep => 2,
            Footprint::Quad => 4,
            Footprint::Claimed | Footprint::Void => 0,
        }
    }

    /// Index deltas of the plots claimed by an anchor on a grid of `side`.
    /// Use `&offsets[..count]`.
    pub fn neighbor_offsets(self, side: usize) -> ([usize; 3], usize) {
        let mut offsets = [0; 3];
        let mut count = 0;
        if self.extends_x() {
            offsets[count] = 1;
            count += 1;
        }
        if self.extends_z() {
            offsets[count] = side;
            count += 1;
        }
        if self.extends_x() && self.extends_z() {
            offsets[count] = side + 1;
            count += 1;
        }
        (offsets, count)
    }

    /// Absolute indices claimed by an anchor at `anchor`, or `None` when the
    /// footprint would cross the right or bottom edge of the grid.
    pub fn claimed_cells(self, anchor: usize, side: usize) -> Option<([usize; 3], usize)> {
        if side == 0 || anchor >= side * side {
            return None;
        }
        let col = anchor % side;
        let row = anchor / side;
        if self.extends_x() && col + 1 >= side {
            return None;
        }
        if self.extends_z() && row + 1 >= side {
            return None;
        }
        let (mut cells, count) = self.neighbor_offsets(side);
        for cell in &mut cells[..count] {
            *cell += anchor;
        }
        Some((cells, count))
    }
}
