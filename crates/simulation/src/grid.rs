use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    Residential,
    Commercial,
}

impl BuildingType {
    pub const ALL: [BuildingType; 2] = [BuildingType::Residential, BuildingType::Commercial];

    /// Wire code used by map layouts and the render snapshot.
    pub fn code(self) -> i8 {
        match self {
            BuildingType::Residential => 1,
            BuildingType::Commercial => 2,
        }
    }

    /// Slot in per-type statistics arrays.
    pub fn slot(self) -> usize {
        match self {
            BuildingType::Residential => 0,
            BuildingType::Commercial => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BuildingType::Residential),
            2 => Some(BuildingType::Commercial),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildingType::Residential => "Residential",
            BuildingType::Commercial => "Commercial",
        }
    }
}

/// One building plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Tile {
    /// Stories, fractional while a story is being raised.
    pub height: f32,
    pub building: Option<BuildingType>,
    pub footprint: Footprint,
}

impl Tile {
    pub const VOID: Tile = Tile {
        height: 0.0,
        building: None,
        footprint: Footprint::Void,
    };

    /// Whole stories this tile counts for, including one still rising.
    pub fn stories(&self) -> u32 {
        self.height.ceil().max(0.0) as u32
    }

    pub fn under_construction(&self) -> bool {
        self.height != self.height.ceil()
    }

    pub fn is_plot(&self) -> bool {
        self.footprint.is_anchor()
    }

    /// An untouched plot a new footprint may claim.
    pub fn is_vacant(&self) -> bool {
        self.footprint == Footprint::Single && self.building.is_none() && self.height == 0.0
    }
}

/// Problems found while decoding a packed layout. Such tiles become void.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutIssues {
    pub bad_digits: u32,
    pub too_tall: u32,
    pub bad_type: u32,
    pub unclaimable: u32,
    pub missing: u32,
}

impl LayoutIssues {
    pub fn total(&self) -> u32 {
        self.bad_digits + self.too_tall + self.bad_type + self.unclaimable + self.missing
    }
}

/// Dense row-major storage of every plot on a square map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CityGrid {
    pub tiles: Vec<Tile>,
    pub side: usize,
}

impl CityGrid {
    /// An empty map where every plot exists and is vacant.
    pub fn new(side: usize) -> Self {
        Self {
            tiles: vec![Tile::default(); side * side],
            side,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn in_bounds(&self, index: usize) -> bool {
        index < self.tiles.len()
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    pub fn set(&mut self, index: usize, tile: Tile) {
        if let Some(slot) = self.tiles.get_mut(index) {
            *slot = tile;
        }
    }

    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.side + col
    }

    /// `(col, row)` of an index.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        if self.side == 0 {
            return (0, 0);
        }
        (index % self.side, index / self.side)
    }

    /// Decodes a packed hex layout: two digits per tile, the height then
    /// `type << 2 | footprint`. Tiles past the end of a short layout are void,
    /// as is any tile whose digits don't describe a valid plot.
    pub fn from_layout(side: usize, layout: Option<&str>, max_height: u8) -> (Self, LayoutIssues) {
        let mut grid = Self::new(side);
        let mut issues = LayoutIssues::default();
        let Some(layout) = layout else {
            return (grid, issues);
        };

        let bytes = layout.as_bytes();
        for (i, tile) in grid.tiles.iter_mut().enumerate() {
            let (Some(&h), Some(&t)) = (bytes.get(2 * i), bytes.get(2 * i + 1)) else {
                *tile = Tile::VOID;
                issues.missing += 1;
                continue;
            };
            let (Some(height), Some(packed)) = (hex_digit(h), hex_digit(t)) else {
                *tile = Tile::VOID;
                issues.bad_digits += 1;
                continue;
            };
            if height > max_height {
                *tile = Tile::VOID;
                // The "F" digit is the usual way to erase a plot.
                if height != 0xF {
                    issues.too_tall += 1;
                }
                continue;
            }
            let type_code = packed >> 2;
            let building = match type_code {
                0 => None,
                code => match BuildingType::from_code(code) {
                    Some(b) => Some(b),
                    None => {
                        *tile = Tile::VOID;
                        issues.bad_type += 1;
                        continue;
                    }
                },
            };
            *tile = match building {
                Some(b) => Tile {
                    height: f32::from(height),
                    building: Some(b),
                    footprint: Footprint::from_shape_bits(packed),
                },
                // A plot without a building carries no height or shape.
                None => Tile::default(),
            };
        }

        grid.claim_preset_footprints(&mut issues);
        (grid, issues)
    }

    /// Marks the neighbours of preset multi-plot buildings as claimed. A
    /// building whose footprint can't be honoured is erased to void.
    fn claim_preset_footprints(&mut self, issues: &mut LayoutIssues) {
        for anchor in 0..self.tiles.len() {
            let tile = self.tiles[anchor];
            if tile.building.is_none() || tile.footprint.tile_count() < 2 {
                continue;
            }
            let claimable = tile
                .footprint
                .claimed_cells(anchor, self.side)
                .filter(|(cells, n)| cells[..*n].iter().all(|&c| self.tiles[c].is_vacant()));
            match claimable {
                Some((cells, n)) => {
                    for &c in &cells[..n] {
                        self.tiles[c].footprint = Footprint::Claimed;
                    }
                }
                None => {
                    self.tiles[anchor] = Tile::VOID;
                    issues.unclaimable += 1;
                }
            }
        }
    }
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
