//! Built-in preset maps, grouped by category.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDef {
    pub name: String,
    pub side: usize,
    /// Packed hex layout, two digits per tile. `None` means all plots empty.
    #[serde(default)]
    pub layout: Option<String>,
    /// Tool indices the player may use. `None` allows every tool.
    #[serde(default)]
    pub tools: Option<Vec<u8>>,
}

impl MapDef {
    fn new(name: &str, side: usize, layout: Option<&str>, tools: Option<&[u8]>) -> Self {
        Self {
            name: name.to_string(),
            side,
            layout: layout.map(str::to_string),
            tools: tools.map(<[u8]>::to_vec),
        }
    }

    /// Allowed tools in tool bar order. Unknown indices are skipped.
    pub fn allowed_tools(&self) -> Vec<ToolKind> {
        match &self.tools {
            Some(indices) => ToolKind::ALL
                .into_iter()
                .filter(|tool| indices.contains(&tool.index()))
                .collect(),
            None => ToolKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCategory {
    pub name: String,
    pub maps: Vec<MapDef>,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCatalog {
    pub categories: Vec<MapCategory>,
}

impl Default for MapCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MapCatalog {
    pub fn builtin() -> Self {
        let tut = vec![
            MapDef::new("up", 1, None, Some(&[1, 2])),
            MapDef::new("dbl", 2, Some("000000"), Some(&[0, 3])),
            MapDef::new("crs", 3, Some("F000F0000000F000F0"), Some(&[0, 1, 2, 3])),
            MapDef::new("qd", 3, Some("F000F0000000F00000"), Some(&[0, 1, 2, 4])),
            MapDef::new(
                "lim",
                5,
                Some("141414141414141414141414000000000000"),
                Some(&[0, 2, 6]),
            ),
        ];
        let puzzle = vec![
            MapDef::new("kpd", 3, None, Some(&[0, 1, 5, 6])),
            MapDef::new(
                "escr",
                5,
                Some("000000000000F0F0F00000F0F0F00000F0F0F0000000000000"),
                Some(&[0, 1, 2, 6]),
            ),
            MapDef::new(
                "hart",
                5,
                Some("00000000F00000000000000000000000000000F0F00000"),
                Some(&[0, 1, 2, 3, 4]),
            ),
            MapDef::new(
                "stlk",
                7,
                Some("F0F000F000F00000000000000000F000F000F000"),
                Some(&[0, 1, 2, 3, 5, 6]),
            ),
            MapDef::new(
                "chkr",
                8,
                Some(concat!(
                    "00F000F000F000F0F000F000F000F000",
                    "00F000F000F000F0F000F000F000F000",
                    "00F000F000F000F0F000F000F000F000",
                    "00F000F000F00000F000F000F0000000",
                )),
                None,
            ),
        ];
        let canvas = [3, 5, 7, 9, 11]
            .into_iter()
            .map(|side| MapDef::new(&format!("{side}x{side}"), side, None, None))
            .chain(std::iter::once(MapDef::new("absurd", 64, None, None)))
            .collect();

        Self {
            categories: vec![
                MapCategory {
                    name: "tut".to_string(),
                    maps: tut,
                },
                MapCategory {
                    name: "puzzle".to_string(),
                    maps: puzzle,
                },
                MapCategory {
                    name: "canvas".to_string(),
                    maps: canvas,
                },
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn category(&self, name: &str) -> Option<&MapCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn get(&self, category: &str, index: usize) -> Option<&MapDef> {
        self.category(category)?.maps.get(index)
    }
}

/// The map currently on the board.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentMap {
    pub category: String,
    pub index: usize,
    pub name: String,
    pub allowed: Vec<ToolKind>,
}
