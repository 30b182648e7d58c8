use crate::coord::Coord;

/// Every kind of ground a tile can be made of.
/// The attributes of a kind never change, see [`TerrainKind::stats`].
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum TerrainKind {
    #[default]
    Plain,
    Forest,
    Mountain,
    Swamp,
    River,
    Obstacle,
    Volcanic,
    DeadForest,
    Ruin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainStats {
    /// Sight radius of a unit standing on the tile
    pub visibility: i32,

    /// Always positive
    pub move_cost: i32,

    /// No unit may ever stand on or be moved onto an obstructing tile
    pub obstructs: bool,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 9] = [
        TerrainKind::Plain,
        TerrainKind::Forest,
        TerrainKind::Mountain,
        TerrainKind::Swamp,
        TerrainKind::River,
        TerrainKind::Obstacle,
        TerrainKind::Volcanic,
        TerrainKind::DeadForest,
        TerrainKind::Ruin,
    ];

    pub const fn stats(&self) -> TerrainStats {
        let (visibility, move_cost, obstructs) = match self {
            TerrainKind::Plain => (4, 1, false),
            TerrainKind::Forest => (3, 2, false),
            TerrainKind::Mountain => (1, 3, false),
            TerrainKind::Swamp => (2, 2, false),
            TerrainKind::River => (2, 3, false),
            TerrainKind::Obstacle => (0, 1, true),
            TerrainKind::Volcanic => (2, 4, false),
            TerrainKind::DeadForest => (2, 2, false),
            TerrainKind::Ruin => (3, 1, false),
        };
        TerrainStats {
            visibility,
            move_cost,
            obstructs,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerrainKind::Plain => "Plain",
            TerrainKind::Forest => "Forest",
            TerrainKind::Mountain => "Mountain",
            TerrainKind::Swamp => "Swamp",
            TerrainKind::River => "River",
            TerrainKind::Obstacle => "Obstacle",
            TerrainKind::Volcanic => "Volcanic",
            TerrainKind::DeadForest => "Dead Forest",
            TerrainKind::Ruin => "Ruin",
        }
    }

    /// Symbolic reference handed to renderers, three characters wide
    pub fn glyph(&self) -> &'static str {
        match self {
            TerrainKind::Plain => "---",
            TerrainKind::Forest => "###",
            TerrainKind::Mountain => r"/\\",
            TerrainKind::Swamp => "~~~",
            TerrainKind::River => "...",
            TerrainKind::Obstacle => "<>>",
            TerrainKind::Volcanic => "^^^",
            TerrainKind::DeadForest => ",,,",
            TerrainKind::Ruin => "())",
        }
    }
}

/// A placed piece of terrain. Owned by the grid, never modified after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tile {
    pub at: Coord,
    pub kind: TerrainKind,
}

impl Tile {
    pub fn new(at: Coord, kind: TerrainKind) -> Self {
        Self { at, kind }
    }

    pub fn move_cost(&self) -> i32 {
        self.kind.stats().move_cost
    }

    pub fn obstructs(&self) -> bool {
        self.kind.stats().obstructs
    }

    pub fn visibility(&self) -> i32 {
        self.kind.stats().visibility
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_obstacles_obstruct() {
        for kind in TerrainKind::ALL {
            assert_eq!(kind.stats().obstructs, kind == TerrainKind::Obstacle, "{:?}", kind);
        }
    }

    #[test]
    fn costs_are_positive() {
        assert!(TerrainKind::ALL.iter().all(|kind| kind.stats().move_cost > 0));
    }

    #[test]
    fn glyphs_are_unique() {
        for a in TerrainKind::ALL {
            for b in TerrainKind::ALL {
                if a != b {
                    assert_ne!(a.glyph(), b.glyph());
                }
            }
        }
    }
}
