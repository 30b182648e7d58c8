//! Zone based terrain generation.
//!
//! The map is split into named rectangles (zones) that may overlap. Each zone
//! is filled with a shuffled bag of terrain whose composition follows the zone
//! weighting. Zones are painted in list order so later zones win where they
//! overlap.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::prelude::*;

/// Generated terrain, every cell is `Some` once generation completes
pub type Map = Grid<Option<Tile>>;

/// Slack allowed on the weight sum to absorb float noise
const WEIGHT_EPSILON: f64 = 1e-9;

/// Largest number of cells a generated map may have
pub const MAX_MAP_CELLS: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapGenError {
    #[error("map size must be positive, got {0}")]
    EmptyMap(Coord),

    #[error("map of {0} has more than {MAX_MAP_CELLS} cells")]
    TooLarge(Coord),

    #[error("weights of zone `{zone}` sum to {sum}, above 1")]
    WeightsExceedOne { zone: String, sum: f64 },

    #[error("zone `{zone}` has a negative weight for {kind:?}")]
    NegativeWeight { zone: String, kind: TerrainKind },
}

/// What happens to the part of a zone not covered by its weights
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResidualFill {
    /// Pad the tile bag with plains until it covers the whole zone
    #[default]
    Open,

    /// The bag runs out before the zone is filled, the remaining cells keep
    /// whatever an earlier zone painted there
    Omit,
}

/// Named rectangular area with its terrain weighting
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Zone {
    pub name: String,

    /// Inclusive top left corner
    pub min: Coord,

    /// Exclusive bottom right corner
    pub max: Coord,

    /// Fraction of the zone area given to each kind, must sum to at most 1
    pub weights: Vec<(TerrainKind, f64)>,
}

impl Zone {
    pub fn new(name: &str, min: Coord, max: Coord, weights: Vec<(TerrainKind, f64)>) -> Self {
        Self {
            name: name.to_string(),
            min,
            max,
            weights,
        }
    }

    pub fn size(&self) -> Coord {
        (self.max - self.min).max(Coord::ZERO)
    }

    pub fn area(&self) -> usize {
        let size = self.size();
        (size.x as usize).saturating_mul(size.y as usize)
    }

    /// Intersection with a map of `size`
    pub fn clip(&self, size: Coord) -> Zone {
        Zone {
            min: self.min.clamp(Coord::ZERO, size),
            max: self.max.clamp(Coord::ZERO, size),
            ..self.clone()
        }
    }

    pub fn contains(&self, pos: &Coord) -> bool {
        (self.min.x..self.max.x).contains(&pos.x) && (self.min.y..self.max.y).contains(&pos.y)
    }

    /// Cells of the zone in raster order
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        iter_area(self.size()).map(|off| off + self.min)
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<(), MapGenError> {
        if let Some((kind, _)) = self.weights.iter().find(|(_, w)| *w < 0.0) {
            return Err(MapGenError::NegativeWeight {
                zone: self.name.clone(),
                kind: *kind,
            });
        }
        let sum = self.weight_sum();
        if sum > 1.0 + WEIGHT_EPSILON {
            return Err(MapGenError::WeightsExceedOne {
                zone: self.name.clone(),
                sum,
            });
        }
        Ok(())
    }

    /// Unshuffled multiset of terrain for this zone, `floor(area * weight)` of each kind
    pub fn tile_bag(&self, residual: ResidualFill) -> Vec<TerrainKind> {
        let area = self.area();
        let mut bag: Vec<TerrainKind> = self
            .weights
            .iter()
            .flat_map(|(kind, weight)| {
                let count = (area as f64 * weight).floor() as usize;
                std::iter::repeat(*kind).take(count)
            })
            .collect();
        bag.truncate(area);
        if residual == ResidualFill::Open {
            bag.resize(area, TerrainKind::Plain);
        }
        bag
    }
}

/// Single zone weightings covering the whole map
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EnvironmentPreset {
    DarkForest,
    HighMountain,
    Plain,
    SwampObstacle,
    #[default]
    Mixed,
}

impl EnvironmentPreset {
    /// Forest, mountain, obstacle and swamp shares, the rest is plain
    pub fn weights(&self) -> Vec<(TerrainKind, f64)> {
        let (forest, mountain, obstacle, swamp) = match self {
            EnvironmentPreset::DarkForest => (0.60, 0.10, 0.10, 0.10),
            EnvironmentPreset::HighMountain => (0.05, 0.50, 0.15, 0.10),
            EnvironmentPreset::Plain => (0.20, 0.05, 0.10, 0.05),
            EnvironmentPreset::SwampObstacle => (0.20, 0.15, 0.25, 0.30),
            EnvironmentPreset::Mixed => (0.35, 0.20, 0.15, 0.15),
        };
        vec![
            (TerrainKind::Forest, forest),
            (TerrainKind::Mountain, mountain),
            (TerrainKind::Obstacle, obstacle),
            (TerrainKind::Swamp, swamp),
        ]
    }
}

/// How the map is split before filling
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Layout {
    /// Four overlapping quadrants plus a central zone, see [`five_zones`]
    #[default]
    FiveZones,
    Preset(EnvironmentPreset),
    Custom(Vec<Zone>),
}

impl Layout {
    pub fn zones(&self, size: Coord) -> Vec<Zone> {
        match self {
            Layout::FiveZones => five_zones(size),
            Layout::Preset(preset) => vec![Zone::new(
                "Whole Map",
                Coord::ZERO,
                size,
                preset.weights(),
            )],
            Layout::Custom(zones) => zones.clone(),
        }
    }
}

/// The default layout. Painted in order A (north west), B (north east),
/// C (south west), D (south east), E (center).
/// Quadrants reach an eighth of the map past the midlines so they overlap.
pub fn five_zones(size: Coord) -> Vec<Zone> {
    let half = size / 2;
    let overlap = (size / 8).max(Coord::ONE);
    let (w, h) = (size.x, size.y);
    vec![
        Zone::new(
            "Elven Woods",
            Coord::ZERO,
            half + overlap,
            vec![
                (TerrainKind::Forest, 0.45),
                (TerrainKind::DeadForest, 0.10),
                (TerrainKind::Plain, 0.20),
                (TerrainKind::River, 0.10),
                (TerrainKind::Obstacle, 0.05),
            ],
        ),
        Zone::new(
            "Dwarven Peaks",
            Coord::new(half.x - overlap.x, 0),
            Coord::new(w, half.y + overlap.y),
            vec![
                (TerrainKind::Mountain, 0.45),
                (TerrainKind::Obstacle, 0.10),
                (TerrainKind::Plain, 0.20),
                (TerrainKind::Ruin, 0.05),
                (TerrainKind::River, 0.05),
            ],
        ),
        Zone::new(
            "Orc Marsh",
            Coord::new(0, half.y - overlap.y),
            Coord::new(half.x + overlap.x, h),
            vec![
                (TerrainKind::Swamp, 0.45),
                (TerrainKind::River, 0.15),
                (TerrainKind::Forest, 0.10),
                (TerrainKind::Obstacle, 0.05),
                (TerrainKind::Plain, 0.15),
            ],
        ),
        Zone::new(
            "Troll Wastes",
            half - overlap,
            size,
            vec![
                (TerrainKind::Volcanic, 0.30),
                (TerrainKind::DeadForest, 0.25),
                (TerrainKind::Obstacle, 0.10),
                (TerrainKind::Mountain, 0.10),
                (TerrainKind::Swamp, 0.05),
            ],
        ),
        Zone::new(
            "Ruined Heart",
            size / 4,
            size - size / 4,
            vec![
                (TerrainKind::Ruin, 0.30),
                (TerrainKind::Plain, 0.40),
                (TerrainKind::River, 0.10),
                (TerrainKind::Obstacle, 0.05),
            ],
        ),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapGenerator {
    pub zones: Vec<Zone>,
    pub residual: ResidualFill,
}

impl MapGenerator {
    pub fn new(zones: Vec<Zone>, residual: ResidualFill) -> Self {
        Self { zones, residual }
    }

    pub fn from_layout(layout: &Layout, size: Coord, residual: ResidualFill) -> Self {
        Self::new(layout.zones(size), residual)
    }

    pub fn generate<R: Rng + ?Sized>(&self, size: Coord, rng: &mut R) -> Result<Map, MapGenError> {
        if size.x <= 0 || size.y <= 0 {
            return Err(MapGenError::EmptyMap(size));
        }
        match (size.x as usize).checked_mul(size.y as usize) {
            Some(cells) if cells <= MAX_MAP_CELLS => {}
            _ => return Err(MapGenError::TooLarge(size)),
        }
        for zone in self.zones.iter() {
            zone.validate()?;
        }

        let mut map: Map = Grid::default(size);
        for zone in self.zones.iter().map(|zone| zone.clip(size)) {
            if zone.area() == 0 {
                debug!(target: "map.gen", "zone `{}` is outside the map, skipped", zone.name);
                continue;
            }
            let mut bag = zone.tile_bag(self.residual);
            bag.shuffle(rng);
            trace!(
                target: "map.gen",
                "zone `{}` {}..{} area {} bag {}",
                zone.name,
                zone.min,
                zone.max,
                zone.area(),
                bag.len()
            );
            for (xy, kind) in zone.cells().zip(bag) {
                map.set(&xy, Some(Tile::new(xy, kind)));
            }
        }

        let mut backfilled = 0;
        for xy in iter_area(size) {
            if let Some(cell) = map.get_mut(&xy) {
                if cell.is_none() {
                    *cell = Some(Tile::new(xy, TerrainKind::Plain));
                    backfilled += 1;
                }
            }
        }
        if backfilled > 0 {
            debug!(target: "map.gen", "{} empty cells backfilled with plains", backfilled);
        }

        Ok(map)
    }
}

/// Session generator, reproducible only when a seed is given
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Default five zone map
pub fn generate_map(width: i32, height: i32, seed: Option<u64>) -> Result<Map, MapGenError> {
    let size = Coord::new(width, height);
    let mut rng = session_rng(seed);
    MapGenerator::from_layout(&Layout::FiveZones, size, ResidualFill::Open).generate(size, &mut rng)
}

/// Counts the tiles of each kind, used by tests and the map preview
pub fn census(map: &Map) -> Vec<(TerrainKind, usize)> {
    TerrainKind::ALL
        .iter()
        .map(|kind| {
            let count = map
                .iter()
                .filter(|(_, tile)| tile.map(|t| t.kind) == Some(*kind))
                .count();
            (*kind, count)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseMapError {
    #[error("the map string is empty")]
    EmptyString,

    #[error("row {0} has a different width than the first row")]
    RaggedRow(i32),

    #[error("terrain glyph `{0}` at {1} not recognized")]
    TerrainNotRecognized(String, Coord),
}

const GRID_SEPARATOR: &str = " ";

/// Builds a map from rows of terrain glyphs separated by single spaces
pub fn parse_map(map_string: &str) -> Result<Map, ParseMapError> {
    let lines: Vec<&str> = map_string
        .trim()
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(ParseMapError::EmptyString);
    }
    let row = lines[0].split(GRID_SEPARATOR).count();
    let size = Coord::new(row as i32, lines.len() as i32);

    let mut map: Map = Grid::default(size);
    for (y, line) in lines.iter().enumerate() {
        if line.split(GRID_SEPARATOR).count() != row {
            return Err(ParseMapError::RaggedRow(y as i32));
        }
        for (x, glyph) in line.split(GRID_SEPARATOR).enumerate() {
            let pos = Coord::new(x as i32, y as i32);
            let Some(kind) = TerrainKind::ALL.into_iter().find(|k| k.glyph() == glyph) else {
                return Err(ParseMapError::TerrainNotRecognized(glyph.to_string(), pos));
            };
            map.set(&pos, Some(Tile::new(pos, kind)));
        }
    }
    Ok(map)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::c;

    #[test]
    fn parse_glyph_rows() {
        let map = parse_map(
            r"
--- /\\ <>>
~~~ ### ...",
        )
        .unwrap();
        assert_eq!(map.size, c!(3, 2));
        assert_eq!(map.get(&c!(1, 0)).unwrap().unwrap().kind, TerrainKind::Mountain);
        assert_eq!(map.get(&c!(2, 1)).unwrap().unwrap().kind, TerrainKind::River);
        assert_eq!(
            parse_map("--- ?!?"),
            Err(ParseMapError::TerrainNotRecognized("?!?".to_string(), c!(1, 0)))
        );
        assert_eq!(parse_map("--- ---\n---"), Err(ParseMapError::RaggedRow(1)));
    }

    fn count(map: &Map, kind: TerrainKind) -> usize {
        census(map)
            .into_iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, n)| n)
    }

    #[test]
    fn every_cell_is_filled() {
        for (w, h) in [(1, 1), (3, 7), (16, 16), (33, 17)] {
            let map = generate_map(w, h, Some(7)).unwrap();
            for xy in iter_area(c!(w, h)) {
                let tile = map.get(&xy).unwrap().unwrap();
                assert_eq!(tile.at, xy);
            }
        }
    }

    #[test]
    fn same_seed_same_map() {
        let a = generate_map(24, 12, Some(42)).unwrap();
        let b = generate_map(24, 12, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bag_counts_are_floored() {
        let zone = Zone::new(
            "z",
            c!(0, 0),
            c!(3, 3),
            vec![(TerrainKind::Forest, 0.5), (TerrainKind::Swamp, 0.25)],
        );
        let bag = zone.tile_bag(ResidualFill::Omit);
        // floor(4.5) + floor(2.25)
        assert_eq!(bag.len(), 6);
        let padded = zone.tile_bag(ResidualFill::Open);
        assert_eq!(padded.len(), 9);
        assert_eq!(padded.iter().filter(|k| **k == TerrainKind::Plain).count(), 3);
    }

    #[test]
    fn preset_composition_matches_weights() {
        let size = c!(10, 10);
        let mut rng = session_rng(Some(1));
        let map = MapGenerator::from_layout(
            &Layout::Preset(EnvironmentPreset::DarkForest),
            size,
            ResidualFill::Open,
        )
        .generate(size, &mut rng)
        .unwrap();
        assert_eq!(count(&map, TerrainKind::Forest), 60);
        assert_eq!(count(&map, TerrainKind::Mountain), 10);
        assert_eq!(count(&map, TerrainKind::Obstacle), 10);
        assert_eq!(count(&map, TerrainKind::Swamp), 10);
        assert_eq!(count(&map, TerrainKind::Plain), 10);
    }

    #[test]
    fn later_zones_overwrite_earlier_ones() {
        let size = c!(4, 4);
        let zones = vec![
            Zone::new("under", c!(0, 0), c!(4, 4), vec![(TerrainKind::Swamp, 1.0)]),
            Zone::new("over", c!(1, 1), c!(3, 3), vec![(TerrainKind::Ruin, 1.0)]),
        ];
        let mut rng = session_rng(Some(3));
        let map = MapGenerator::new(zones, ResidualFill::Open)
            .generate(size, &mut rng)
            .unwrap();
        assert_eq!(count(&map, TerrainKind::Ruin), 4);
        assert_eq!(count(&map, TerrainKind::Swamp), 12);
        assert_eq!(map.get(&c!(1, 1)).unwrap().unwrap().kind, TerrainKind::Ruin);
    }

    #[test]
    fn omitted_residual_keeps_earlier_paint_then_backfills() {
        let size = c!(4, 1);
        let zones = vec![
            Zone::new("base", c!(0, 0), c!(4, 1), vec![(TerrainKind::Swamp, 1.0)]),
            Zone::new("top", c!(0, 0), c!(4, 1), vec![(TerrainKind::Ruin, 0.5)]),
            Zone::new("gap", c!(4, 0), c!(9, 9), vec![(TerrainKind::Ruin, 1.0)]),
        ];
        let mut rng = session_rng(Some(3));
        let map = MapGenerator::new(zones, ResidualFill::Omit)
            .generate(size, &mut rng)
            .unwrap();
        // raster order: the two ruins land first, the tail stays swamp
        let kinds: Vec<TerrainKind> = map.iter().map(|(_, t)| t.unwrap().kind).collect();
        assert_eq!(
            kinds,
            vec![
                TerrainKind::Ruin,
                TerrainKind::Ruin,
                TerrainKind::Swamp,
                TerrainKind::Swamp
            ]
        );
    }

    #[test]
    fn empty_zone_cells_are_backfilled() {
        let size = c!(3, 3);
        let zones = vec![Zone::new("corner", c!(0, 0), c!(1, 1), vec![(TerrainKind::Forest, 1.0)])];
        let mut rng = session_rng(Some(5));
        let map = MapGenerator::new(zones, ResidualFill::Omit)
            .generate(size, &mut rng)
            .unwrap();
        assert_eq!(count(&map, TerrainKind::Forest), 1);
        assert_eq!(count(&map, TerrainKind::Plain), 8);
    }

    #[test]
    fn overweight_zone_is_rejected() {
        let zones = vec![Zone::new(
            "heavy",
            c!(0, 0),
            c!(2, 2),
            vec![(TerrainKind::Forest, 0.7), (TerrainKind::Swamp, 0.4)],
        )];
        let mut rng = session_rng(Some(5));
        let err = MapGenerator::new(zones, ResidualFill::Open)
            .generate(c!(2, 2), &mut rng)
            .unwrap_err();
        assert!(matches!(err, MapGenError::WeightsExceedOne { .. }));
    }

    #[test]
    fn empty_map_is_rejected() {
        assert_eq!(generate_map(0, 5, None), Err(MapGenError::EmptyMap(c!(0, 5))));
    }

    #[test]
    fn oversized_map_is_rejected() {
        assert_eq!(
            generate_map(70000, 70000, Some(1)),
            Err(MapGenError::TooLarge(c!(70000, 70000)))
        );
        assert_eq!(
            generate_map(i32::MAX, i32::MAX, Some(1)),
            Err(MapGenError::TooLarge(c!(i32::MAX, i32::MAX)))
        );
        assert!(matches!(
            generate_map(4097, 4096, None),
            Err(MapGenError::TooLarge(_))
        ));
    }

    #[test]
    fn five_zones_cover_the_map() {
        let size = c!(32, 16);
        let zones = five_zones(size);
        assert_eq!(zones.len(), 5);
        for xy in iter_area(size) {
            assert!(zones.iter().take(4).any(|z| z.contains(&xy)), "at {}", xy);
        }
        for zone in zones {
            assert!(zone.validate().is_ok(), "{}", zone.name);
        }
    }
}
