//! Track map module - tile grid and path geometry
//!
//! The map holds three dense row-major layers (terrain, track, turnouts)
//! over a fixed `cols x rows` grid and owns the two geometry functions the
//! motion model is built on: [`TrackMap::resolve`] turns a tile-relative
//! position into a world pose, and [`TrackMap::advance`] moves such a
//! position along the track by a Euclidean distance, crossing tile
//! boundaries as needed.
//!
//! Out-of-grid reads are programming errors and panic: legal motion never
//! leaves the closed loops of a layout, so there is no recoverable error
//! path in here.

use std::f64::consts::FRAC_PI_4;

use crate::types::{
    Pose, Route, Terrain, TilePos, TrackPosition, TrackShape, TrackTile, Turnout, TurnoutHand,
    Vec2, CURVE_PATH_LEN, CURVE_RADIUS, TILE_GRID,
};

/// Vertical squeeze applied to the curve arc so the 45-degree sweep spans a
/// full tile edge.
const ARC_Y_SQUEEZE: f64 = std::f64::consts::SQRT_2 / 1.5;

/// Horizontal squeeze, the inverse square of the vertical one.
const ARC_X_SQUEEZE: f64 =
    (1.5 / std::f64::consts::SQRT_2) * (1.5 / std::f64::consts::SQRT_2);

/// Demo layout: two loops joined by four turnouts.
const DEMO_TERRAIN: [&str; 10] = [
    "gtgtgg", "gtgtgg", "gtgggg", "gggggg", "ggttgg", "gggtgg", "gggggg", "gtgggg", "gtgttg",
    "gtgttg",
];
const DEMO_TRACK: [&str; 10] = [
    " s s  ", " s s  ", " s S  ", " srs  ", " Sss  ", " sss  ", " sLS  ", " s sl ", " s ss ",
    " s ss ",
];
const DEMO_TURNOUTS: [&str; 10] = [
    "      ", "      ", "   M  ", "      ", " N    ", "  n   ", "   N  ", "   n  ", "      ",
    "      ",
];

/// The tile grid: terrain, track, and turnout layers plus path geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMap {
    cols: usize,
    rows: usize,
    terrain: Vec<Terrain>,
    track: Vec<Option<TrackTile>>,
    turnouts: Vec<Option<Turnout>>,
}

impl TrackMap {
    /// Parse a map from per-layer layout strings, one string per row.
    ///
    /// Codes are one character per cell. Terrain: `g` grass, `t` trees.
    /// Track: space for none, `s` straight, `r`/`l` curve right/left.
    /// Turnouts: space for none, `m`/`n` right/left-hand set to through,
    /// `b`/`c` the same hands set to diverging. Uppercase marks the tile
    /// as rotated 180 degrees.
    ///
    /// # Panics
    ///
    /// Panics on ragged rows, mismatched layer dimensions, or unknown
    /// codes. Layouts are fixed constants, so a bad one is a bug.
    pub fn from_layout(terrain: &[&str], track: &[&str], turnouts: &[&str]) -> Self {
        let rows = terrain.len();
        assert!(rows > 0, "empty layout");
        let cols = terrain[0].chars().count();
        for layer in [terrain, track, turnouts] {
            assert_eq!(layer.len(), rows, "layers must have equal row counts");
            for row in layer {
                assert_eq!(row.chars().count(), cols, "ragged layout row {row:?}");
            }
        }

        let mut map = Self {
            cols,
            rows,
            terrain: Vec::with_capacity(cols * rows),
            track: Vec::with_capacity(cols * rows),
            turnouts: Vec::with_capacity(cols * rows),
        };

        for row in terrain {
            for c in row.chars() {
                map.terrain.push(match c {
                    'g' => Terrain::Grass,
                    't' => Terrain::Trees,
                    _ => panic!("unknown terrain code {c:?}"),
                });
            }
        }
        for row in track {
            for c in row.chars() {
                let rotated = c.is_ascii_uppercase();
                map.track.push(match c.to_ascii_lowercase() {
                    ' ' => None,
                    's' => Some(TrackTile { shape: TrackShape::Straight, rotated }),
                    'r' => Some(TrackTile { shape: TrackShape::CurveRight, rotated }),
                    'l' => Some(TrackTile { shape: TrackShape::CurveLeft, rotated }),
                    _ => panic!("unknown track code {c:?}"),
                });
            }
        }
        for row in turnouts {
            for c in row.chars() {
                let rotated = c.is_ascii_uppercase();
                map.turnouts.push(match c.to_ascii_lowercase() {
                    ' ' => None,
                    'm' => Some(Turnout { hand: TurnoutHand::Right, route: Route::Through, rotated }),
                    'n' => Some(Turnout { hand: TurnoutHand::Left, route: Route::Through, rotated }),
                    'b' => Some(Turnout { hand: TurnoutHand::Right, route: Route::Diverging, rotated }),
                    'c' => Some(Turnout { hand: TurnoutHand::Left, route: Route::Diverging, rotated }),
                    _ => panic!("unknown turnout code {c:?}"),
                });
            }
        }

        map
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, tile: TilePos) -> bool {
        tile.col >= 0
            && (tile.col as usize) < self.cols
            && tile.row >= 0
            && (tile.row as usize) < self.rows
    }

    #[inline]
    fn idx(&self, tile: TilePos) -> usize {
        assert!(
            self.contains(tile),
            "tile {tile:?} outside {}x{} grid",
            self.cols,
            self.rows
        );
        tile.row as usize * self.cols + tile.col as usize
    }

    pub fn terrain_at(&self, tile: TilePos) -> Terrain {
        self.terrain[self.idx(tile)]
    }

    pub fn track_at(&self, tile: TilePos) -> Option<TrackTile> {
        self.track[self.idx(tile)]
    }

    pub fn turnout_at(&self, tile: TilePos) -> Option<Turnout> {
        self.turnouts[self.idx(tile)]
    }

    /// The shape a car on this tile currently follows, with its rotation
    /// flag. A turnout governs whenever present; otherwise the track code.
    ///
    /// # Panics
    ///
    /// Panics when the tile carries neither - cars can only sit on track.
    pub fn active_shape(&self, tile: TilePos) -> (TrackShape, bool) {
        if let Some(t) = self.turnout_at(tile) {
            return (t.active_shape(), t.rotated);
        }
        match self.track_at(tile) {
            Some(t) => (t.shape, t.rotated),
            None => panic!("no track at {tile:?}"),
        }
    }

    /// Flip a turnout between through and diverging.
    ///
    /// Off-grid tiles and tiles without a turnout are ignored: this is the
    /// one entry point fed raw pointer input, so a stray click is a no-op,
    /// not an error.
    pub fn toggle_turnout(&mut self, tile: TilePos) {
        if !self.contains(tile) {
            return;
        }
        let i = self.idx(tile);
        if let Some(t) = self.turnouts[i] {
            self.turnouts[i] = Some(t.toggled());
        }
    }

    /// Tile under a world point.
    pub fn tile_from_world(&self, point: Vec2) -> TilePos {
        TilePos::new(
            (point.x / TILE_GRID).floor() as i32,
            (point.y / TILE_GRID).floor() as i32,
        )
    }

    /// Resolve a track position into a world pose.
    ///
    /// Pure in `self` apart from the layer lookup. Straights interpolate
    /// linearly down the tile's vertical axis with heading 0. Curves follow
    /// the squeezed quarter-circle arc; the rotation flag picks which corner
    /// the arc anchors to and whether `rel = 0` is the arc's start or end,
    /// and the heading is the tangent angle signed by chirality. For a
    /// fixed tile the along-track y is strictly monotonic in `rel`.
    pub fn resolve(&self, pos: TrackPosition) -> Pose {
        let (shape, rotated) = self.active_shape(pos.tile);
        let g = TILE_GRID;
        let rel = pos.rel;

        let arc = if rotated { rel } else { 1.0 - rel } * FRAC_PI_4;
        let cy = CURVE_RADIUS * arc.sin() * ARC_Y_SQUEEZE;
        let cx = CURVE_RADIUS * (1.0 - arc.cos()) * ARC_X_SQUEEZE + g / 2.0;

        let (mut lx, ly, heading) = match shape {
            TrackShape::Straight => (g / 2.0, rel * g, 0.0),
            TrackShape::CurveRight => {
                if rotated {
                    (cx, cy, rel * FRAC_PI_4)
                } else {
                    (cx, g - cy, (1.0 - rel) * FRAC_PI_4)
                }
            }
            TrackShape::CurveLeft => {
                if rotated {
                    (g - cx, cy, -rel * FRAC_PI_4)
                } else {
                    (g - cx, g - cy, -(1.0 - rel) * FRAC_PI_4)
                }
            }
        };
        if rotated {
            lx = g - lx;
        }

        Pose {
            position: Vec2::new(
                pos.tile.col as f64 * g + lx,
                pos.tile.row as f64 * g + ly,
            ),
            heading,
        }
    }

    /// Advance a track position by a signed Euclidean distance.
    ///
    /// The distance is converted into a `rel` delta using the current
    /// tile's path length (straights span `TILE_GRID`, curves span the
    /// 45-degree arc length), so equal distances produce equal geometric
    /// travel on every shape. When `rel` leaves `[0, 1]` the position
    /// crosses into the neighbour row; the neighbour column follows the
    /// crossing rule below, each crossing consumes exactly one unit of
    /// `rel`, and a remaining overflow repeats the crossing from the new
    /// tile.
    ///
    /// Column rule: straights keep the column. A curve shifts the column by
    /// one toward the side its diagonal end points at, which works out to
    /// `+swing` for right curves and `-swing` for left curves (swing being
    /// -1 when rotated), suppressed on the end of the curve that exits
    /// vertically. The four chirality/rotation combinations are pinned by
    /// the crossing tests.
    pub fn advance(&self, pos: TrackPosition, dist: f64) -> TrackPosition {
        let (shape, _) = self.active_shape(pos.tile);
        let path_len = match shape {
            TrackShape::Straight => TILE_GRID,
            _ => CURVE_PATH_LEN,
        };

        let mut tile = pos.tile;
        let mut rel = pos.rel + dist / path_len;

        while !(0.0..=1.0).contains(&rel) {
            let (shape, rotated) = self.active_shape(tile);
            let dir: i32 = if rel > 1.0 { 1 } else { -1 };
            let swing: i32 = if rotated { -1 } else { 1 };
            let dcol = match shape {
                TrackShape::Straight => 0,
                TrackShape::CurveRight => swing,
                TrackShape::CurveLeft => -swing,
            };
            // The curve exits vertically on the end where travel direction
            // and swing agree; only the diagonal end changes column.
            let dcol = if dir * swing > 0 { 0 } else { dcol };

            tile = TilePos::new(tile.col + dcol, tile.row + dir);
            rel -= dir as f64;
        }

        TrackPosition { tile, rel }
    }
}

impl Default for TrackMap {
    fn default() -> Self {
        Self::from_layout(&DEMO_TERRAIN, &DEMO_TRACK, &DEMO_TURNOUTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_layout_parses() {
        let map = TrackMap::default();
        assert_eq!(map.cols(), 6);
        assert_eq!(map.rows(), 10);

        // Engine home column is plain straight track.
        assert_eq!(
            map.track_at(TilePos::new(1, 0)),
            Some(TrackTile {
                shape: TrackShape::Straight,
                rotated: false
            })
        );
        // The joined curve at (2,3).
        assert_eq!(
            map.track_at(TilePos::new(2, 3)).map(|t| t.shape),
            Some(TrackShape::CurveRight)
        );
        // Rotated right-hand turnout at (3,2), parked on through.
        let t = map.turnout_at(TilePos::new(3, 2)).unwrap();
        assert_eq!(t.hand, TurnoutHand::Right);
        assert_eq!(t.route, Route::Through);
        assert!(t.rotated);
    }

    #[test]
    fn test_toggle_turnout_flips_route_in_place() {
        let mut map = TrackMap::default();
        let at = TilePos::new(3, 2);
        let before = map.turnout_at(at).unwrap();

        map.toggle_turnout(at);
        let after = map.turnout_at(at).unwrap();
        assert_eq!(after.route, Route::Diverging);
        assert_eq!(after.hand, before.hand);
        assert_eq!(after.rotated, before.rotated);

        map.toggle_turnout(at);
        assert_eq!(map.turnout_at(at).unwrap(), before);
    }

    #[test]
    fn test_toggle_non_turnout_is_noop() {
        let mut map = TrackMap::default();
        let before = map.clone();

        map.toggle_turnout(TilePos::new(1, 0)); // plain track
        map.toggle_turnout(TilePos::new(0, 0)); // no track at all
        map.toggle_turnout(TilePos::new(-3, 99)); // off the grid
        assert_eq!(map, before);
    }

    #[test]
    fn test_tile_from_world() {
        let map = TrackMap::default();
        assert_eq!(map.tile_from_world(Vec2::new(0.0, 0.0)), TilePos::new(0, 0));
        assert_eq!(
            map.tile_from_world(Vec2::new(63.9, 64.0)),
            TilePos::new(0, 1)
        );
        assert_eq!(
            map.tile_from_world(Vec2::new(130.0, 200.0)),
            TilePos::new(2, 3)
        );
    }

    #[test]
    fn test_resolve_straight_center() {
        let map = TrackMap::default();
        let pose = map.resolve(TrackPosition::centered(1, 0));
        assert_eq!(pose.position, Vec2::new(96.0, 32.0));
        assert_eq!(pose.heading, 0.0);
    }

    #[test]
    #[should_panic(expected = "no track")]
    fn test_resolve_off_track_panics() {
        let map = TrackMap::default();
        map.resolve(TrackPosition::centered(0, 0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_grid_read_panics() {
        let map = TrackMap::default();
        map.track_at(TilePos::new(7, 0));
    }
}
