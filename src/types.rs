//! Core types module - shared data structures and constants
//!
//! Pure data types with no external dependencies, usable from the simulation
//! core, the terminal view, and the input mapper alike.
//!
//! # World units
//!
//! The track lives in a continuous 2D world measured in abstract units.
//! One tile spans `TILE_GRID` units on each side; world x grows to the
//! right, world y grows downward (screen convention). Curves are quarter
//! circles of radius `CURVE_RADIUS` swept over 45 degrees and squeezed to
//! fit a tile corner-to-edge, so their on-track path length is
//! `CURVE_PATH_LEN`, not `TILE_GRID`.

/// Side length of one tile in world units.
pub const TILE_GRID: f64 = 64.0;

/// Radius of the curve arcs in world units.
pub const CURVE_RADIUS: f64 = 1.5 * TILE_GRID;

/// On-track path length of a curve tile (45-degree sweep).
pub const CURVE_PATH_LEN: f64 = CURVE_RADIUS * std::f64::consts::FRAC_PI_4;

/// Two cars closer than this couple; a click closer than this uncouples.
pub const COUPLE_RADIUS: f64 = TILE_GRID;

/// Distance a freshly uncoupled group is pushed away from the chain.
pub const UNCOUPLE_NUDGE: f64 = TILE_GRID / 10.0;

/// Below this scalar speed the cab counts as standing still.
pub const SPEED_EPS: f64 = 1e-3;

/// Cab acceleration in world units per second squared.
pub const CAB_ACCEL: f64 = 20.0;

/// Cab top speed in world units per second.
pub const CAB_MAX_SPEED: f64 = 50.0;

/// Frame deltas above this are treated as "no motion" (tab was backgrounded).
pub const MAX_FRAME_GAP_MS: f64 = 200.0;

/// Fixed timestep interval for the main loop (~60 FPS).
pub const TICK_MS: u32 = 16;

/// Upper bound on total rolling stock; sizes the per-tick scratch buffers.
pub const MAX_CARS: usize = 16;

/// A point or displacement in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f64 {
        Vec2::new(self.x - other.x, self.y - other.y).length()
    }
}

/// Integer tile coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub col: i32,
    pub row: i32,
}

impl TilePos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// A car's location: discrete tile plus fractional progress along its path.
///
/// `rel` is renormalized into `[0, 1]` on every tile crossing; a value
/// outside that range never survives an [`advance`](crate::core::TrackMap::advance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPosition {
    pub tile: TilePos,
    pub rel: f64,
}

impl TrackPosition {
    pub const fn new(col: i32, row: i32, rel: f64) -> Self {
        Self {
            tile: TilePos::new(col, row),
            rel,
        }
    }

    /// Position at the middle of a tile's path.
    pub const fn centered(col: i32, row: i32) -> Self {
        Self::new(col, row, 0.5)
    }
}

/// Resolved world position and heading of a car.
///
/// Heading is in radians, 0 pointing down-track on a straight, signed by
/// curve chirality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f64,
}

/// Geometric path type of a track tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackShape {
    Straight,
    CurveRight,
    CurveLeft,
}

/// Plain track cell: a shape plus the 180-degree rotation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackTile {
    pub shape: TrackShape,
    pub rotated: bool,
}

/// Which way a turnout's diverging leg bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnoutHand {
    Right,
    Left,
}

/// Routing state of a turnout, independent of its rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Through,
    Diverging,
}

/// A switchable turnout cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turnout {
    pub hand: TurnoutHand,
    pub route: Route,
    pub rotated: bool,
}

impl Turnout {
    /// The shape a car currently follows across this turnout.
    pub fn active_shape(&self) -> TrackShape {
        match (self.route, self.hand) {
            (Route::Through, _) => TrackShape::Straight,
            (Route::Diverging, TurnoutHand::Right) => TrackShape::CurveRight,
            (Route::Diverging, TurnoutHand::Left) => TrackShape::CurveLeft,
        }
    }

    /// The same turnout with its route flipped.
    pub fn toggled(self) -> Self {
        let route = match self.route {
            Route::Through => Route::Diverging,
            Route::Diverging => Route::Through,
        };
        Self { route, ..self }
    }
}

/// Ground cover under the track; purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Grass,
    Trees,
}

/// Cab commands produced by the input mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainAction {
    ThrottleUp,
    ThrottleDown,
    Coast,
    Reverse,
}
