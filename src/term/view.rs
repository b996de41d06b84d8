//! TrackView: maps the simulation state into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable. The view keeps a fixed
//! origin and integer cell-per-tile scale so terminal cells map invertibly
//! back to world points; the main loop uses that inverse for mouse clicks.

use crate::core::{Cab, Consist, Throttle, TrackMap};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Route, Terrain, TilePos, TrackPosition, Vec2, TILE_GRID};

/// Car body colors by livery index.
const LIVERIES: [Rgb; 5] = [
    Rgb::new(0, 128, 128),
    Rgb::new(217, 86, 0),
    Rgb::new(137, 160, 44),
    Rgb::new(171, 55, 200),
    Rgb::new(44, 90, 160),
];

const GRASS_BG: Rgb = Rgb::new(24, 48, 24);
const RAIL_FG: Rgb = Rgb::new(160, 160, 160);
const TURNOUT_FG: Rgb = Rgb::new(230, 200, 60);

/// Renders map, cars, and cab status into a framebuffer.
pub struct TrackView {
    /// Terminal columns per tile.
    tile_w: u16,
    /// Terminal rows per tile.
    tile_h: u16,
    origin_x: u16,
    origin_y: u16,
}

impl Default for TrackView {
    fn default() -> Self {
        // 4x2 roughly squares a tile at typical glyph aspect ratios.
        Self {
            tile_w: 4,
            tile_h: 2,
            origin_x: 1,
            origin_y: 1,
        }
    }
}

impl TrackView {
    /// Framebuffer size needed for this map plus the status line.
    pub fn frame_size(&self, map: &TrackMap) -> (u16, u16) {
        let w = self.origin_x * 2 + map.cols() as u16 * self.tile_w;
        let h = self.origin_y + map.rows() as u16 * self.tile_h + 2;
        (w, h)
    }

    /// World point at the center of a terminal cell; inverse of the cell
    /// placement used when drawing. Points left of or above the map come
    /// back negative and fall through the no-op paths downstream.
    pub fn world_from_cell(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f64 - self.origin_x as f64 + 0.5) * TILE_GRID / self.tile_w as f64,
            (row as f64 - self.origin_y as f64 + 0.5) * TILE_GRID / self.tile_h as f64,
        )
    }

    fn cell_of(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let cx = self.origin_x as f64 + p.x / TILE_GRID * self.tile_w as f64;
        let cy = self.origin_y as f64 + p.y / TILE_GRID * self.tile_h as f64;
        Some((cx.floor() as u16, cy.floor() as u16))
    }

    /// Render the whole scene.
    pub fn render(&self, map: &TrackMap, consist: &Consist, cab: &Cab) -> FrameBuffer {
        let (w, h) = self.frame_size(map);
        let mut fb = FrameBuffer::new(w, h);

        self.draw_terrain(&mut fb, map);
        self.draw_track(&mut fb, map);
        self.draw_cars(&mut fb, map, consist);
        self.draw_status(&mut fb, cab, h);

        fb
    }

    fn draw_terrain(&self, fb: &mut FrameBuffer, map: &TrackMap) {
        for row in 0..map.rows() {
            for col in 0..map.cols() {
                let tile = TilePos::new(col as i32, row as i32);
                let (ch, fg) = match map.terrain_at(tile) {
                    Terrain::Grass => (' ', GRASS_BG),
                    Terrain::Trees => ('"', Rgb::new(40, 110, 40)),
                };
                let style = CellStyle {
                    fg,
                    bg: GRASS_BG,
                    bold: false,
                };
                fb.fill_rect(
                    self.origin_x + col as u16 * self.tile_w,
                    self.origin_y + row as u16 * self.tile_h,
                    self.tile_w,
                    self.tile_h,
                    ch,
                    style,
                );
            }
        }
    }

    /// Draw each tile's path by sampling the resolved geometry, so curves
    /// and switched turnouts render exactly where cars will run.
    fn draw_track(&self, fb: &mut FrameBuffer, map: &TrackMap) {
        let samples = (self.tile_h * 2 + 1) as u32;
        for row in 0..map.rows() {
            for col in 0..map.cols() {
                let tile = TilePos::new(col as i32, row as i32);
                let turnout = map.turnout_at(tile);
                if map.track_at(tile).is_none() && turnout.is_none() {
                    continue;
                }

                let style = match turnout {
                    Some(t) => CellStyle {
                        fg: TURNOUT_FG,
                        bg: GRASS_BG,
                        bold: t.route == Route::Diverging,
                    },
                    None => CellStyle {
                        fg: RAIL_FG,
                        bg: GRASS_BG,
                        bold: false,
                    },
                };

                for k in 0..=samples {
                    let rel = k as f64 / samples as f64;
                    let pose = map.resolve(TrackPosition {
                        tile,
                        rel,
                    });
                    let ch = if pose.heading > 0.1 {
                        '/'
                    } else if pose.heading < -0.1 {
                        '\\'
                    } else {
                        '|'
                    };
                    if let Some((cx, cy)) = self.cell_of(pose.position) {
                        fb.put_char(cx, cy, ch, style);
                    }
                }
            }
        }
    }

    fn draw_cars(&self, fb: &mut FrameBuffer, map: &TrackMap, consist: &Consist) {
        let chain = std::iter::once(consist.lead()).chain(consist.lead().trailing().iter());
        for (i, car) in chain.chain(consist.free_cars().iter()).enumerate() {
            let body = LIVERIES[car.livery() as usize % LIVERIES.len()];
            let style = CellStyle {
                fg: body,
                bg: GRASS_BG,
                bold: i == 0, // the engine stands out
            };
            if let Some((cx, cy)) = self.cell_of(car.pose(map).position) {
                fb.put_char(cx, cy, '█', style);
            }
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, cab: &Cab, height: u16) {
        let throttle = match cab.throttle() {
            Throttle::Idle => "coast",
            Throttle::Accelerate => "power",
            Throttle::Brake => "brake",
        };
        let dir = if cab.forward() { "fwd" } else { "rev" };
        let status = format!("speed {:5.1} {dir} [{throttle}]", cab.speed());
        fb.put_str(0, height - 2, &status, CellStyle::default());
        fb.put_str(0, height - 1, "a+ d- s:coast r:rev q:quit", CellStyle::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cab, Consist};

    #[test]
    fn test_cell_world_mapping_roundtrip() {
        let view = TrackView::default();
        let map = TrackMap::default();

        // A click anywhere inside a tile's cells resolves to that tile.
        for (col, row, tile) in [(1, 1, (0, 0)), (6, 3, (1, 1)), (13, 7, (3, 3))] {
            let world = view.world_from_cell(col, row);
            assert_eq!(map.tile_from_world(world), TilePos::new(tile.0, tile.1));
        }
    }

    #[test]
    fn test_render_places_engine() {
        let view = TrackView::default();
        let map = TrackMap::default();
        let consist = Consist::default();
        let fb = view.render(&map, &consist, &Cab::new());

        // Engine sits centered on tile (1,0): world (96, 32) -> cell (7, 2).
        assert_eq!(fb.get(7, 2).unwrap().ch, '█');
        assert!(fb.get(7, 2).unwrap().style.bold);
    }

    #[test]
    fn test_render_fits_frame() {
        let view = TrackView::default();
        let map = TrackMap::default();
        let (w, h) = view.frame_size(&map);
        let fb = view.render(&map, &Consist::default(), &Cab::new());
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}
