//! Consist module - the rolling stock registry
//!
//! Owns the lead engine (with its trailing chain) and the free-standing
//! wagons, and runs the per-frame tick: speed propagation, chain ordering,
//! motion, then proximity coupling. Every car is in exactly one of
//! {lead, chain, free set} at all times; cars are never created or
//! destroyed after construction, only reparented.

use arrayvec::ArrayVec;

use crate::types::{TrackPosition, Vec2, COUPLE_RADIUS, MAX_CARS, MAX_FRAME_GAP_MS};

use super::car::Car;
use super::track::TrackMap;

/// The lead engine, its chain, and the free wagons.
#[derive(Debug, Clone, PartialEq)]
pub struct Consist {
    lead: Car,
    free: Vec<Car>,
}

impl Consist {
    pub fn new(lead: Car, free: Vec<Car>) -> Self {
        Self { lead, free }
    }

    pub fn lead(&self) -> &Car {
        &self.lead
    }

    pub fn lead_mut(&mut self) -> &mut Car {
        &mut self.lead
    }

    pub fn free_cars(&self) -> &[Car] {
        &self.free
    }

    /// Total rolling stock, wherever each car currently lives.
    pub fn car_count(&self) -> usize {
        1 + self.lead.trailing().len() + self.free.len()
    }

    /// Advance the simulation by one frame.
    ///
    /// A delta above the frame-gap ceiling is treated as "no motion" (the
    /// UI was backgrounded) and skipped entirely, including coupling.
    pub fn tick(&mut self, map: &TrackMap, dt_ms: f64) {
        if dt_ms > MAX_FRAME_GAP_MS {
            return;
        }

        self.lead.propagate_speed();
        self.lead.reorder_trailing(map);
        self.lead.tick(map, dt_ms);
        self.try_couple(map);
    }

    /// Couple every free car that ended the tick within one tile of the
    /// lead or any chained car. The chain snapshot is taken once, so a car
    /// coupled this tick becomes an anchor only from the next tick on.
    fn try_couple(&mut self, map: &TrackMap) {
        let mut chain: ArrayVec<Vec2, MAX_CARS> = ArrayVec::new();
        chain.push(self.lead.pose(map).position);
        for car in self.lead.trailing() {
            chain.push(car.pose(map).position);
        }

        let mut i = 0;
        while i < self.free.len() {
            let at = self.free[i].pose(map).position;
            if chain.iter().any(|p| p.distance(at) < COUPLE_RADIUS) {
                let car = self.free.remove(i);
                self.lead.attach(car);
            } else {
                i += 1;
            }
        }
    }

    /// Uncouple at a world point, typically a mouse click.
    ///
    /// The chain is reordered, then the first directly trailing car within
    /// one tile of the point is split off via [`Car::uncouple_at`] and the
    /// detached group joins the free set. Only the first match per call is
    /// processed; no nearby car is a no-op.
    pub fn request_uncouple(&mut self, map: &TrackMap, point: Vec2) {
        self.lead.reorder_trailing(map);
        let hit = self
            .lead
            .trailing()
            .iter()
            .position(|car| car.pose(map).position.distance(point) < COUPLE_RADIUS);
        if let Some(idx) = hit {
            let detached = self.lead.uncouple_at(map, idx);
            self.free.extend(detached);
        }
    }
}

impl Default for Consist {
    /// The demo rolling stock: one engine on the upper main, two free
    /// wagons further down the same line.
    fn default() -> Self {
        Self::new(
            Car::new(0, TrackPosition::centered(1, 0)),
            vec![
                Car::new(1, TrackPosition::centered(1, 2)),
                Car::new(2, TrackPosition::centered(1, 7)),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_map() -> TrackMap {
        TrackMap::from_layout(&["ggg"; 12], &[" s "; 12], &["   "; 12])
    }

    #[test]
    fn test_tick_skips_large_frame_gap() {
        let map = straight_map();
        let mut consist = Consist::new(Car::new(0, TrackPosition::centered(1, 1)), vec![]);
        consist.lead_mut().set_speed(50.0);

        let before = consist.lead().position();
        consist.tick(&map, 500.0);
        assert_eq!(consist.lead().position(), before);

        consist.tick(&map, 16.0);
        assert_ne!(consist.lead().position(), before);
    }

    #[test]
    fn test_free_car_within_radius_couples() {
        let map = straight_map();
        // Lead at y=96, free wagon at y=153.6: 57.6 apart, under one tile.
        let mut consist = Consist::new(
            Car::new(0, TrackPosition::centered(1, 1)),
            vec![Car::new(1, TrackPosition::new(1, 2, 0.4))],
        );

        consist.tick(&map, 16.0);
        assert_eq!(consist.lead().trailing().len(), 1);
        assert!(consist.free_cars().is_empty());
        assert_eq!(consist.car_count(), 2);
    }

    #[test]
    fn test_distant_car_stays_free() {
        let map = straight_map();
        let mut consist = Consist::new(
            Car::new(0, TrackPosition::centered(1, 1)),
            vec![Car::new(1, TrackPosition::centered(1, 8))],
        );

        consist.tick(&map, 16.0);
        assert!(consist.lead().trailing().is_empty());
        assert_eq!(consist.free_cars().len(), 1);
    }

    #[test]
    fn test_request_uncouple_far_from_everything_is_noop() {
        let map = straight_map();
        let mut consist = Consist::default();
        let before = consist.clone();

        consist.request_uncouple(&map, Vec2::new(1000.0, 1000.0));
        assert_eq!(consist, before);
    }
}
