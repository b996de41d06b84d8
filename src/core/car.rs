//! Car module - a rolling unit and its trailing chain
//!
//! A [`Car`] owns the list of cars it pulls. The chain is rigid: every car
//! in it moves by the same linear distance per tick and shares one speed.
//! Chain membership changes only through [`Car::attach`] (driven by the
//! consist's proximity coupling) and [`Car::uncouple_at`].

use crate::types::{Pose, TrackPosition, UNCOUPLE_NUDGE};

use super::track::TrackMap;

/// A single rolling unit: engine or wagon.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    livery: u8,
    position: TrackPosition,
    speed: f64,
    trailing: Vec<Car>,
}

impl Car {
    /// Create a car at the given track position with the given art index.
    pub fn new(livery: u8, position: TrackPosition) -> Self {
        Self {
            livery,
            position,
            speed: 0.0,
            trailing: Vec::new(),
        }
    }

    pub fn livery(&self) -> u8 {
        self.livery
    }

    pub fn position(&self) -> TrackPosition {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Cars directly pulled by this one, front to back after
    /// [`reorder_trailing`](Self::reorder_trailing).
    pub fn trailing(&self) -> &[Car] {
        &self.trailing
    }

    /// Resolved world position and heading. Never cached; the map is the
    /// single source of truth for geometry.
    pub fn pose(&self, map: &TrackMap) -> Pose {
        map.resolve(self.position)
    }

    /// Move this car and its whole trailing chain by the same signed
    /// distance. Rigid by design: curvature does not change the spacing.
    pub fn advance(&mut self, map: &TrackMap, dist: f64) {
        self.position = map.advance(self.position, dist);
        for car in &mut self.trailing {
            car.advance(map, dist);
        }
    }

    /// Advance by this car's speed over a frame delta in milliseconds.
    pub fn tick(&mut self, map: &TrackMap, dt_ms: f64) {
        let dist = self.speed * dt_ms / 1000.0;
        self.advance(map, dist);
    }

    /// Copy this car's speed into every transitively attached car.
    pub fn propagate_speed(&mut self) {
        for car in &mut self.trailing {
            car.speed = self.speed;
            car.propagate_speed();
        }
    }

    /// Sort the direct trailing list by resolved world y so it reflects
    /// physical front-to-back order. Must run before uncouple decisions.
    pub fn reorder_trailing(&mut self, map: &TrackMap) {
        self.trailing
            .sort_by(|a, b| a.pose(map).position.y.total_cmp(&b.pose(map).position.y));
    }

    /// Couple a free car onto the end of the trailing list.
    pub fn attach(&mut self, car: Car) {
        self.trailing.push(car);
    }

    /// Split the trailing list at `idx` and return the detached group.
    ///
    /// The caller selects `idx` on the reordered list. The side of the
    /// target farther from this car leaves the chain: when the target sits
    /// ahead of this car (smaller world y) the cars in front of it detach
    /// and the target stays coupled; when it trails, the target and
    /// everything behind it detach. The detached group is nudged a tenth
    /// of a tile away from the remaining chain so it does not immediately
    /// recouple, and comes back with no incoming links.
    pub fn uncouple_at(&mut self, map: &TrackMap, idx: usize) -> Vec<Car> {
        let ahead = self.trailing[idx].pose(map).position.y < self.pose(map).position.y;
        let mut detached: Vec<Car> = if ahead {
            self.trailing.drain(..idx).collect()
        } else {
            self.trailing.drain(idx..).collect()
        };

        let nudge = if ahead { -UNCOUPLE_NUDGE } else { UNCOUPLE_NUDGE };
        for car in &mut detached {
            car.advance(map, nudge);
        }
        detached
    }
}
