//! Cab module - throttle and direction state machine
//!
//! Three throttle states move a scalar speed toward the top speed or
//! toward zero at a fixed acceleration. Direction can only be reversed
//! when the cab is (practically) standing still; the signed speed is what
//! gets written into the lead car each frame.

use crate::types::{CAB_ACCEL, CAB_MAX_SPEED, SPEED_EPS};

/// Throttle lever position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Throttle {
    #[default]
    Idle,
    Accelerate,
    Brake,
}

/// Driver's cab: throttle, direction, and the resulting scalar speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cab {
    forward: bool,
    throttle: Throttle,
    speed: f64,
    accel: f64,
    max_speed: f64,
}

impl Cab {
    pub fn new() -> Self {
        Self {
            forward: true,
            throttle: Throttle::Idle,
            speed: 0.0,
            accel: CAB_ACCEL,
            max_speed: CAB_MAX_SPEED,
        }
    }

    pub fn throttle(&self) -> Throttle {
        self.throttle
    }

    pub fn forward(&self) -> bool {
        self.forward
    }

    /// Scalar speed, always in `[0, max_speed]`.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn throttle_up(&mut self) {
        self.throttle = Throttle::Accelerate;
    }

    pub fn throttle_down(&mut self) {
        self.throttle = Throttle::Brake;
    }

    pub fn throttle_idle(&mut self) {
        self.throttle = Throttle::Idle;
    }

    /// Toggle direction, but only at (near) standstill. Ignored while the
    /// train is moving.
    pub fn reverse(&mut self) {
        if self.speed < SPEED_EPS {
            self.forward = !self.forward;
        }
    }

    /// Integrate the throttle over a frame delta in milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        let step = self.accel * dt_ms / 1000.0;
        match self.throttle {
            Throttle::Idle => {}
            Throttle::Accelerate => self.speed = (self.speed + step).min(self.max_speed),
            Throttle::Brake => self.speed = (self.speed - step).max(0.0),
        }
    }

    /// Speed with the direction sign applied; what the lead car gets.
    pub fn signed_speed(&self) -> f64 {
        if self.forward {
            self.speed
        } else {
            -self.speed
        }
    }
}

impl Default for Cab {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_holds_speed() {
        let mut cab = Cab::new();
        cab.throttle_up();
        cab.tick(1000.0);
        let speed = cab.speed();

        cab.throttle_idle();
        cab.tick(1000.0);
        assert_eq!(cab.speed(), speed);
    }

    #[test]
    fn test_signed_speed_follows_direction() {
        let mut cab = Cab::new();
        cab.reverse();
        cab.throttle_up();
        cab.tick(500.0);

        assert!(cab.speed() > 0.0);
        assert_eq!(cab.signed_speed(), -cab.speed());
    }
}
