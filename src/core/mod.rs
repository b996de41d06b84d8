//! Simulation core - pure, deterministic, and testable
//!
//! Everything in here is free of I/O: the tile grid and its path geometry,
//! the cars with their coupling mechanics, the consist registry, and the
//! cab throttle. The terminal front-end only calls into this module and
//! reads its outputs.
//!
//! # Module structure
//!
//! - [`track`]: tile grid, turnout switching, sub-tile geometry
//! - [`car`]: a rolling unit, rigid-chain motion, couple/uncouple
//! - [`consist`]: rolling stock registry, per-frame tick, auto-coupling
//! - [`cab`]: throttle/direction state machine

pub mod cab;
pub mod car;
pub mod consist;
pub mod track;

pub use cab::{Cab, Throttle};
pub use car::Car;
pub use consist::Consist;
pub use track::TrackMap;
