//! # tui-rails
//!
//! A terminal toy train set. Cars move continuously along a tile-based
//! track graph with curves and switchable turnouts, couple into a consist
//! when they touch, and can be split apart again with a click.
//!
//! ## Architecture
//!
//! - [`types`] - shared constants and pure data types
//! - [`core`] - deterministic simulation: track geometry, cars, consist,
//!   cab throttle; no I/O
//! - [`input`] - crossterm key events mapped to cab actions
//! - [`term`] - framebuffer view and terminal backend
//!
//! The binary wires these together in a fixed-timestep frame loop; the
//! core never learns about terminals, keys, or wall clocks beyond the
//! frame delta it is handed.

pub mod core;
pub mod input;
pub mod term;
pub mod types;

pub use crate::core::{Cab, Car, Consist, TrackMap};
