//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::TrainAction`]s. Mouse
//! clicks are handled directly in the main loop because they need the
//! view's cell-to-world mapping.

pub mod map;

pub use map::{handle_key_event, should_quit};
