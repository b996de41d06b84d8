//! Terminal rendering module.
//!
//! A small game-oriented rendering layer: the pure [`view::TrackView`]
//! builds a styled framebuffer from simulation state, and
//! [`renderer::TerminalRenderer`] flushes it to a raw-mode terminal.

pub mod fb;
pub mod renderer;
pub mod view;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
pub use view::TrackView;
