//! Screen-space types.
//!
//! GL window coordinates throughout:
//! - physical pixels
//! - origin bottom-left
//! - +X right, +Y up
//!
//! `Grid` is the one exception on input: rows are addressed from the top,
//! because that is how the test layouts are described.

mod color;
mod grid;
mod viewport;

pub use color::ColorRgba;
pub use grid::Grid;
pub use viewport::Viewport;
