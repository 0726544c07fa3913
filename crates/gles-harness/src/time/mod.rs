//! Time subsystem.
//!
//! - one `FrameClock` per run loop, `tick()` once per presented frame
//! - `Interval` for work that happens on a fixed cadence inside `draw`

mod frame_clock;
mod interval;

pub use frame_clock::{FrameClock, FrameTime};
pub use interval::Interval;
