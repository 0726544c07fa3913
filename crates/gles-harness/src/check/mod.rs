//! Assertions against observed GL state.

mod report;
mod value;

pub use report::{CheckReport, EXIT_FAILURE, EXIT_SUCCESS};
pub use value::{CheckValue, FLOAT_EPSILON};
