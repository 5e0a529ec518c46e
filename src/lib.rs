pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod mask;
pub mod render;

pub use config::{FootprintParams, Weighting};
pub use error::{Axis, FootprintError};
pub use grid::Grid;
pub use mask::{axis_range, build, centered_at, footprint, offsets};
