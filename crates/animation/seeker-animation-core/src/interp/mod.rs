//! Easing curves and value interpolation.

pub mod ease;
pub mod functions;

pub use ease::{Ease, EaseMode};
pub use functions::interpolate;
