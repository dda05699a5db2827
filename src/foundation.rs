/// Core model types (canvas, viewport, transform).
pub mod core;
/// Error taxonomy and crate-wide result alias.
pub mod error;
pub(crate) mod math;
