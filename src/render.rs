/// The composite render pass.
pub mod compositor;
/// Straight RGBA8 pixel surface.
pub mod surface;
