//! Superpose is an interactive image-compositing core.
//!
//! A session holds one background ("place") image and one foreground
//! ("object") image. The foreground is positioned, scaled, rotated and faded
//! over the background; near-white foreground pixels can be keyed to
//! transparent. The composite is re-rendered on every edit and can be
//! exported as PNG or submitted to a remote generative service for a
//! photorealistic blend.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: encoded bytes -> [`Surface`] (straight RGBA8), async via
//!    [`session::loader`]
//! 2. **Key** (optional): [`key_out_near_white`] strips near-white pixels
//! 3. **Composite**: [`render_composite`] draws background + transformed
//!    foreground into the canvas-sized target
//! 4. **Export / Generate**: PNG bytes out, or a remote
//!    [`RemoteRenderer`] round-trip
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic rendering**: compositing and keying are pure CPU passes;
//!   the same inputs always produce the same pixels.
//! - **No IO in the core**: decode/encode/network live at the boundaries;
//!   [`SessionController`] and the render path never touch the outside world.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Image decoding (bytes in, surfaces out).
pub mod assets;
/// Pixel effects applied to decoded surfaces.
pub mod effects;
/// PNG serialization and export artifact names.
pub mod encode;
/// Shared core types, error taxonomy and fixed-point helpers.
pub mod foundation;
/// Remote photorealistic rendering over the Gemini API.
pub mod remote;
/// The CPU surface type and the composite render pass.
pub mod render;
/// Session state: transform control, async loads, export, generation guard.
pub mod session;

pub use assets::decode::decode_image;
pub use effects::keyer::{WHITE_KEY_THRESHOLD, key_out_near_white};
pub use encode::png::{AI_EXPORT_FILE_NAME, MANUAL_EXPORT_FILE_NAME, encode_png};
pub use foundation::core::{CanvasSize, DEFAULT_CANVAS, Transform, Viewport};
pub use foundation::error::{SuperposeError, SuperposeResult};
pub use remote::realism::{
    DEFAULT_MODEL, GeminiClient, GeneratedRender, REALISM_PROMPT, RemoteRenderer,
};
pub use render::compositor::render_composite;
pub use render::surface::Surface;
pub use session::controller::{Layer, LoadToken, SessionController};
pub use session::loader::{decode_bytes, load_layer};
