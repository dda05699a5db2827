use crate::{
    foundation::error::{SuperposeError, SuperposeResult},
    render::surface::Surface,
};

/// Decode encoded image bytes (PNG, JPEG, ...) into a straight RGBA8
/// [`Surface`].
///
/// This is the only place malformed user bytes are rejected; everything
/// downstream of a successful decode may assume a valid surface.
pub fn decode_image(bytes: &[u8]) -> SuperposeResult<Surface> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SuperposeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Surface::from_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
