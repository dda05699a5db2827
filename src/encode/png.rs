use image::ImageEncoder;

use crate::{
    foundation::error::{SuperposeError, SuperposeResult},
    render::surface::Surface,
};

/// Download name for the manually exported composite.
pub const MANUAL_EXPORT_FILE_NAME: &str = "composicion-manual.png";

/// Download name for the AI-generated render.
pub const AI_EXPORT_FILE_NAME: &str = "render-realista-ia.png";

/// Serialize a surface to PNG bytes.
pub fn encode_png(surface: &Surface) -> SuperposeResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            surface.data(),
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| SuperposeError::encode(format!("encode png: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
