use rayon::prelude::*;

use crate::render::surface::Surface;

/// Per-channel classifier threshold. A pixel is near-white when all three
/// color channels are strictly above this value. Fixed configuration
/// constant; there is no soft edge.
pub const WHITE_KEY_THRESHOLD: u8 = 240;

/// Return a copy of `surface` with every near-white pixel forced fully
/// transparent.
///
/// Only the alpha channel of matching pixels changes; RGB channels and
/// non-matching pixels are preserved byte-for-byte, so the pass is
/// idempotent (the classifier never inspects alpha). The input is not
/// mutated. A 0x0 input yields a 0x0 output.
#[tracing::instrument(skip(surface), fields(width = surface.width(), height = surface.height()))]
pub fn key_out_near_white(surface: &Surface) -> Surface {
    let mut out = surface.clone();
    out.data_mut().par_chunks_exact_mut(4).for_each(|px| {
        if px[0] > WHITE_KEY_THRESHOLD
            && px[1] > WHITE_KEY_THRESHOLD
            && px[2] > WHITE_KEY_THRESHOLD
        {
            px[3] = 0;
        }
    });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/keyer.rs"]
mod tests;
