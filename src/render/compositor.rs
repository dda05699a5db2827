use kurbo::Point;
use rayon::prelude::*;

use crate::{
    foundation::core::{CanvasSize, Transform},
    foundation::math::{mul_div255_u8, mul_div255_u16},
    render::surface::Surface,
};

// Placeholder art shown while no background is loaded: a dark vertical
// gradient with a faint grid. Fixed cosmetic constants.
const PLACEHOLDER_TOP: [u8; 4] = [0x0f, 0x17, 0x2a, 0xff];
const PLACEHOLDER_BOTTOM: [u8; 4] = [0x1e, 0x29, 0x3b, 0xff];
const PLACEHOLDER_GRID_STEP: u32 = 40;
const PLACEHOLDER_GRID_ALPHA: u16 = 8;

/// Render the full composite into `target`.
///
/// The pass is a single synchronous sweep: clear, draw the background
/// stretched to fill the target (or the placeholder when absent), then draw
/// the foreground about its pivot with the fixed translate -> rotate -> scale
/// composition and per-draw opacity. Surfaces are assumed valid; malformed
/// input is a precondition violation, not a runtime error.
#[tracing::instrument(skip_all, fields(width = target.width(), height = target.height()))]
pub fn render_composite(
    target: &mut Surface,
    background: Option<&Surface>,
    foreground: Option<&Surface>,
    transform: &Transform,
) {
    if target.is_empty() {
        return;
    }
    target.clear();

    match background {
        Some(bg) if !bg.is_empty() => draw_stretched(target, bg),
        _ => draw_placeholder(target),
    }

    if let Some(fg) = foreground {
        if !fg.is_empty() {
            draw_transformed(target, fg, transform);
        }
    }
}

/// Draw `src` stretched to exactly fill `target`, discarding its aspect
/// ratio. The canvas was already sized to the background's aspect ratio at
/// load time, so the stretch is a no-op in the common case; this draw must
/// not assume it.
fn draw_stretched(target: &mut Surface, src: &Surface) {
    let (tw, th) = (target.width(), target.height());
    let (sw, sh) = (src.width(), src.height());
    let stride = target.stride();

    target
        .data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let sy = nearest_index(y as u32, th, sh);
            for x in 0..tw {
                let sx = nearest_index(x, tw, sw);
                let i = x as usize * 4;
                row[i..i + 4].copy_from_slice(&src.pixel(sx, sy));
            }
        });
}

/// Pixel-center nearest sampling of one stretched axis.
fn nearest_index(i: u32, dst_len: u32, src_len: u32) -> u32 {
    let t = (f64::from(i) + 0.5) * f64::from(src_len) / f64::from(dst_len);
    (t.floor() as u32).min(src_len - 1)
}

/// Draw the foreground through its placement transform.
///
/// Each covered target pixel center is mapped through the inverse affine and
/// sampled nearest-neighbour, which keeps the pass deterministic and exact
/// for identity and axis-aligned placements. Pixels outside the source image
/// are left untouched.
fn draw_transformed(target: &mut Surface, fg: &Surface, transform: &Transform) {
    let canvas = CanvasSize {
        width: target.width(),
        height: target.height(),
    };
    let fwd = transform.to_affine(canvas, fg.width(), fg.height());
    if fwd.determinant().abs() < 1e-12 {
        // Degenerate scale collapses the image to nothing.
        return;
    }
    let inv = fwd.inverse();

    let opacity = (transform.opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    if opacity == 0 {
        return;
    }

    let (fw, fh) = (f64::from(fg.width()), f64::from(fg.height()));
    let corners = [
        fwd * Point::new(0.0, 0.0),
        fwd * Point::new(fw, 0.0),
        fwd * Point::new(fw, fh),
        fwd * Point::new(0.0, fh),
    ];
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil().max(0.0) as u32).min(target.width());
    let y1 = (max_y.ceil().max(0.0) as u32).min(target.height());
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let stride = target.stride();
    target
        .data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .skip(y0 as usize)
        .take((y1 - y0) as usize)
        .for_each(|(y, row)| {
            for x in x0..x1 {
                let p = inv * Point::new(f64::from(x) + 0.5, y as f64 + 0.5);
                if p.x < 0.0 || p.y < 0.0 || p.x >= fw || p.y >= fh {
                    continue;
                }
                let src = fg.pixel(p.x.floor() as u32, p.y.floor() as u32);
                let i = x as usize * 4;
                let dst = [row[i], row[i + 1], row[i + 2], row[i + 3]];
                row[i..i + 4].copy_from_slice(&blend_over(dst, src, opacity));
            }
        });
}

/// Source-over blend of straight-alpha pixels with a per-draw opacity in
/// 0..=255. Exact at the fully-opaque and fully-transparent extremes.
fn blend_over(dst: [u8; 4], src: [u8; 4], opacity: u16) -> [u8; 4] {
    let sa = mul_div255_u16(u16::from(src[3]), opacity);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return [src[0], src[1], src[2], 255];
    }

    let inv = 255 - sa;
    let da_weighted = mul_div255_u16(u16::from(dst[3]), inv);
    let out_a = sa + da_weighted;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    out[3] = out_a as u8;
    for i in 0..3 {
        // Premultiply both contributions, then un-premultiply by the result
        // alpha (both contributions are on a 0..=255*255 scale).
        let sc = u32::from(src[i]) * u32::from(sa);
        let dc = u32::from(dst[i]) * u32::from(da_weighted);
        out[i] = ((sc + dc + u32::from(out_a) / 2) / u32::from(out_a)) as u8;
    }
    out
}

fn draw_placeholder(target: &mut Surface) {
    let (tw, th) = (target.width(), target.height());
    let stride = target.stride();

    target
        .data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let base = gradient_at(y, th);
            for x in 0..tw {
                let mut px = base;
                if x % PLACEHOLDER_GRID_STEP == 0 || y % PLACEHOLDER_GRID_STEP == 0 {
                    for c in &mut px[..3] {
                        *c += mul_div255_u8(u16::from(255 - *c), PLACEHOLDER_GRID_ALPHA);
                    }
                }
                let i = x as usize * 4;
                row[i..i + 4].copy_from_slice(&px);
            }
        });
}

fn gradient_at(y: u32, height: u32) -> [u8; 4] {
    let t = if height <= 1 {
        0.0
    } else {
        f64::from(y) / f64::from(height - 1)
    };
    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = f64::from(PLACEHOLDER_TOP[i]);
        let bottom = f64::from(PLACEHOLDER_BOTTOM[i]);
        out[i] = (top + (bottom - top) * t).round() as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
