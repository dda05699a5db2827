use crate::foundation::error::{SuperposeError, SuperposeResult};

pub use kurbo::{Affine, Point, Vec2};

/// Output canvas dimensions in pixels.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CanvasSize {
    /// Width in pixels, > 0.
    pub width: u32,
    /// Height in pixels, > 0.
    pub height: u32,
}

impl CanvasSize {
    /// Validated constructor: both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> SuperposeResult<Self> {
        if width == 0 || height == 0 {
            return Err(SuperposeError::validation(
                "CanvasSize dimensions must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Canvas used before any background image is loaded.
pub const DEFAULT_CANVAS: CanvasSize = CanvasSize {
    width: 800,
    height: 600,
};

/// Caps applied when deriving the canvas size from a background's aspect
/// ratio. The canvas is sized once per background load and fixed afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Maximum canvas width in pixels.
    pub max_width: u32,
    /// Maximum canvas height in pixels.
    pub max_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            max_width: 1000,
            max_height: 850,
        }
    }
}

impl Viewport {
    /// Canvas size matching the `width:height` aspect ratio, fitted inside
    /// the caps. Width-first: take `max_width`, then shrink if the derived
    /// height exceeds `max_height`. Degenerate inputs fall back to
    /// [`DEFAULT_CANVAS`].
    pub fn fit(self, width: u32, height: u32) -> CanvasSize {
        if width == 0 || height == 0 || self.max_width == 0 || self.max_height == 0 {
            return DEFAULT_CANVAS;
        }
        let aspect = f64::from(width) / f64::from(height);
        let mut w = f64::from(self.max_width);
        let mut h = w / aspect;
        if h > f64::from(self.max_height) {
            h = f64::from(self.max_height);
            w = h * aspect;
        }
        CanvasSize {
            width: (w.round() as u32).max(1),
            height: (h.round() as u32).max(1),
        }
    }
}

/// Foreground placement parameters.
///
/// `x`/`y` are translation offsets from the canvas center in output pixels.
/// `rotation_deg` is clockwise-positive (2D canvas convention, y-down).
/// `scale` is a uniform factor; `opacity` multiplies the whole foreground
/// draw. None of the fields are clamped here; input widgets own any bounds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Horizontal offset from canvas center.
    pub x: f64,
    /// Vertical offset from canvas center.
    pub y: f64,
    /// Uniform scale factor, nominally in (0, +inf).
    pub scale: f64,
    /// Rotation about the foreground center, in degrees.
    pub rotation_deg: f64,
    /// Alpha multiplier in [0, 1] applied to the foreground draw only.
    pub opacity: f64,
    /// Whether near-white keying is active for the foreground.
    pub remove_white: bool,
}

impl Transform {
    /// Scale applied when a foreground is (re)loaded.
    pub const DEFAULT_SCALE: f64 = 0.5;

    /// Reset position, scale and rotation to load defaults. Opacity and the
    /// keying flag are deliberately preserved across foreground reloads.
    pub fn reset_placement(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.scale = Self::DEFAULT_SCALE;
        self.rotation_deg = 0.0;
    }

    /// Forward map from foreground pixel coordinates to canvas coordinates.
    ///
    /// The pivot is the canvas center offset by `x`/`y`; the image is drawn
    /// with its own center on the pivot. Composition order is fixed:
    /// translate to pivot, rotate, scale, then center the image. Reordering
    /// changes the visual result and is not permitted.
    pub fn to_affine(&self, canvas: CanvasSize, fg_width: u32, fg_height: u32) -> Affine {
        let pivot = Vec2::new(
            f64::from(canvas.width) / 2.0 + self.x,
            f64::from(canvas.height) / 2.0 + self.y,
        );
        let center = Vec2::new(f64::from(fg_width) / 2.0, f64::from(fg_height) / 2.0);
        Affine::translate(pivot)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: Self::DEFAULT_SCALE,
            rotation_deg: 0.0,
            opacity: 1.0,
            remove_white: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
