use std::sync::Arc;

use tracing::debug;

use crate::{
    effects::keyer,
    encode::png::encode_png,
    foundation::core::{CanvasSize, DEFAULT_CANVAS, Transform, Viewport},
    foundation::error::{SuperposeError, SuperposeResult},
    render::{compositor, surface::Surface},
};

/// The two layer slots a load can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// The "place" image, stretched to fill the canvas.
    Background,
    /// The "object" image, placed through the transform.
    Foreground,
}

impl Layer {
    fn slot(self) -> usize {
        match self {
            Layer::Background => 0,
            Layer::Foreground => 1,
        }
    }
}

/// Sequence token for one in-flight load.
///
/// Loads commit last-load-wins: a completed load is applied only while its
/// token is still the newest issued for that layer, so a stale decode can
/// never overwrite state from a newer one that finished first.
#[derive(Clone, Copy, Debug)]
pub struct LoadToken {
    layer: Layer,
    seq: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Dragging { start_x: f64, start_y: f64 },
}

/// Authoritative session state: the two image layers, the keyed foreground
/// derivative, the placement transform, drag state and the cached composite.
///
/// Every mutation re-renders the composite synchronously, so [`Self::composite`]
/// always reflects the current state. All methods are plain `&mut self`
/// calls; the surrounding event loop owns the controller.
pub struct SessionController {
    background: Option<Arc<Surface>>,
    foreground: Option<Arc<Surface>>,
    processed_foreground: Option<Arc<Surface>>,
    transform: Transform,
    drag: DragState,
    viewport: Viewport,
    canvas: CanvasSize,
    composite: Surface,
    generating: bool,
    next_load_seq: u64,
    newest_load: [Option<u64>; 2],
}

impl SessionController {
    /// Empty session with the default viewport caps.
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    /// Empty session with explicit viewport caps.
    pub fn with_viewport(viewport: Viewport) -> Self {
        let mut s = Self {
            background: None,
            foreground: None,
            processed_foreground: None,
            transform: Transform::default(),
            drag: DragState::Idle,
            viewport,
            canvas: DEFAULT_CANVAS,
            composite: Surface::new(DEFAULT_CANVAS.width, DEFAULT_CANVAS.height),
            generating: false,
            next_load_seq: 0,
            newest_load: [None, None],
        };
        s.rerender();
        s
    }

    /// Current placement transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Current canvas dimensions.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Loaded background, if any.
    pub fn background(&self) -> Option<&Surface> {
        self.background.as_deref()
    }

    /// Loaded foreground, if any.
    pub fn foreground(&self) -> Option<&Surface> {
        self.foreground.as_deref()
    }

    /// Foreground derivative actually drawn: the keyed copy when keying is
    /// on, otherwise the raw foreground itself. Never stale.
    pub fn processed_foreground(&self) -> Option<&Surface> {
        self.processed_foreground.as_deref()
    }

    /// The rendered composite for the current state.
    pub fn composite(&self) -> &Surface {
        &self.composite
    }

    /// True while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// True while a remote generation is in flight.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Replace the background layer. The canvas is re-derived from the new
    /// background's aspect ratio against the viewport caps; transform and
    /// foreground are untouched.
    pub fn load_background(&mut self, surface: Surface) {
        self.canvas = self.viewport.fit(surface.width(), surface.height());
        debug!(
            width = surface.width(),
            height = surface.height(),
            canvas_width = self.canvas.width,
            canvas_height = self.canvas.height,
            "background loaded"
        );
        self.background = Some(Arc::new(surface));
        self.rerender();
    }

    /// Replace the foreground layer. Position, scale and rotation reset to
    /// load defaults; opacity and the keying flag are preserved, and the
    /// keyed derivative is recomputed against the new image so it can never
    /// reference the previous foreground.
    pub fn load_foreground(&mut self, surface: Surface) {
        debug!(
            width = surface.width(),
            height = surface.height(),
            "foreground loaded"
        );
        let fg = Arc::new(surface);
        self.foreground = Some(Arc::clone(&fg));
        self.transform.reset_placement();
        self.processed_foreground = Some(self.processed(fg));
        self.rerender();
    }

    /// Toggle near-white keying and recompute the foreground derivative.
    pub fn set_remove_white(&mut self, on: bool) {
        self.transform.remove_white = on;
        self.processed_foreground = self
            .foreground
            .as_ref()
            .map(|fg| self.processed(Arc::clone(fg)));
        self.rerender();
    }

    /// Overwrite the translation offset (output pixels from canvas center).
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.transform.x = x;
        self.transform.y = y;
        self.rerender();
    }

    /// Overwrite the uniform scale factor.
    pub fn set_scale(&mut self, scale: f64) {
        self.transform.scale = scale;
        self.rerender();
    }

    /// Overwrite the rotation in degrees.
    pub fn set_rotation_deg(&mut self, deg: f64) {
        self.transform.rotation_deg = deg;
        self.rerender();
    }

    /// Overwrite the foreground opacity.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.transform.opacity = opacity;
        self.rerender();
    }

    /// Start a drag at the given pointer position. No-op without a loaded
    /// foreground.
    pub fn begin_drag(&mut self, pointer_x: f64, pointer_y: f64) {
        if self.foreground.is_none() {
            return;
        }
        self.drag = DragState::Dragging {
            start_x: pointer_x - self.transform.x,
            start_y: pointer_y - self.transform.y,
        };
    }

    /// Move the drag to the given pointer position, preserving the grab
    /// offset recorded at [`Self::begin_drag`]. No-op while not dragging.
    pub fn drag_to(&mut self, pointer_x: f64, pointer_y: f64) {
        let DragState::Dragging { start_x, start_y } = self.drag else {
            return;
        };
        self.transform.x = pointer_x - start_x;
        self.transform.y = pointer_y - start_y;
        self.rerender();
    }

    /// End the drag (also used for pointer-leave/cancel).
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Issue a sequence token for a new load targeting `layer`. The token
    /// supersedes every earlier token for the same layer.
    pub fn begin_load(&mut self, layer: Layer) -> LoadToken {
        let seq = self.next_load_seq;
        self.next_load_seq += 1;
        self.newest_load[layer.slot()] = Some(seq);
        LoadToken { layer, seq }
    }

    /// Commit a completed load. Returns `false` (and drops the surface)
    /// when the token has been superseded by a newer load for its layer.
    pub fn finish_load(&mut self, token: LoadToken, surface: Surface) -> bool {
        if self.newest_load[token.layer.slot()] != Some(token.seq) {
            debug!(layer = ?token.layer, seq = token.seq, "stale load discarded");
            return false;
        }
        match token.layer {
            Layer::Background => self.load_background(surface),
            Layer::Foreground => self.load_foreground(surface),
        }
        true
    }

    /// PNG bytes of the current composite, for the manual export artifact.
    pub fn export_png(&self) -> SuperposeResult<Vec<u8>> {
        encode_png(&self.composite)
    }

    /// Start a remote generation: returns the PNG snapshot of the composite
    /// taken at invocation time and raises the in-flight flag. Fails while a
    /// generation is already pending or before both layers are loaded. Local
    /// editing stays fully usable while the flag is raised.
    pub fn begin_generation(&mut self) -> SuperposeResult<Vec<u8>> {
        if self.generating {
            return Err(SuperposeError::validation(
                "a generation is already in flight",
            ));
        }
        if self.background.is_none() || self.foreground.is_none() {
            return Err(SuperposeError::validation(
                "load a background and a foreground before generating",
            ));
        }
        let snapshot = self.export_png()?;
        self.generating = true;
        Ok(snapshot)
    }

    /// Lower the in-flight flag once the remote call resolved, successfully
    /// or not. Composite state is untouched either way.
    pub fn finish_generation(&mut self) {
        self.generating = false;
    }

    fn processed(&self, fg: Arc<Surface>) -> Arc<Surface> {
        if self.transform.remove_white {
            Arc::new(keyer::key_out_near_white(&fg))
        } else {
            // Passthrough must be pixel-identical, so share the raw image.
            fg
        }
    }

    fn rerender(&mut self) {
        if self.composite.width() != self.canvas.width
            || self.composite.height() != self.canvas.height
        {
            self.composite = Surface::new(self.canvas.width, self.canvas.height);
        }
        let fg_to_draw = self
            .processed_foreground
            .as_deref()
            .or(self.foreground.as_deref());
        compositor::render_composite(
            &mut self.composite,
            self.background.as_deref(),
            fg_to_draw,
            &self.transform,
        );
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
