use tracing::debug;

use crate::{
    assets::decode::decode_image,
    foundation::error::{SuperposeError, SuperposeResult},
    render::surface::Surface,
    session::controller::{Layer, SessionController},
};

/// Decode encoded image bytes off the async executor.
///
/// Decoding is the one CPU-bound step on the load path, so it runs under
/// `spawn_blocking`; everything after the decode is cheap synchronous state
/// mutation.
pub async fn decode_bytes(bytes: Vec<u8>) -> SuperposeResult<Surface> {
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| SuperposeError::decode(format!("decode task failed: {e}")))?
}

/// Decode `bytes` and load the result into `controller`'s `layer` slot.
///
/// Returns `Ok(true)` when the load committed, `Ok(false)` when it completed
/// stale (a newer load for the same layer was issued while this one was
/// decoding). A decode failure aborts the load and leaves prior state
/// untouched.
pub async fn load_layer(
    controller: &mut SessionController,
    layer: Layer,
    bytes: Vec<u8>,
) -> SuperposeResult<bool> {
    let token = controller.begin_load(layer);
    let surface = decode_bytes(bytes).await?;
    let committed = controller.finish_load(token, surface);
    debug!(?layer, committed, "layer load resolved");
    Ok(committed)
}

#[cfg(test)]
#[path = "../../tests/unit/session/loader.rs"]
mod tests;
