/// Decode encoded image bytes into surfaces.
pub mod decode;
