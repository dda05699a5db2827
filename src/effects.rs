/// Near-white keying.
pub mod keyer;
