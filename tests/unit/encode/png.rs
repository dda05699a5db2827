use super::*;

use crate::assets::decode::decode_image;

#[test]
fn png_roundtrip_preserves_pixels() {
    let mut s = Surface::new(2, 2);
    s.put_pixel(0, 0, [255, 0, 0, 255]);
    s.put_pixel(1, 0, [0, 255, 0, 128]);
    s.put_pixel(0, 1, [0, 0, 255, 0]);
    s.put_pixel(1, 1, [250, 250, 250, 7]);

    let bytes = encode_png(&s).unwrap();
    let back = decode_image(&bytes).unwrap();
    assert_eq!(back, s);
}

#[test]
fn export_artifact_names_are_stable() {
    assert_eq!(MANUAL_EXPORT_FILE_NAME, "composicion-manual.png");
    assert_eq!(AI_EXPORT_FILE_NAME, "render-realista-ia.png");
}
