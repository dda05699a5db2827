use super::*;

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decodes_png_to_straight_rgba8() {
    let bytes = png_bytes(3, 2, [200, 100, 50, 128]);
    let surface = decode_image(&bytes).unwrap();
    assert_eq!(surface.width(), 3);
    assert_eq!(surface.height(), 2);
    // Alpha stays straight: no premultiply on decode.
    assert!(
        surface
            .data()
            .chunks_exact(4)
            .all(|px| px == [200, 100, 50, 128])
    );
}

#[test]
fn decodes_jpeg() {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .to_rgb8()
        .write_to(&mut out, image::ImageFormat::Jpeg)
        .unwrap();

    let surface = decode_image(&out.into_inner()).unwrap();
    assert_eq!(surface.width(), 4);
    assert_eq!(surface.height(), 4);
}

#[test]
fn malformed_bytes_fail_with_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(err.to_string().contains("decode error:"));
}
