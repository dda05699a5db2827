use super::*;

#[test]
fn keys_only_strictly_above_threshold_pixels() {
    let mut s = Surface::new(2, 2);
    s.put_pixel(0, 0, [241, 241, 241, 200]); // near-white: keyed
    s.put_pixel(1, 0, [240, 240, 240, 200]); // at threshold: kept
    s.put_pixel(0, 1, [255, 0, 255, 255]); // colored: kept
    s.put_pixel(1, 1, [255, 255, 240, 90]); // one channel at threshold: kept

    let out = key_out_near_white(&s);
    assert_eq!(out.width(), 2);
    assert_eq!(out.height(), 2);
    assert_eq!(out.pixel(0, 0), [241, 241, 241, 0]);
    assert_eq!(out.pixel(1, 0), [240, 240, 240, 200]);
    assert_eq!(out.pixel(0, 1), [255, 0, 255, 255]);
    assert_eq!(out.pixel(1, 1), [255, 255, 240, 90]);
}

#[test]
fn rgb_channels_survive_keying() {
    let s = Surface::filled(3, 3, [250, 252, 254, 180]);
    let out = key_out_near_white(&s);
    assert!(
        out.data()
            .chunks_exact(4)
            .all(|px| px == [250, 252, 254, 0])
    );
}

#[test]
fn keying_is_idempotent() {
    let mut s = Surface::new(3, 1);
    s.put_pixel(0, 0, [255, 255, 255, 255]);
    s.put_pixel(1, 0, [10, 20, 30, 255]);
    s.put_pixel(2, 0, [250, 250, 250, 0]); // already transparent near-white

    let once = key_out_near_white(&s);
    let twice = key_out_near_white(&once);
    assert_eq!(once, twice);
}

#[test]
fn input_surface_is_not_mutated() {
    let s = Surface::filled(2, 2, [255, 255, 255, 255]);
    let before = s.clone();
    let _ = key_out_near_white(&s);
    assert_eq!(s, before);
}

#[test]
fn zero_sized_input_yields_zero_sized_output() {
    let s = Surface::new(0, 0);
    let out = key_out_near_white(&s);
    assert!(out.is_empty());
    assert_eq!(out.data().len(), 0);
}
