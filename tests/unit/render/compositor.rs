use super::*;

use crate::effects::keyer::key_out_near_white;

fn pattern(width: u32, height: u32) -> Surface {
    let mut s = Surface::new(width, height);
    for y in 0..height {
        for x in 0..width {
            s.put_pixel(x, y, [(x * 10) as u8, (y * 10) as u8, 100, 255]);
        }
    }
    s
}

fn identity_transform() -> Transform {
    Transform {
        scale: 1.0,
        ..Transform::default()
    }
}

#[test]
fn placeholder_is_deterministic_and_opaque() {
    let mut a = Surface::new(100, 80);
    let mut b = Surface::new(100, 80);
    render_composite(&mut a, None, None, &Transform::default());
    render_composite(&mut b, None, None, &Transform::default());
    assert_eq!(a, b);
    assert!(a.data().chunks_exact(4).all(|px| px[3] == 255));

    // Grid rows/columns are lightened relative to the plain gradient.
    let on_grid = a.pixel(1, 0);
    let off_grid = a.pixel(1, 1);
    assert!((0..3).all(|i| on_grid[i] >= off_grid[i]));
    assert!((0..3).any(|i| on_grid[i] > off_grid[i]));

    // The gradient darkens towards the top.
    let bottom = a.pixel(1, 79);
    assert!((0..3).all(|i| bottom[i] > off_grid[i]));
}

#[test]
fn background_is_stretched_to_fill_target() {
    let mut bg = Surface::new(2, 1);
    bg.put_pixel(0, 0, [255, 0, 0, 255]);
    bg.put_pixel(1, 0, [0, 0, 255, 255]);

    let mut target = Surface::new(4, 2);
    render_composite(&mut target, Some(&bg), None, &Transform::default());

    for y in 0..2 {
        assert_eq!(target.pixel(0, y), [255, 0, 0, 255]);
        assert_eq!(target.pixel(1, y), [255, 0, 0, 255]);
        assert_eq!(target.pixel(2, y), [0, 0, 255, 255]);
        assert_eq!(target.pixel(3, y), [0, 0, 255, 255]);
    }
}

#[test]
fn identity_transform_blits_foreground_centered() {
    let bg = Surface::filled(8, 6, [0, 255, 0, 255]);
    let fg = pattern(4, 2);

    let mut target = Surface::new(8, 6);
    render_composite(&mut target, Some(&bg), Some(&fg), &identity_transform());

    for y in 0..6u32 {
        for x in 0..8u32 {
            let inside = (2..6).contains(&x) && (2..4).contains(&y);
            let expected = if inside {
                fg.pixel(x - 2, y - 2)
            } else {
                [0, 255, 0, 255]
            };
            assert_eq!(target.pixel(x, y), expected, "at ({x},{y})");
        }
    }
}

#[test]
fn rotation_90_maps_pixels_exactly() {
    let bg = Surface::filled(4, 4, [0, 0, 0, 255]);
    let mut fg = Surface::new(2, 2);
    let (a, b, c, d) = (
        [10, 0, 0, 255],
        [0, 20, 0, 255],
        [0, 0, 30, 255],
        [40, 40, 0, 255],
    );
    fg.put_pixel(0, 0, a);
    fg.put_pixel(1, 0, b);
    fg.put_pixel(0, 1, c);
    fg.put_pixel(1, 1, d);

    let mut target = Surface::new(4, 4);
    let transform = Transform {
        scale: 1.0,
        rotation_deg: 90.0,
        ..Transform::default()
    };
    render_composite(&mut target, Some(&bg), Some(&fg), &transform);

    // Clockwise quarter turn about the canvas center: columns become rows.
    assert_eq!(target.pixel(2, 1), a);
    assert_eq!(target.pixel(2, 2), b);
    assert_eq!(target.pixel(1, 1), c);
    assert_eq!(target.pixel(1, 2), d);
    for y in 0..4u32 {
        for x in 0..4u32 {
            if (1..3).contains(&x) && (1..3).contains(&y) {
                continue;
            }
            assert_eq!(target.pixel(x, y), [0, 0, 0, 255], "at ({x},{y})");
        }
    }
}

#[test]
fn opacity_applies_to_the_single_draw_only() {
    let bg = Surface::filled(4, 4, [0, 0, 0, 255]);
    let fg = Surface::filled(2, 2, [255, 0, 0, 255]);

    let mut target = Surface::new(4, 4);
    let half = Transform {
        scale: 1.0,
        opacity: 0.5,
        ..Transform::default()
    };
    render_composite(&mut target, Some(&bg), Some(&fg), &half);
    assert_eq!(target.pixel(1, 1), [128, 0, 0, 255]);
    assert_eq!(target.pixel(0, 0), [0, 0, 0, 255]);

    // A subsequent full-opacity render is unaffected by the previous draw.
    render_composite(&mut target, Some(&bg), Some(&fg), &identity_transform());
    assert_eq!(target.pixel(1, 1), [255, 0, 0, 255]);
}

#[test]
fn keyed_all_white_foreground_leaves_background_visible() {
    let bg = Surface::filled(8, 6, [0, 255, 0, 255]);
    let fg = Surface::filled(4, 4, [255, 255, 255, 255]);
    let keyed = key_out_near_white(&fg);

    let mut target = Surface::new(8, 6);
    render_composite(&mut target, Some(&bg), Some(&keyed), &identity_transform());

    let mut reference = Surface::new(8, 6);
    render_composite(&mut reference, Some(&bg), None, &Transform::default());
    assert_eq!(target, reference);
}

#[test]
fn degenerate_scale_draws_nothing() {
    let bg = Surface::filled(4, 4, [7, 7, 7, 255]);
    let fg = Surface::filled(2, 2, [255, 0, 0, 255]);

    let mut target = Surface::new(4, 4);
    let squashed = Transform {
        scale: 0.0,
        ..Transform::default()
    };
    render_composite(&mut target, Some(&bg), Some(&fg), &squashed);

    let mut reference = Surface::new(4, 4);
    render_composite(&mut reference, Some(&bg), None, &Transform::default());
    assert_eq!(target, reference);
}

#[test]
fn foreground_fully_off_canvas_is_clipped_out() {
    let bg = Surface::filled(4, 4, [7, 7, 7, 255]);
    let fg = Surface::filled(2, 2, [255, 0, 0, 255]);

    let mut target = Surface::new(4, 4);
    let far_away = Transform {
        x: 10_000.0,
        scale: 1.0,
        ..Transform::default()
    };
    render_composite(&mut target, Some(&bg), Some(&fg), &far_away);
    assert!(
        target
            .data()
            .chunks_exact(4)
            .all(|px| px == [7, 7, 7, 255])
    );
}

#[test]
fn blend_over_extremes_are_exact() {
    let dst = [10, 20, 30, 255];
    assert_eq!(blend_over(dst, [200, 100, 50, 0], 255), dst);
    assert_eq!(blend_over(dst, [200, 100, 50, 255], 0), dst);
    assert_eq!(
        blend_over(dst, [200, 100, 50, 255], 255),
        [200, 100, 50, 255]
    );
}
