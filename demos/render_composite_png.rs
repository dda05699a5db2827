use superpose::{SessionController, Surface};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut session = SessionController::new();
    session.load_background(Surface::filled(400, 300, [34, 94, 168, 255]));

    // An object on a white sheet, as a scanned cutout would be.
    let mut object = Surface::filled(120, 120, [255, 255, 255, 255]);
    for y in 30..90 {
        for x in 30..90 {
            object.put_pixel(x, y, [220, 60, 40, 255]);
        }
    }
    session.load_foreground(object);
    session.set_remove_white(true);
    session.set_scale(1.5);
    session.set_rotation_deg(15.0);
    session.set_position(120.0, -40.0);

    let png = session.export_png()?;
    std::fs::write(superpose::MANUAL_EXPORT_FILE_NAME, &png)?;
    println!(
        "wrote {} ({}x{}, {} bytes)",
        superpose::MANUAL_EXPORT_FILE_NAME,
        session.canvas().width,
        session.canvas().height,
        png.len()
    );

    Ok(())
}
