mod app;
mod dialogs;

use app::GifGeneratorApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 220.0])
            .with_min_inner_size([600.0, 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GIF Generator",
        options,
        Box::new(|_cc| Ok(Box::<GifGeneratorApp>::default())),
    )
}
