use eframe::egui;
use math_canvas::gui::MathCanvasApp;
use math_canvas::logging;
use math_canvas::settings::{Settings, SETTINGS_FILE};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(
        settings.debug_logging,
        settings.log_file.as_ref().map(std::path::PathBuf::from),
    );

    let api_url = settings.resolved_api_url();
    tracing::info!(%api_url, "starting math canvas");

    let (width, height) = settings.window_size.unwrap_or((1280, 800));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Math Canvas")
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Math Canvas",
        native_options,
        Box::new(move |_cc| Box::new(MathCanvasApp::new(&settings, api_url))),
    )
    .map_err(|e| anyhow::anyhow!("ui exited with error: {e}"))
}
