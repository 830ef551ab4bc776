use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use padscope::config::ViewerConfig;
use padscope::controller::GilrsSource;
use padscope::ui::session::ViewerSession;
use padscope::ui::ViewerApp;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    setup()?;

    let config = ViewerConfig::load_default()?;
    info!(
        "Opening '{}' at {}x{}, {} fps",
        config.window.title, config.window.width, config.window.height, config.window.frame_rate
    );

    let source = GilrsSource::new()?;

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.window.width as f32, config.window.height as f32])
        .with_title(config.window.title.clone());

    let title = config.window.title.clone();
    let session = ViewerSession::new(config);

    eframe::run_native(
        &title,
        native_options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc, source, session)))),
    )
    .map_err(|e| eyre!("Viewer window failed: {}", e))?;

    info!("Window closed, shutting down");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
