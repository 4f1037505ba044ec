//! verify-dialog: shows a host's signature verification result

use eframe::egui;

use verify_dialog_adapters::{DialogConfig, LaunchParams};
use verify_dialog_core::MessageKey;

mod app;
mod bridge;
mod ui;

fn main() -> eyre::Result<()> {
    // Stdout carries the host channel, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let launch = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("VERIFY_DIALOG_LAUNCH").ok())
        .ok_or_else(|| eyre::eyre!("usage: verify-dialog <launch-url with ?id=<correlation-id>>"))?;
    let params = LaunchParams::parse(&launch)?;
    let config = DialogConfig::from_env()?;

    tracing::info!(id = %params.correlation_id, "starting verify dialog");

    let bridge = bridge::DialogBridge::start(params, config)?;
    let title = bridge.text(MessageKey::VerifyPopupTitle).to_owned();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([420.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "verify-dialog",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, bridge)))),
    )
    .map_err(|e| eyre::eyre!("dialog window failed: {e}"))
}
