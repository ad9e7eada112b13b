mod backend_bridge;
mod config;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime::spawn_backend_thread;
use crate::controller::events::UiEvent;
use crate::ui::DesktopGuiApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured service root, e.g. http://127.0.0.1:8080/sgu-api
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let settings = config::load_settings();
    let base_url = args
        .server_url
        .unwrap_or_else(|| settings.api_base_url());
    tracing::info!(%base_url, "starting user directory desktop");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(cmd_rx, ui_tx, base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("User Directory Desktop")
            .with_inner_size([900.0, 620.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "User Directory Desktop",
        options,
        Box::new(|_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx)))),
    )
}
