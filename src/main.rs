// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod analysis;
mod config;
mod demo;
mod gui;
mod types;
mod viewer;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use log::info;

use crate::analysis::ReplayService;
use crate::config::ViewerConfig;

#[derive(Parser, Debug)]
#[command(name = "ecg-viewer", about = "Browse ECG recordings with beat classification overlays")]
struct Cli {
    /// Viewer configuration (JSON). Defaults to ./ecg-viewer.json when present.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Analysis response to open at start instead of the demo recording.
    #[arg(short, long)]
    response: Option<PathBuf>,
    /// Directory holding `<record>.json` responses for the Analyze button.
    #[arg(long)]
    replay_dir: Option<PathBuf>,
    /// Samples shown in the main view.
    #[arg(short, long)]
    window_size: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ViewerConfig::load(cli.config.as_deref())?;
    if let Some(window_size) = cli.window_size {
        config.window_size = window_size;
    }
    info!("window of {} samples", config.window_size);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 640.0])
        .with_min_inner_size([800.0, 480.0])
        .with_title("ECG Viewer");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let mut app = gui::EcgViewerApp::new(config);
    if let Some(dir) = cli.replay_dir {
        app = app.with_service(Box::new(ReplayService::with_root(dir)));
    }
    if let Some(path) = cli.response {
        app.open_response(&path);
    }
    eframe::run_native("ECG Viewer", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow!("viewer window failed: {e}"))
}
