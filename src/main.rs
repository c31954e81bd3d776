use eframe::egui;
use env_logger::Builder;
use log::{LevelFilter, error, info};
use std::path::Path;

use gnn_commuter_viz::config::{CONFIG_FILE_NAME, VisualizerConfig};
use gnn_commuter_viz::ui::AppState;

fn main() {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("gnn_commuter_viz"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let config = VisualizerConfig::load_or_default(Path::new(CONFIG_FILE_NAME));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GNN Commuter")
            .with_inner_size([960.0, 600.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };
    if let Err(e) = eframe::run_native("GNN Commuter", native_options, Box::new(move |_cc| Ok(Box::new(AppState::new(config))))) {
        error!("GUI terminated with an error: {e}");
    }
}
