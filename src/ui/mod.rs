// UI module for the GNN commuter visualizer
//
// This module organizes the egui shell into separate components:
// - `canvas`: the drawing surface, pointer input and the egui `Surface`
// - `controls`: floating layout / run / reset buttons
// - `inspector`: readout for the selected node
// - `log_panel`: the kernel log overlay
// - `app_state`: application state and the main update loop

pub mod app_state;
pub mod canvas;
pub mod controls;
pub mod inspector;
pub mod log_panel;

use eframe::egui;
use egui::Color32;

use crate::engine::render::Rgba;

pub use app_state::AppState;

/// Highlight colour for the newest log line and the inspector title.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99);

/// Convert an engine colour to an egui colour.
pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Translucent card used by every overlay.
pub fn overlay_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_black_alpha(150))
        .stroke(egui::Stroke::new(1.0, Color32::from_white_alpha(25)))
        .corner_radius(8.0)
        .inner_margin(10.0)
}
