//! Kernel log overlay (bottom-right): the engine's bounded event log,
//! newest entry first and highlighted.

use eframe::egui;

use super::{AppState, HIGHLIGHT, overlay_frame};

const PANEL_WIDTH: f32 = 260.0;

/// Render the kernel log.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Application state holding the engine log
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(engine) = state.engine.as_ref() else {
        return;
    };

    egui::Area::new(egui::Id::new("kernel_log"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .interactable(false)
        .show(ctx, |ui| {
            overlay_frame().show(ui, |ui| {
                ui.set_width(PANEL_WIDTH);
                ui.label(egui::RichText::new("KERNEL LOG").monospace().small().weak());
                ui.separator();
                for (i, entry) in engine.log().entries().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(entry.timestamp.format("%H:%M:%S").to_string()).monospace().small().weak());
                        let text = egui::RichText::new(&entry.message).monospace().small();
                        ui.label(if i == 0 { text.color(HIGHLIGHT) } else { text });
                    });
                }
            });
        });
}
