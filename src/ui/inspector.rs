//! Node inspector overlay (top-left), shown while a node is selected.

use eframe::egui;

use super::{AppState, HIGHLIGHT, overlay_frame};
use crate::engine::ActivationLabel;

/// Render the readout for the selected node, if any.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Application state holding the engine to inspect
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(inspection) = state.engine.as_ref().and_then(|engine| engine.inspect()) else {
        return;
    };

    egui::Area::new(egui::Id::new("node_inspector"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 16.0))
        .show(ctx, |ui| {
            overlay_frame().show(ui, |ui| {
                ui.label(egui::RichText::new(format!("NODE_{}", inspection.id)).monospace().strong().color(HIGHLIGHT));
                ui.separator();
                egui::Grid::new("node_inspector_grid").num_columns(2).spacing([12.0, 2.0]).show(ui, |ui| {
                    ui.label(egui::RichText::new("VAL").monospace().weak());
                    ui.label(egui::RichText::new(format!("{:.2}", inspection.value)).monospace());
                    ui.end_row();

                    ui.label(egui::RichText::new("LAYER").monospace().weak());
                    ui.label(egui::RichText::new(inspection.layer.to_string()).monospace());
                    ui.end_row();

                    ui.label(egui::RichText::new("ACT").monospace().weak());
                    let color = match inspection.label {
                        ActivationLabel::High => HIGHLIGHT,
                        ActivationLabel::Idle => egui::Color32::GRAY,
                    };
                    ui.label(egui::RichText::new(inspection.label.to_string()).monospace().color(color));
                    ui.end_row();
                });
            });
        });
}
