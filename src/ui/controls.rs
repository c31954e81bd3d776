//! Floating controls in the top-right corner of the canvas.

use eframe::egui;

use super::{AppState, overlay_frame};

/// Render the layout toggle, run and reset buttons.
///
/// Commands are applied to the engine immediately, so they take effect
/// before the next frame's ticks.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Application state holding the engine to command
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(engine) = state.engine.as_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("graph_controls"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .show(ctx, |ui| {
            overlay_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mode = engine.mode();
                    if ui
                        .button(egui::RichText::new(format!("Layout: {mode}")).monospace())
                        .on_hover_text(format!("Switch to {}", mode.toggled().description()))
                        .clicked()
                    {
                        engine.toggle_layout();
                    }

                    let run = ui
                        .add_enabled(!engine.is_running(), egui::Button::new(egui::RichText::new("▶ Run").monospace()))
                        .on_hover_text("Send one packet along every edge");
                    if run.clicked() {
                        engine.run();
                    }

                    if ui.button(egui::RichText::new("Reset").monospace()).clicked() {
                        engine.reset();
                    }
                });
            });
        });
}
