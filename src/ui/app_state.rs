//! # Application State
//!
//! `AppState` owns the loaded configuration and the mounted [`Engine`], and
//! implements `eframe::App` to drive one frame of the visualizer per update.
//!
//! ## Frame order
//!
//! 1. Canvas: mount / resize, pointer input, due ticks, drawing
//! 2. Floating controls (layout toggle, run, reset)
//! 3. Node inspector
//! 4. Kernel log
//!
//! Repaints are requested at the engine's frame interval for as long as its
//! frame loop is active. Once the loop is cancelled egui only repaints on
//! input.

use eframe::egui;

use super::{canvas, controls, inspector, log_panel};
use crate::config::VisualizerConfig;
use crate::engine::Engine;
use crate::engine::render::{Palette, Rgba};

/// Central application state shared by every panel.
pub struct AppState {
    /// Configuration the engine is (re)mounted with.
    pub config: VisualizerConfig,
    /// Mounted engine; `None` until the canvas first reports a usable size.
    pub engine: Option<Engine>,
}

impl AppState {
    pub fn new(config: VisualizerConfig) -> Self {
        Self { config, engine: None }
    }

    /// Canvas background, also used before the engine is mounted.
    pub fn background(&self) -> Rgba {
        match &self.engine {
            Some(engine) => engine.palette().background,
            None => Palette::default().background,
        }
    }
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        canvas::render(ctx, self);
        controls::render(ctx, self);
        inspector::render(ctx, self);
        log_panel::render(ctx, self);

        if let Some(engine) = &self.engine {
            if engine.frame_loop().is_active() {
                ctx.request_repaint_after(engine.frame_loop().interval());
            }
        } else {
            // Waiting for a usable surface.
            ctx.request_repaint();
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.teardown();
        }
    }
}
