//! # Canvas
//!
//! Hosts the engine on an egui painter filling the central panel:
//! - Mounts the engine the first time the panel has a usable size
//! - Forwards panel size changes (the resize observer of this shell)
//! - Translates pointer press / move / release / leave into engine commands
//! - Runs the due simulation ticks, then draws through [`EguiSurface`]
//!
//! Input is applied before the ticks of the same frame, so a drag is always
//! visible in the frame that produced it.

use eframe::egui;
use egui::Pos2;
use std::time::Instant;

use super::{AppState, to_color32};
use crate::engine::render::{Glow, Rgba, Surface};
use crate::engine::{Engine, Point};

/// Concentric rings used to fake a blurred halo.
const GLOW_STEPS: usize = 4;
/// Peak halo alpha relative to the glow colour.
const GLOW_STRENGTH: f64 = 0.35;

/// egui implementation of the engine's drawing surface.
///
/// Engine coordinates are relative to the canvas; `origin` is the canvas'
/// top-left corner in screen space.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn to_screen(&self, p: Point) -> Pos2 {
        egui::pos2(self.origin.x + p.x as f32, self.origin.y + p.y as f32)
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self, color: Rgba) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, to_color32(color));
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], egui::Stroke::new(width as f32, to_color32(color)));
    }

    fn disc(&mut self, center: Point, radius: f64, fill: Rgba, glow: Option<Glow>) {
        let c = self.to_screen(center);
        if let Some(glow) = glow {
            // Outermost ring first so inner rings stack up towards the disc.
            for step in (1..=GLOW_STEPS).rev() {
                let t = step as f64 / GLOW_STEPS as f64;
                let alpha = GLOW_STRENGTH * (1.0 - t) + GLOW_STRENGTH / GLOW_STEPS as f64;
                let r = radius + glow.blur * t;
                self.painter.circle_filled(c, r as f32, to_color32(glow.color.faded(alpha)));
            }
        }
        self.painter.circle_filled(c, radius as f32, to_color32(fill));
    }

    fn ring(&mut self, center: Point, radius: f64, width: f64, color: Rgba) {
        self.painter
            .circle_stroke(self.to_screen(center), radius as f32, egui::Stroke::new(width as f32, to_color32(color)));
    }
}

/// Render the canvas panel and drive the engine for this frame.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Application state owning the engine handle
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let background = to_color32(state.background());
    egui::CentralPanel::default().frame(egui::Frame::new().fill(background)).show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let (width, height) = (rect.width() as f64, rect.height() as f64);

        if state.engine.is_none() {
            state.engine = Engine::mount(width, height, state.config.engine_settings());
        }
        // No usable surface yet: draw nothing and retry next frame.
        let Some(engine) = state.engine.as_mut() else {
            return;
        };
        engine.resize(width, height);

        handle_pointer(ui, &response, rect, engine);
        engine.frame(Instant::now());

        let mut surface = EguiSurface::new(&painter, rect.min);
        engine.draw(&mut surface);

        if response.hovered() {
            ctx.set_cursor_icon(if engine.interaction().dragging().is_some() {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Crosshair
            });
        }
    });
}

/// Translate this frame's pointer state into engine commands.
fn handle_pointer(ui: &egui::Ui, response: &egui::Response, rect: egui::Rect, engine: &mut Engine) {
    let to_local = |p: Pos2| Point::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);
    let (pressed, released, interact_pos, hover_pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
            i.pointer.hover_pos(),
        )
    });

    if pressed && response.contains_pointer() {
        if let Some(pos) = interact_pos {
            engine.pointer_down(to_local(pos));
        }
    }

    if engine.interaction().dragging().is_none() {
        return;
    }
    if released {
        engine.pointer_up();
    } else if !response.contains_pointer() {
        engine.pointer_leave();
    } else if let Some(pos) = hover_pos {
        engine.pointer_move(to_local(pos));
    }
}
