//! Graph animation engine.
//!
//! This module is independent of any GUI toolkit. It integrates:
//! - Topology generation for the NN and GNN layouts
//! - The packet simulation and activation decay
//! - Pointer interaction (pick, select, drag)
//! - The bounded kernel log and the inspector readout
//! - Surface size tracking and the cancellable frame loop
//!
//! ## Module Organization
//!
//! - `geometry`: points, distances, interpolation
//! - `types`: nodes, edges, packets, layout modes
//! - `topology`: procedural graph generation
//! - `simulation`: packet movement, arrivals and decay
//! - `interaction`: pointer picking and dragging
//! - `render`: draw-order logic behind the `Surface` trait
//! - `event_log`: the on-screen event list
//! - `lifecycle`: surface size and frame pacing
//!
//! ## Public API
//!
//! [`Engine`] is the handle a UI shell owns. Every command is a plain method
//! call applied synchronously; the shell calls [`Engine::frame`] once per
//! repaint and then [`Engine::draw`].

pub mod event_log;
pub mod geometry;
pub mod interaction;
pub mod lifecycle;
pub mod render;
pub mod simulation;
pub mod topology;
pub mod types;

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

use event_log::EventLog;
use interaction::Interaction;
use lifecycle::{FrameLoop, SurfaceSize};
use render::{Palette, Surface};
use simulation::{Simulation, SimulationParams, TickReport};
use topology::GeneratorParams;

pub use geometry::Point;
pub use types::{ActivationLabel, LayoutMode, NodeId};

/// Everything the engine needs to know at mount time.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub initial_layout: LayoutMode,
    pub log_capacity: usize,
    pub frame_interval: Duration,
    pub simulation: SimulationParams,
    pub topology: GeneratorParams,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            initial_layout: LayoutMode::default(),
            log_capacity: event_log::MAX_CAPACITY,
            frame_interval: Duration::from_millis(16),
            simulation: SimulationParams::default(),
            topology: GeneratorParams::default(),
        }
    }
}

/// Readout for the node inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub id: NodeId,
    pub layer: usize,
    pub value: f64,
    pub activation: f64,
    pub label: ActivationLabel,
}

/// A mounted visualizer instance.
pub struct Engine {
    settings: EngineSettings,
    mode: LayoutMode,
    size: SurfaceSize,
    sim: Simulation,
    interaction: Interaction,
    log: EventLog,
    frame_loop: FrameLoop,
    palette: Palette,
    rng: StdRng,
}

impl Engine {
    /// Mount on a `width` × `height` surface.
    ///
    /// Returns `None` when the surface is absent (zero or invalid size); the
    /// caller shows nothing and may try again later.
    pub fn mount(width: f64, height: f64, settings: EngineSettings) -> Option<Self> {
        Self::mount_with_rng(width, height, settings, StdRng::from_entropy())
    }

    /// Like [`Engine::mount`] with a caller-provided RNG.
    pub fn mount_with_rng(width: f64, height: f64, settings: EngineSettings, mut rng: StdRng) -> Option<Self> {
        let Some(size) = SurfaceSize::from_pixels(width, height) else {
            log::info!("Drawing surface unavailable ({}x{}), skipping initialization", width, height);
            return None;
        };

        let mode = settings.initial_layout;
        let topology = topology::generate(size.width_f64(), size.height_f64(), mode, &settings.topology, &mut rng);
        let sim = Simulation::new(topology, settings.simulation.clone());
        let mut frame_loop = FrameLoop::new(settings.frame_interval);
        frame_loop.start(Instant::now());

        let mut engine = Self {
            log: EventLog::new(settings.log_capacity),
            settings,
            mode,
            size,
            sim,
            interaction: Interaction::new(),
            frame_loop,
            palette: Palette::default(),
            rng,
        };
        engine.log.replace([
            "> Kernel initialized.".to_string(),
            "> Graph constructed.".to_string(),
            format!("> Mode: {}", mode.description()),
        ]);
        log::info!("Mounted on {}x{} surface", size.width, size.height);
        Some(engine)
    }

    /// Switch NN ↔ GNN and rebuild the graph from scratch.
    pub fn toggle_layout(&mut self) {
        self.mode = self.mode.toggled();
        self.regenerate();
        self.log.push(format!("> Switched to {} Mode", self.mode));
    }

    /// Track a new surface size. A real change rebuilds the graph.
    ///
    /// Returns true if the graph was regenerated. Sizes that describe an
    /// absent surface are ignored and the current graph is kept.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let Some(size) = SurfaceSize::from_pixels(width, height) else {
            return false;
        };
        if size == self.size {
            return false;
        }
        log::debug!("Surface resized {}x{} -> {}x{}", self.size.width, self.size.height, size.width, size.height);
        self.size = size;
        self.regenerate();
        true
    }

    /// Start message passing. Returns false if a batch is already running.
    pub fn run(&mut self) -> bool {
        match self.sim.run(&mut self.rng) {
            Some(spawned) => {
                self.log.push("> Executing Message Passing...");
                log::debug!("{} commuters in flight", spawned);
                true
            }
            None => false,
        }
    }

    /// Stop, drop packets and clear activation. Selection is kept.
    pub fn reset(&mut self) {
        self.sim.reset();
        self.log.push("> System Reset.");
    }

    pub fn pointer_down(&mut self, point: Point) {
        if let Some(id) = self.interaction.pointer_down(&self.sim, point) {
            self.log.push(format!("> Node {} selected.", id));
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.interaction.pointer_move(&mut self.sim, point);
    }

    pub fn pointer_up(&mut self) {
        self.interaction.release();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.release();
    }

    /// Advance the simulation by exactly one tick.
    pub fn tick(&mut self) -> TickReport {
        self.sim.advance()
    }

    /// Run the ticks that are due at `now`. Returns how many ran.
    pub fn frame(&mut self, now: Instant) -> u32 {
        let due = self.frame_loop.due_ticks(now);
        for _ in 0..due {
            self.sim.advance();
        }
        due
    }

    /// Release the frame loop. The engine stops ticking for good.
    pub fn teardown(&mut self) {
        self.frame_loop.cancel();
        log::info!("Visualizer torn down");
    }

    /// Draw the current state onto `surface`.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        render::draw(surface, &self.sim, self.interaction.selected(), self.mode, &self.palette);
    }

    /// Inspector data for the selected node, if any.
    pub fn inspect(&self) -> Option<Inspection> {
        let node = self.sim.node(self.interaction.selected()?)?;
        Some(Inspection {
            id: node.id,
            layer: node.layer,
            value: node.value,
            activation: node.activation,
            label: ActivationLabel::from_activation(node.activation, self.settings.simulation.idle_threshold),
        })
    }

    fn regenerate(&mut self) {
        let topology = topology::generate(self.size.width_f64(), self.size.height_f64(), self.mode, &self.settings.topology, &mut self.rng);
        self.sim.replace_topology(topology);
        self.interaction.clear();
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mode: LayoutMode) -> Engine {
        let settings = EngineSettings {
            initial_layout: mode,
            ..EngineSettings::default()
        };
        Engine::mount_with_rng(800.0, 600.0, settings, StdRng::seed_from_u64(42)).expect("surface is present")
    }

    #[test]
    fn mount_skips_absent_surface() {
        assert!(Engine::mount(0.0, 0.0, EngineSettings::default()).is_none());
        assert!(Engine::mount(800.0, f64::NAN, EngineSettings::default()).is_none());
    }

    #[test]
    fn mount_builds_graph_and_logs_init() {
        let e = engine(LayoutMode::Nn);
        assert_eq!(e.simulation().nodes().len(), 23);
        assert!(e.frame_loop().is_active());
        assert_eq!(e.log().messages()[0], "> Mode: Feed-Forward Network");
        assert_eq!(e.log().messages()[2], "> Kernel initialized.");
    }

    #[test]
    fn toggle_regenerates_and_drops_run_state() {
        let mut e = engine(LayoutMode::Gnn);
        e.pointer_down(e.simulation().nodes()[0].position);
        assert!(e.run());
        for _ in 0..60 {
            e.tick();
        }
        e.toggle_layout();

        assert_eq!(e.mode(), LayoutMode::Nn);
        assert!(!e.is_running());
        assert!(e.simulation().packets().is_empty());
        assert!(e.simulation().nodes().iter().all(|n| n.activation == 0.0));
        assert!(e.simulation().nodes().iter().all(|n| n.radius == 8.0));
        assert_eq!(e.interaction().selected(), None);
        assert_eq!(e.log().messages()[0], "> Switched to NN Mode");
    }

    #[test]
    fn resize_mid_run_regenerates() {
        let mut e = engine(LayoutMode::Nn);
        e.run();
        e.tick();
        assert!(!e.resize(800.0, 600.0));
        assert!(e.is_running());

        assert!(e.resize(1024.0, 768.0));
        assert!(!e.is_running());
        assert!(e.simulation().packets().is_empty());
        assert_eq!(e.size(), SurfaceSize { width: 1024, height: 768 });

        // Collapsed container keeps the current graph.
        assert!(!e.resize(0.0, 768.0));
        assert_eq!(e.size().width, 1024);
    }

    #[test]
    fn run_is_idempotent_until_reset() {
        let mut e = engine(LayoutMode::Nn);
        let edges = e.simulation().edges().len();
        assert!(e.run());
        assert!(!e.run());
        assert_eq!(e.simulation().packets().len(), edges);

        e.reset();
        assert!(e.simulation().packets().is_empty());
        assert_eq!(e.log().messages()[0], "> System Reset.");
        assert!(e.run());
    }

    #[test]
    fn selection_survives_reset_and_feeds_inspector() {
        let mut e = engine(LayoutMode::Nn);
        let target = e.simulation().nodes()[6].clone();
        e.pointer_down(target.position);
        e.pointer_up();
        assert_eq!(e.log().messages()[0], format!("> Node {} selected.", target.id));

        let inspection = e.inspect().expect("a node is selected");
        assert_eq!(inspection.id, target.id);
        assert_eq!(inspection.layer, 1);
        assert_eq!(inspection.label, ActivationLabel::Idle);

        e.reset();
        assert_eq!(e.interaction().selected(), Some(target.id));
    }

    #[test]
    fn drag_moves_node_and_leave_releases() {
        let mut e = engine(LayoutMode::Nn);
        let start = e.simulation().nodes()[0].position;
        e.pointer_down(start);
        e.pointer_move(Point::new(400.0, 300.0));
        assert_eq!(e.simulation().nodes()[0].position, Point::new(400.0, 300.0));
        e.pointer_leave();
        e.pointer_move(Point::new(10.0, 10.0));
        assert_eq!(e.simulation().nodes()[0].position, Point::new(400.0, 300.0));
    }

    #[test]
    fn teardown_stops_frames() {
        let mut e = engine(LayoutMode::Gnn);
        e.run();
        e.teardown();
        assert_eq!(e.frame(Instant::now() + Duration::from_secs(1)), 0);
        assert!(e.frame_loop().is_cancelled());
    }

    #[test]
    fn frame_runs_due_ticks() {
        let mut e = engine(LayoutMode::Nn);
        e.run();
        let ran = e.frame(Instant::now() + Duration::from_millis(40));
        assert!(ran >= 2 && ran <= lifecycle::MAX_TICKS_PER_FRAME);
        assert_eq!(e.simulation().ticks(), ran as u64);
    }
}
