//! GNN commuter visualizer.
//!
//! - `engine`: toolkit-independent graph generation, packet simulation,
//!   interaction and draw-order logic
//! - `ui`: the eframe/egui shell hosting the engine
//! - `config`: TOML configuration

pub mod config;
pub mod engine;
pub mod ui;
