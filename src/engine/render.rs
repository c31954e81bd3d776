//! Framework-agnostic renderer.
//!
//! [`draw`] is a pure function of the simulation state: it reads nodes,
//! edges, packets and flashes and emits primitives to a [`Surface`]. Hosts
//! implement `Surface` for their painter (the egui shell does so in
//! `ui::canvas`).
//!
//! Draw order is fixed so that node glow is never covered:
//! background, edges, packets, arrival flashes, nodes.

use super::geometry::Point;
use super::simulation::Simulation;
use super::types::{LayoutMode, NodeId};

/// Straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha scaled by `factor` (clamped to [0, 1]).
    pub fn faded(self, factor: f64) -> Self {
        let a = (self.a as f64 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// Soft halo drawn around a disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    /// Halo extent in pixels beyond the disc radius.
    pub blur: f64,
}

/// Drawing primitives the renderer needs from a host.
pub trait Surface {
    /// Fill the whole surface.
    fn clear(&mut self, color: Rgba);
    /// Straight segment.
    fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba);
    /// Filled disc with an optional halo.
    fn disc(&mut self, center: Point, radius: f64, fill: Rgba, glow: Option<Glow>);
    /// Circle outline.
    fn ring(&mut self, center: Point, radius: f64, width: f64, color: Rgba);
}

/// Colours used by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub node: Rgba,
    pub node_active: Rgba,
    pub node_outline: Rgba,
    pub edge: Rgba,
    pub packet: Rgba,
    pub accent: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba::rgb(0x0f, 0x11, 0x15),
            node: Rgba::rgb(0x33, 0x33, 0x33),
            node_active: Rgba::rgb(0xff, 0xff, 0xff),
            node_outline: Rgba::rgba(255, 255, 255, 38),
            edge: Rgba::rgba(255, 255, 255, 13),
            packet: Rgba::rgb(0x00, 0xff, 0x9d),
            accent: Rgba::rgb(0x0e, 0xa5, 0xe9),
        }
    }
}

const PACKET_RADIUS: f64 = 2.5;
const PACKET_GLOW: f64 = 6.0;
const FLASH_RADIUS: f64 = 8.0;
/// Node halo extent at full activation.
const NODE_GLOW: f64 = 15.0;

/// Draw the current state. Never mutates the simulation.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, sim: &Simulation, selected: Option<NodeId>, mode: LayoutMode, palette: &Palette) {
    surface.clear(palette.background);

    // Thinner edges for the dense NN graph
    let edge_width = match mode {
        LayoutMode::Nn => 0.5,
        LayoutMode::Gnn => 1.0,
    };
    for edge in sim.edges() {
        let (Some(s), Some(t)) = (sim.position(edge.source), sim.position(edge.target)) else {
            continue;
        };
        surface.line(s, t, edge_width, palette.edge);
    }

    let packet_glow = Glow {
        color: palette.packet,
        blur: PACKET_GLOW,
    };
    for packet in sim.packets() {
        if packet.progress >= 1.0 {
            continue;
        }
        if let Some(pos) = sim.packet_position(packet) {
            surface.disc(pos, PACKET_RADIUS, palette.packet, Some(packet_glow));
        }
    }

    for flash in sim.flashes() {
        surface.ring(*flash, FLASH_RADIUS, 1.0, palette.packet);
    }

    for node in sim.nodes() {
        let fill = if selected == Some(node.id) {
            palette.accent
        } else if sim.is_active(node) {
            palette.node_active
        } else {
            palette.node
        };
        let glow = (node.activation > 0.0).then(|| Glow {
            color: palette.accent,
            blur: node.activation * NODE_GLOW,
        });
        surface.disc(node.position, node.radius, fill, glow);
        surface.ring(node.position, node.radius, 1.0, palette.node_outline);
    }
}
