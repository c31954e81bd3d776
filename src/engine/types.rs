//! Type definitions for the graph animation engine.
//!
//! Contains the data carried between the generator, the simulation and the
//! renderer:
//! - Layout modes
//! - Nodes and edges of a generated topology
//! - Packets ("commuters") travelling along edges

use serde::Deserialize;
use std::fmt;

use super::geometry::Point;

/// Stable node identifier, unique within one generated topology.
pub type NodeId = u32;

/// Topology generation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Structured grid: layers as evenly spaced columns, adjacent-layer edges only.
    Nn,
    /// Organic placement: noisy columns, proximity edges plus rare shortcuts.
    #[default]
    Gnn,
}

impl LayoutMode {
    /// The other layout mode.
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Nn => LayoutMode::Gnn,
            LayoutMode::Gnn => LayoutMode::Nn,
        }
    }

    /// Long human-readable name used in log lines and tooltips.
    pub fn description(self) -> &'static str {
        match self {
            LayoutMode::Nn => "Feed-Forward Network",
            LayoutMode::Gnn => "Graph Topology",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Nn => write!(f, "NN"),
            LayoutMode::Gnn => write!(f, "GNN"),
        }
    }
}

/// A graph node.
///
/// `layer` and `radius` never change after generation. `position` is written
/// by the simulation owner and, during a drag, by the interaction controller.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub layer: usize,
    pub radius: f64,
    /// Recent-arrival level in [0, 1].
    pub activation: f64,
    /// Cosmetic scalar shown in the inspector.
    pub value: f64,
}

/// Directed edge referencing nodes by id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Cosmetic only; the simulation ignores it.
    pub weight: f64,
}

/// A signal packet travelling along one edge.
///
/// The start position is captured when the packet is spawned; the end of the
/// path is the target node's live position.
#[derive(Debug, Clone)]
pub struct Packet {
    pub start: Point,
    pub target: NodeId,
    pub progress: f64,
    pub speed: f64,
}

/// Result of a topology generation pass.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Display label for a node's activation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationLabel {
    High,
    Idle,
}

impl ActivationLabel {
    pub fn from_activation(activation: f64, idle_threshold: f64) -> Self {
        if activation > idle_threshold { ActivationLabel::High } else { ActivationLabel::Idle }
    }
}

impl fmt::Display for ActivationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationLabel::High => write!(f, "HIGH"),
            ActivationLabel::Idle => write!(f, "IDLE"),
        }
    }
}
