//! Procedural topology generation.
//!
//! Builds the node set and the edge set for one layout mode. The layer
//! structure is fixed by [`GeneratorParams::layer_sizes`]; placement noise,
//! radii and connectivity are drawn from the caller's RNG, so a seeded RNG
//! gives a reproducible graph and the default thread RNG does not.
//!
//! ## Placement
//!
//! - NN: layer `l` sits on column `width / (layers + 1) * (l + 1)`, its nodes
//!   evenly spaced vertically. All nodes share one radius.
//! - GNN: the same column plus horizontal noise, vertical position scattered
//!   around the centre line, both clamped to an inset margin. Radii vary.
//!
//! ## Connectivity
//!
//! Every ordered pair is considered once. Edges always point to a strictly
//! higher layer, so the result is a DAG flowing left to right.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::Deserialize;

use super::geometry::{Point, clamp_inset, distance};
use super::types::{Edge, LayoutMode, Node, NodeId, Topology};

/// Parameters of the topology generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorParams {
    /// Node count per layer, left to right.
    pub layer_sizes: Vec<usize>,
    /// Radius of every node in NN mode.
    pub nn_radius: f64,
    /// Lower bound of the GNN radius band.
    pub organic_radius_min: f64,
    /// Upper bound of the GNN radius band.
    pub organic_radius_max: f64,
    /// Distance kept between GNN nodes and the surface edges.
    pub inset: f64,
    /// Total width of the horizontal noise band, as a fraction of width.
    pub horizontal_noise: f64,
    /// Total height of the vertical noise band, as a fraction of height.
    pub vertical_noise: f64,
    /// GNN proximity threshold for regular edges.
    pub proximity_radius: f64,
    /// Acceptance probability of an adjacent-layer pair in NN mode.
    pub nn_connect_probability: f64,
    /// Acceptance probability of a close forward pair in GNN mode.
    pub gnn_connect_probability: f64,
    /// Probability of a long-range forward shortcut in GNN mode.
    pub shortcut_probability: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            layer_sizes: vec![5, 7, 7, 4],
            nn_radius: 8.0,
            organic_radius_min: 6.0,
            organic_radius_max: 12.0,
            inset: 50.0,
            horizontal_noise: 0.2,
            vertical_noise: 0.6,
            proximity_radius: 200.0,
            nn_connect_probability: 0.8,
            gnn_connect_probability: 0.6,
            shortcut_probability: 0.05,
        }
    }
}

impl GeneratorParams {
    /// Check value ranges. Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.layer_sizes.is_empty() {
            return Err("layer-sizes must name at least one layer".into());
        }
        if self.nn_radius <= 0.0 {
            return Err(format!("nn-radius must be positive, got {}", self.nn_radius));
        }
        if self.organic_radius_min <= 0.0 || self.organic_radius_min > self.organic_radius_max {
            return Err(format!(
                "organic radius band [{}, {}] is invalid",
                self.organic_radius_min, self.organic_radius_max
            ));
        }
        if self.inset < 0.0 || self.proximity_radius < 0.0 {
            return Err("inset and proximity-radius must not be negative".into());
        }
        if !(0.0..=1.0).contains(&self.horizontal_noise) || !(0.0..=1.0).contains(&self.vertical_noise) {
            return Err("noise fractions must lie in [0, 1]".into());
        }
        for (name, p) in [
            ("nn-connect-probability", self.nn_connect_probability),
            ("gnn-connect-probability", self.gnn_connect_probability),
            ("shortcut-probability", self.shortcut_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} must lie in [0, 1], got {}", name, p));
            }
        }
        Ok(())
    }

    /// Total number of nodes a generation pass produces.
    pub fn node_count(&self) -> usize {
        self.layer_sizes.iter().sum()
    }
}

/// Generate a fresh topology for a `width` × `height` surface.
///
/// Never fails. A draw that yields no edges is a valid result.
pub fn generate<R: Rng + ?Sized>(width: f64, height: f64, mode: LayoutMode, params: &GeneratorParams, rng: &mut R) -> Topology {
    let nodes = place_nodes(width, height, mode, params, rng);
    let edges = connect(&nodes, mode, params, rng);
    log::debug!("Generated {} topology: {} nodes, {} edges ({}x{})", mode, nodes.len(), edges.len(), width, height);
    Topology { nodes, edges }
}

fn place_nodes<R: Rng + ?Sized>(width: f64, height: f64, mode: LayoutMode, params: &GeneratorParams, rng: &mut R) -> Vec<Node> {
    let layers = params.layer_sizes.len();
    let x_step = width / (layers as f64 + 1.0);
    let x_noise = Uniform::new_inclusive(-params.horizontal_noise / 2.0, params.horizontal_noise / 2.0);
    let y_noise = Uniform::new_inclusive(-params.vertical_noise / 2.0, params.vertical_noise / 2.0);
    let organic_radius = Uniform::new_inclusive(params.organic_radius_min, params.organic_radius_max);

    let mut nodes = Vec::with_capacity(params.node_count());
    let mut next_id: NodeId = 0;

    for (layer, &count) in params.layer_sizes.iter().enumerate() {
        let column = x_step * (layer as f64 + 1.0);
        for i in 0..count {
            let (position, radius) = match mode {
                LayoutMode::Nn => {
                    let y_step = height / (count as f64 + 1.0);
                    (Point::new(column, y_step * (i as f64 + 1.0)), params.nn_radius)
                }
                LayoutMode::Gnn => {
                    let x = column + x_noise.sample(rng) * width;
                    let y = height / 2.0 + y_noise.sample(rng) * height;
                    let position = Point::new(clamp_inset(x, width, params.inset), clamp_inset(y, height, params.inset));
                    (position, organic_radius.sample(rng))
                }
            };

            nodes.push(Node {
                id: next_id,
                position,
                layer,
                radius,
                activation: 0.0,
                value: rng.r#gen::<f64>(),
            });
            next_id += 1;
        }
    }
    nodes
}

fn connect<R: Rng + ?Sized>(nodes: &[Node], mode: LayoutMode, params: &GeneratorParams, rng: &mut R) -> Vec<Edge> {
    let mut edges = Vec::new();
    for source in nodes {
        for target in nodes {
            let accepted = match mode {
                LayoutMode::Nn => target.layer == source.layer + 1 && rng.gen_bool(params.nn_connect_probability),
                LayoutMode::Gnn => {
                    if target.layer <= source.layer {
                        false
                    } else {
                        // Both draws happen for every forward pair so shortcut
                        // frequency does not depend on proximity.
                        let close = distance(&source.position, &target.position) < params.proximity_radius
                            && rng.gen_bool(params.gnn_connect_probability);
                        let shortcut = rng.gen_bool(params.shortcut_probability);
                        close || shortcut
                    }
                }
            };

            if accepted {
                edges.push(Edge {
                    source: source.id,
                    target: target.id,
                    weight: rng.r#gen::<f64>(),
                });
            }
        }
    }
    edges
}
