//! Simulation state: nodes, edges, in-flight packets and activation decay.
//!
//! The simulation is advanced once per frame tick by the owner's frame loop.
//! It only changes while running; `run()` spawns one packet per edge and
//! `reset()` returns to the idle state.
//!
//! ```text
//!   Idle --run()--> Running --reset()--> Idle
//! ```
//!
//! Running does not end on its own when the last packet arrives.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::Deserialize;
use std::collections::HashMap;

use super::geometry::{Point, lerp};
use super::types::{Edge, Node, NodeId, Packet, Topology};

/// Progress slack absorbing floating point drift when summing speeds.
const ARRIVAL_EPSILON: f64 = 1e-9;

/// How a packet arrival raises the target node's activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalPolicy {
    /// Add `arrival-increment`, clamped to 1.
    #[default]
    Additive,
    /// Jump straight to 1.
    Saturate,
}

/// Tunables of the packet animation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SimulationParams {
    /// Per-tick activation multiplier in (0, 1).
    pub decay: f64,
    /// Lower bound of the per-packet speed band (progress per tick).
    pub speed_min: f64,
    /// Upper bound of the per-packet speed band.
    pub speed_max: f64,
    /// Activation at or below this value counts as idle.
    pub idle_threshold: f64,
    pub arrival: ArrivalPolicy,
    /// Activation added per arrival under [`ArrivalPolicy::Additive`].
    pub arrival_increment: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            decay: 0.96,
            speed_min: 0.01,
            speed_max: 0.03,
            idle_threshold: 0.1,
            arrival: ArrivalPolicy::default(),
            arrival_increment: 0.3,
        }
    }
}

impl SimulationParams {
    /// Check value ranges. Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(format!("decay must lie in (0, 1), got {}", self.decay));
        }
        if !(self.speed_min > 0.0 && self.speed_min < self.speed_max) {
            return Err(format!("speed band [{}, {}) is invalid", self.speed_min, self.speed_max));
        }
        if !(0.0..1.0).contains(&self.idle_threshold) {
            return Err(format!("idle-threshold must lie in [0, 1), got {}", self.idle_threshold));
        }
        if self.arrival == ArrivalPolicy::Additive && !(self.arrival_increment > 0.0 && self.arrival_increment <= 1.0) {
            return Err(format!("arrival-increment must lie in (0, 1], got {}", self.arrival_increment));
        }
        Ok(())
    }

    /// Activation after one arrival on a node currently at `activation`.
    pub fn arrive(&self, activation: f64) -> f64 {
        match self.arrival {
            ArrivalPolicy::Additive => (activation + self.arrival_increment).clamp(0.0, 1.0),
            ArrivalPolicy::Saturate => 1.0,
        }
    }
}

/// What happened during one `advance()` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Nodes that received a packet this tick (one entry per packet).
    pub arrivals: Vec<NodeId>,
    /// Packets dropped because their target vanished.
    pub dropped: usize,
}

/// Owner of the live graph and the animation state.
pub struct Simulation {
    params: SimulationParams,
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    packets: Vec<Packet>,
    /// Arrival points of the last tick, drawn as a one-frame flash.
    flashes: Vec<Point>,
    running: bool,
    ticks: u64,
}

impl Simulation {
    pub fn new(topology: Topology, params: SimulationParams) -> Self {
        let mut sim = Self {
            params,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            packets: Vec::new(),
            flashes: Vec::new(),
            running: false,
            ticks: 0,
        };
        sim.replace_topology(topology);
        sim
    }

    /// Swap in a freshly generated graph.
    ///
    /// Packets, flashes and the running flag are discarded together with the
    /// old nodes, and every new node starts with zero activation.
    pub fn replace_topology(&mut self, topology: Topology) {
        let Topology { mut nodes, edges } = topology;
        for node in &mut nodes {
            node.activation = 0.0;
        }
        self.index = nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        // Edges are regenerated with their nodes; anything dangling is dropped here.
        self.edges = edges
            .into_iter()
            .filter(|e| self.index.contains_key(&e.source) && self.index.contains_key(&e.target))
            .collect();
        self.nodes = nodes;
        self.packets.clear();
        self.flashes.clear();
        self.running = false;
    }

    /// Start a message-passing batch: one packet per edge.
    ///
    /// Returns the number of packets spawned, or `None` if a batch is already
    /// running (in which case nothing changes).
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.running {
            return None;
        }
        self.running = true;

        let speed = Uniform::new(self.params.speed_min, self.params.speed_max);
        let mut spawned = 0;
        for i in 0..self.edges.len() {
            let edge = self.edges[i];
            if self.spawn_packet(edge.source, edge.target, speed.sample(rng)) {
                spawned += 1;
            }
        }
        log::debug!("Spawned {} packets over {} edges", spawned, self.edges.len());
        Some(spawned)
    }

    /// Spawn a single packet from `source`'s current position towards `target`.
    ///
    /// Returns false when either endpoint is unknown.
    pub fn spawn_packet(&mut self, source: NodeId, target: NodeId, speed: f64) -> bool {
        let (Some(start), true) = (self.position(source), self.index.contains_key(&target)) else {
            return false;
        };
        self.packets.push(Packet {
            start,
            target,
            progress: 0.0,
            speed,
        });
        true
    }

    /// Stop, drop every packet and zero all activation.
    pub fn reset(&mut self) {
        self.running = false;
        self.packets.clear();
        self.flashes.clear();
        for node in &mut self.nodes {
            node.activation = 0.0;
        }
    }

    /// Advance one tick. Does nothing while idle.
    pub fn advance(&mut self) -> TickReport {
        let mut report = TickReport::default();
        self.flashes.clear();
        if !self.running {
            return report;
        }
        self.ticks += 1;

        let params = &self.params;
        let nodes = &mut self.nodes;
        let index = &self.index;
        let flashes = &mut self.flashes;
        self.packets.retain_mut(|packet| {
            packet.progress += packet.speed;
            let Some(&i) = index.get(&packet.target) else {
                report.dropped += 1;
                return false;
            };
            if packet.progress + ARRIVAL_EPSILON >= 1.0 {
                let target = &mut nodes[i];
                target.activation = params.arrive(target.activation);
                flashes.push(target.position);
                report.arrivals.push(target.id);
                return false;
            }
            true
        });

        for node in &mut self.nodes {
            node.activation = (node.activation * self.params.decay).clamp(0.0, 1.0);
        }
        report
    }

    /// Current drawn position of a packet: start blended towards the target's
    /// live position. `None` if the target no longer exists.
    pub fn packet_position(&self, packet: &Packet) -> Option<Point> {
        let target = self.position(packet.target)?;
        Some(lerp(&packet.start, &target, packet.progress.min(1.0)))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    /// Move a node. Unknown ids are ignored.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(&i) = self.index.get(&id) {
            self.nodes[i].position = position;
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn flashes(&self) -> &[Point] {
        &self.flashes
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks advanced while running since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Whether a node's activation counts as "high" for display.
    pub fn is_active(&self, node: &Node) -> bool {
        node.activation > self.params.idle_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::topology::{GeneratorParams, generate};
    use crate::engine::types::LayoutMode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn node(id: NodeId, layer: usize, x: f64, y: f64) -> Node {
        Node {
            id,
            position: Point::new(x, y),
            layer,
            radius: 8.0,
            activation: 0.0,
            value: 0.5,
        }
    }

    fn edge(source: NodeId, target: NodeId) -> Edge {
        Edge { source, target, weight: 0.0 }
    }

    /// Two nodes joined by one edge, already running with no packets.
    fn pair() -> Simulation {
        let topology = Topology {
            nodes: vec![node(0, 0, 0.0, 0.0), node(1, 1, 100.0, 0.0)],
            edges: vec![edge(0, 1)],
        };
        Simulation::new(topology, SimulationParams::default())
    }

    fn generated(seed: u64, mode: LayoutMode) -> Simulation {
        let mut rng = StdRng::seed_from_u64(seed);
        let topology = generate(800.0, 600.0, mode, &GeneratorParams::default(), &mut rng);
        Simulation::new(topology, SimulationParams::default())
    }

    #[test]
    fn run_spawns_one_packet_per_edge_at_progress_zero() {
        let mut sim = generated(11, LayoutMode::Nn);
        let mut rng = StdRng::seed_from_u64(1);
        let edges = sim.edges().len();
        assert!(edges > 0);

        assert_eq!(sim.run(&mut rng), Some(edges));
        assert!(sim.is_running());
        assert_eq!(sim.packets().len(), edges);
        for p in sim.packets() {
            assert_eq!(p.progress, 0.0);
            assert!(p.speed >= 0.01 && p.speed < 0.03);
        }
    }

    #[test]
    fn second_run_without_reset_is_a_no_op() {
        let mut sim = generated(12, LayoutMode::Gnn);
        let mut rng = StdRng::seed_from_u64(2);
        sim.run(&mut rng);
        let count = sim.packets().len();
        assert_eq!(sim.run(&mut rng), None);
        assert_eq!(sim.packets().len(), count);
    }

    #[test]
    fn packet_start_is_frozen_at_spawn() {
        let mut sim = pair();
        let mut rng = StdRng::seed_from_u64(3);
        sim.run(&mut rng);
        sim.set_position(0, Point::new(50.0, 50.0));
        assert_eq!(sim.packets()[0].start, Point::new(0.0, 0.0));
    }

    #[test]
    fn packet_follows_the_live_target_position() {
        let mut sim = pair();
        sim.running = true;
        assert!(sim.spawn_packet(0, 1, 0.25));
        sim.advance();
        assert_eq!(sim.packet_position(&sim.packets()[0]), Some(Point::new(25.0, 0.0)));

        // Dragging the target bends the path towards its new position.
        sim.set_position(1, Point::new(100.0, 100.0));
        assert_eq!(sim.packet_position(&sim.packets()[0]), Some(Point::new(25.0, 25.0)));
    }

    #[test]
    fn packet_arrives_after_ceil_of_inverse_speed_ticks() {
        for speed in [0.01, 0.017, 0.02, 0.025, 0.03, 0.3] {
            let mut sim = pair();
            sim.running = true;
            sim.spawn_packet(0, 1, speed);
            let expected = (1.0 / speed).ceil() as usize;

            let mut ticks = 0;
            while !sim.packets().is_empty() {
                sim.advance();
                ticks += 1;
                assert!(ticks <= 1000);
            }
            assert_eq!(ticks, expected, "speed {}", speed);
        }
    }

    #[test]
    fn packet_at_002_arrives_within_50_ticks_and_activates_target() {
        let mut sim = pair();
        sim.running = true;
        sim.spawn_packet(0, 1, 0.02);

        for _ in 0..49 {
            let report = sim.advance();
            assert!(report.arrivals.is_empty());
        }
        assert_eq!(sim.packets().len(), 1);
        assert!(sim.packets()[0].progress < 1.0);

        let report = sim.advance();
        assert_eq!(report.arrivals, vec![1]);
        assert!(sim.packets().is_empty());
        assert!(sim.node(1).map(|n| n.activation).unwrap_or(0.0) > 0.0);
        assert_eq!(sim.flashes(), &[Point::new(100.0, 0.0)]);

        // The flash only lasts one tick.
        sim.advance();
        assert!(sim.flashes().is_empty());
    }

    #[test]
    fn additive_arrival_then_decay() {
        let mut sim = pair();
        sim.running = true;
        sim.spawn_packet(0, 1, 1.0);
        sim.advance();
        let a = sim.node(1).map(|n| n.activation).unwrap_or(0.0);
        assert!((a - 0.3 * 0.96).abs() < 1e-12);

        sim.advance();
        let b = sim.node(1).map(|n| n.activation).unwrap_or(0.0);
        assert!((b - a * 0.96).abs() < 1e-12);
    }

    #[test]
    fn saturate_policy_hard_sets_activation() {
        let params = SimulationParams {
            arrival: ArrivalPolicy::Saturate,
            ..SimulationParams::default()
        };
        let mut sim = Simulation::new(
            Topology {
                nodes: vec![node(0, 0, 0.0, 0.0), node(1, 1, 10.0, 0.0)],
                edges: vec![edge(0, 1)],
            },
            params,
        );
        sim.running = true;
        sim.spawn_packet(0, 1, 1.0);
        sim.advance();
        assert!((sim.node(1).map(|n| n.activation).unwrap_or(0.0) - 0.96).abs() < 1e-12);
    }

    #[test]
    fn activation_stays_clamped_under_many_arrivals() {
        let mut sim = pair();
        sim.running = true;
        for _ in 0..20 {
            sim.spawn_packet(0, 1, 1.0);
        }
        sim.advance();
        for n in sim.nodes() {
            assert!((0.0..=1.0).contains(&n.activation));
        }
    }

    #[test]
    fn activation_stays_in_unit_range_during_full_run() {
        let mut sim = generated(5, LayoutMode::Gnn);
        let mut rng = StdRng::seed_from_u64(5);
        sim.run(&mut rng);
        for _ in 0..200 {
            sim.advance();
            assert!(sim.nodes().iter().all(|n| (0.0..=1.0).contains(&n.activation)));
        }
        assert!(sim.packets().is_empty());
        // Still running after the batch drained.
        assert!(sim.is_running());
    }

    #[test]
    fn reset_clears_packets_and_activation() {
        let mut sim = generated(6, LayoutMode::Nn);
        let mut rng = StdRng::seed_from_u64(6);
        sim.run(&mut rng);
        for _ in 0..60 {
            sim.advance();
        }
        sim.reset();
        assert!(!sim.is_running());
        assert!(sim.packets().is_empty());
        assert!(sim.nodes().iter().all(|n| n.activation == 0.0));

        // A new batch may start after reset.
        assert!(sim.run(&mut rng).is_some());
    }

    #[test]
    fn advance_is_inert_while_idle() {
        let mut sim = pair();
        sim.spawn_packet(0, 1, 0.5);
        let report = sim.advance();
        assert_eq!(report, TickReport::default());
        assert_eq!(sim.packets()[0].progress, 0.0);
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn replacing_topology_mid_run_discards_everything() {
        let mut sim = generated(8, LayoutMode::Gnn);
        let mut rng = StdRng::seed_from_u64(8);
        sim.run(&mut rng);
        for _ in 0..40 {
            sim.advance();
        }
        let topology = generate(800.0, 600.0, LayoutMode::Nn, &GeneratorParams::default(), &mut rng);
        sim.replace_topology(topology);
        assert!(!sim.is_running());
        assert!(sim.packets().is_empty());
        assert!(sim.nodes().iter().all(|n| n.activation == 0.0));
    }

    #[test]
    fn dangling_edges_and_unknown_targets_are_skipped() {
        let topology = Topology {
            nodes: vec![node(0, 0, 0.0, 0.0)],
            edges: vec![edge(0, 7)],
        };
        let mut sim = Simulation::new(topology, SimulationParams::default());
        assert!(sim.edges().is_empty());
        assert!(!sim.spawn_packet(0, 7, 0.1));

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sim.run(&mut rng), Some(0));
        assert_eq!(sim.advance(), TickReport::default());
    }

    #[test]
    fn empty_graph_runs_without_packets() {
        let mut sim = Simulation::new(Topology::default(), SimulationParams::default());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sim.run(&mut rng), Some(0));
        sim.advance();
        assert!(sim.is_running());
    }

    #[test]
    fn params_validation() {
        assert!(SimulationParams::default().validate().is_ok());
        let bad = SimulationParams {
            decay: 1.0,
            ..SimulationParams::default()
        };
        assert!(bad.validate().is_err());
        let bad = SimulationParams {
            speed_min: 0.05,
            speed_max: 0.03,
            ..SimulationParams::default()
        };
        assert!(bad.validate().is_err());
        let bad = SimulationParams {
            arrival_increment: 0.0,
            ..SimulationParams::default()
        };
        assert!(bad.validate().is_err());
    }
}
