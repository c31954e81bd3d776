//! Pointer interaction: node picking, selection and dragging.
//!
//! Selection survives pointer release and `reset()`; it only changes when a
//! different node is picked or the topology is regenerated.

use super::geometry::{Point, within};
use super::simulation::Simulation;
use super::types::NodeId;

/// Extra pick distance added to a node's radius.
pub const PICK_SLACK: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    selected: Option<NodeId>,
    dragging: Option<NodeId>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit-test at `point`. A hit selects the node and starts a drag.
    ///
    /// Returns the picked node id, `None` for a miss (selection unchanged).
    pub fn pointer_down(&mut self, sim: &Simulation, point: Point) -> Option<NodeId> {
        let picked = pick(sim, point)?;
        self.selected = Some(picked);
        self.dragging = Some(picked);
        Some(picked)
    }

    /// Move the held node to the pointer, if a drag is in progress.
    pub fn pointer_move(&mut self, sim: &mut Simulation, point: Point) {
        if let Some(id) = self.dragging {
            sim.set_position(id, point);
        }
    }

    /// Pointer released or left the surface.
    pub fn release(&mut self) {
        self.dragging = None;
    }

    /// Forget selection and drag (the nodes they referenced are gone).
    pub fn clear(&mut self) {
        self.selected = None;
        self.dragging = None;
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn dragging(&self) -> Option<NodeId> {
        self.dragging
    }
}

/// First node (in node order) whose pick circle contains `point`.
pub fn pick(sim: &Simulation, point: Point) -> Option<NodeId> {
    sim.nodes()
        .iter()
        .find(|n| within(&point, &n.position, n.radius + PICK_SLACK))
        .map(|n| n.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simulation::SimulationParams;
    use crate::engine::types::{Edge, Node, Topology};

    fn sim() -> Simulation {
        let nodes = vec![
            Node {
                id: 0,
                position: Point::new(100.0, 100.0),
                layer: 0,
                radius: 8.0,
                activation: 0.0,
                value: 0.1,
            },
            Node {
                id: 1,
                position: Point::new(300.0, 100.0),
                layer: 1,
                radius: 6.0,
                activation: 0.0,
                value: 0.2,
            },
        ];
        let edges = vec![Edge {
            source: 0,
            target: 1,
            weight: 0.5,
        }];
        Simulation::new(Topology { nodes, edges }, SimulationParams::default())
    }

    #[test]
    fn pick_uses_radius_plus_slack() {
        let s = sim();
        assert_eq!(pick(&s, Point::new(118.0, 100.0)), Some(0));
        assert_eq!(pick(&s, Point::new(118.5, 100.0)), None);
        assert_eq!(pick(&s, Point::new(300.0, 116.0)), Some(1));
    }

    #[test]
    fn drag_moves_node_until_release() {
        let mut s = sim();
        let mut i = Interaction::new();
        assert_eq!(i.pointer_down(&s, Point::new(102.0, 98.0)), Some(0));
        assert_eq!(i.dragging(), Some(0));

        i.pointer_move(&mut s, Point::new(150.0, 200.0));
        assert_eq!(s.position(0), Some(Point::new(150.0, 200.0)));

        i.release();
        i.pointer_move(&mut s, Point::new(10.0, 10.0));
        assert_eq!(s.position(0), Some(Point::new(150.0, 200.0)));
        assert_eq!(i.selected(), Some(0));
    }

    #[test]
    fn miss_keeps_previous_selection() {
        let s = sim();
        let mut i = Interaction::new();
        i.pointer_down(&s, Point::new(300.0, 100.0));
        i.release();
        assert_eq!(i.pointer_down(&s, Point::new(700.0, 500.0)), None);
        assert_eq!(i.selected(), Some(1));
        assert_eq!(i.dragging(), None);
    }

    #[test]
    fn picking_another_node_moves_selection() {
        let s = sim();
        let mut i = Interaction::new();
        i.pointer_down(&s, Point::new(100.0, 100.0));
        i.release();
        i.pointer_down(&s, Point::new(300.0, 100.0));
        assert_eq!(i.selected(), Some(1));
    }

    #[test]
    fn move_without_drag_does_nothing() {
        let mut s = sim();
        let mut i = Interaction::new();
        i.pointer_move(&mut s, Point::new(1.0, 1.0));
        assert_eq!(s.position(0), Some(Point::new(100.0, 100.0)));
    }
}
