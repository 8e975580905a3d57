//! Force-directed layout for the artist graph.
//!
//! The [`Simulation`] owns every node's position and velocity. Forces only
//! read the tick-start state and write velocity deltas; the simulation sums
//! them, applies velocity decay, and moves the nodes. `alpha` cools toward
//! `alpha_target` on every tick and scales every force, so the layout damps
//! out instead of converging to an exact fixed point.

mod clusters;
mod forces;
mod quadtree;
pub mod vector;

pub use clusters::{ClusterCentroids, ClusterCohesion, ClusterGroup, ClusterSeparation};
pub use forces::{CenterForce, CollideForce, LinkForce, ManyBodyForce};
pub use vector::{UNPLACED, Vec2, vec2};

use crate::config::LayoutConfig;
use crate::graph::{ArtistGraph, NodeIndex};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

const INITIAL_RADIUS: f32 = 10.0;

/// Mutable per-node state owned by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutNode {
    pub position: Vec2,
    pub velocity: Vec2,
    pub pinned: Option<Vec2>,
    pub cluster: Option<i64>,
    pub radius: f32,
}

impl LayoutNode {
    pub fn unplaced(cluster: Option<i64>, radius: f32) -> Self {
        Self {
            position: UNPLACED,
            velocity: Vec2::ZERO,
            pinned: None,
            cluster,
            radius,
        }
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            pinned: None,
            cluster: None,
            radius: 1.0,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_finite()
    }
}

/// Read-only inputs handed to every force on a tick.
pub struct ForceContext<'a> {
    pub nodes: &'a [LayoutNode],
    pub alpha: f32,
    pub centroids: &'a ClusterCentroids,
}

pub trait Force {
    fn name(&self) -> &'static str;

    /// Adds this force's velocity change for each node into `deltas`.
    fn accumulate(&self, context: &ForceContext<'_>, deltas: &mut [Vec2]);
}

pub struct Simulation {
    nodes: Vec<LayoutNode>,
    forces: Vec<Box<dyn Force>>,
    deltas: Vec<Vec2>,
    alpha: f32,
    alpha_min: f32,
    alpha_target: f32,
    alpha_decay: f32,
    velocity_decay: f32,
    ticks: u64,
}

impl Simulation {
    /// Builds the standard force stack for `graph` and seeds every node on
    /// the spiral.
    pub fn new(graph: &ArtistGraph, config: &LayoutConfig) -> Self {
        let nodes: Vec<LayoutNode> = graph
            .nodes()
            .iter()
            .map(|node| LayoutNode::unplaced(node.cluster, node_radius(node.song_count, config)))
            .collect();

        let mut simulation = Self::with_nodes(nodes, config);
        simulation.forces = standard_forces(graph, config);
        simulation.place_unplaced();
        simulation
    }

    /// A bare simulation with no forces, for driving custom force stacks.
    pub fn with_nodes(nodes: Vec<LayoutNode>, config: &LayoutConfig) -> Self {
        let deltas = vec![Vec2::ZERO; nodes.len()];
        Self {
            nodes,
            forces: Vec::new(),
            deltas,
            alpha: 1.0,
            alpha_min: config.alpha_min,
            alpha_target: config.alpha_target,
            alpha_decay: config.alpha_decay(),
            velocity_decay: config.velocity_decay,
            ticks: 0,
        }
    }

    /// Swaps in new force settings and reheats. Positions, velocities and
    /// pins survive; `graph` must be the graph this simulation was built for.
    pub fn set_config(&mut self, graph: &ArtistGraph, config: &LayoutConfig) {
        self.alpha_min = config.alpha_min;
        self.alpha_target = config.alpha_target;
        self.alpha_decay = config.alpha_decay();
        self.velocity_decay = config.velocity_decay;
        self.forces = standard_forces(graph, config);
        for (layout, node) in self.nodes.iter_mut().zip(graph.nodes()) {
            layout.radius = node_radius(node.song_count, config);
        }
        self.restart();
    }

    pub fn add_force(&mut self, force: Box<dyn Force>) {
        self.forces.push(force);
    }

    pub fn force_names(&self) -> Vec<&'static str> {
        self.forces.iter().map(|force| force.name()).collect()
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn position(&self, index: NodeIndex) -> Option<Vec2> {
        self.nodes.get(index).map(|node| node.position)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cooled below `alpha_min`. Ticking still moves nodes afterwards.
    pub fn is_settled(&self) -> bool {
        self.alpha < self.alpha_min
    }

    pub fn restart(&mut self) {
        self.alpha = 1.0;
        debug!(nodes = self.nodes.len(), "layout restarted");
    }

    pub fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    pub fn pin(&mut self, index: NodeIndex, position: Vec2) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                node.pinned = Some(position);
                node.position = position;
                node.velocity = Vec2::ZERO;
                true
            }
            None => false,
        }
    }

    pub fn unpin(&mut self, index: NodeIndex) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                node.pinned = None;
                true
            }
            None => false,
        }
    }

    /// Keeps positions of ids present in both graphs so a reload does not
    /// scatter nodes the user already knows where to find.
    pub fn carry_positions_from(
        &mut self,
        previous: &Simulation,
        previous_graph: &ArtistGraph,
        graph: &ArtistGraph,
    ) {
        let old_positions: FxHashMap<&str, Vec2> = previous_graph
            .nodes()
            .iter()
            .zip(previous.nodes())
            .filter(|(_, layout)| layout.is_placed())
            .map(|(node, layout)| (node.id.as_str(), layout.position))
            .collect();

        for (node, layout) in graph.nodes().iter().zip(self.nodes.iter_mut()) {
            if let Some(&position) = old_positions.get(node.id.as_str()) {
                layout.position = position;
            }
        }
    }

    pub fn tick(&mut self) {
        self.place_unplaced();
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        let centroids = ClusterCentroids::compute(&self.nodes);
        self.deltas.clear();
        self.deltas.resize(self.nodes.len(), Vec2::ZERO);

        let context = ForceContext {
            nodes: &self.nodes,
            alpha: self.alpha,
            centroids: &centroids,
        };
        for force in &self.forces {
            force.accumulate(&context, &mut self.deltas);
        }

        let retain = 1.0 - self.velocity_decay;
        for (node, delta) in self.nodes.iter_mut().zip(&self.deltas) {
            match node.pinned {
                Some(pin) => {
                    node.position = pin;
                    node.velocity = Vec2::ZERO;
                }
                None => {
                    node.velocity = (node.velocity + *delta) * retain;
                    node.position += node.velocity;
                }
            }
        }

        self.ticks += 1;
    }

    pub fn tick_n(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Phyllotaxis spiral, same seeding as d3-force.
    fn place_unplaced(&mut self) {
        let angle_step = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if node.is_placed() {
                continue;
            }
            let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
            let angle = index as f32 * angle_step;
            node.position = vec2(radius * angle.cos(), radius * angle.sin());
            node.velocity = Vec2::ZERO;
        }
    }
}

fn node_radius(song_count: u32, config: &LayoutConfig) -> f32 {
    config.node_radius_base + config.node_radius_scale * (song_count as f32).sqrt()
}

fn standard_forces(graph: &ArtistGraph, config: &LayoutConfig) -> Vec<Box<dyn Force>> {
    vec![
        Box::new(LinkForce::new(graph, config.link_distance)),
        Box::new(ManyBodyForce::new(
            config.charge_strength,
            config.charge_distance_min,
            config.charge_distance_max,
            config.theta,
        )),
        Box::new(CenterForce::new(
            vec2(config.center_x, config.center_y),
            config.center_strength,
        )),
        Box::new(CollideForce::new(config.collide_padding, config.collide_strength)),
        Box::new(ClusterCohesion::new(config.cluster_cohesion)),
        Box::new(ClusterSeparation::new(
            config.cluster_separation,
            config.separation_threshold,
        )),
    ]
}
