use super::quadtree::QuadNode;
use super::vector::{Vec2, fallback_direction};
use super::{Force, ForceContext};
use crate::graph::{ArtistGraph, NodeIndex};

const COINCIDENT_EPSILON: f32 = 1e-6;

fn separation(a: NodeIndex, b: NodeIndex) -> Vec2 {
    if a < b {
        fallback_direction(a, b) * COINCIDENT_EPSILON
    } else {
        -fallback_direction(b, a) * COINCIDENT_EPSILON
    }
}

struct SpringLink {
    source: NodeIndex,
    target: NodeIndex,
    strength: f32,
    bias: f32,
}

/// Springs every link toward `distance`. Links touching low-degree nodes are
/// stiffer, and the correction is split so the busier endpoint moves less.
pub struct LinkForce {
    links: Vec<SpringLink>,
    distance: f32,
}

impl LinkForce {
    pub fn new(graph: &ArtistGraph, distance: f32) -> Self {
        let pairs: Vec<(NodeIndex, NodeIndex)> = graph
            .edges()
            .iter()
            .filter(|edge| edge.source != edge.target)
            .map(|edge| (edge.source, edge.target))
            .collect();
        Self::from_pairs(graph.len(), &pairs, distance)
    }

    pub fn from_pairs(node_count: usize, pairs: &[(NodeIndex, NodeIndex)], distance: f32) -> Self {
        let mut degree = vec![0usize; node_count];
        for &(source, target) in pairs {
            degree[source] += 1;
            degree[target] += 1;
        }

        let links = pairs
            .iter()
            .map(|&(source, target)| {
                let (ds, dt) = (degree[source] as f32, degree[target] as f32);
                SpringLink {
                    source,
                    target,
                    strength: 1.0 / ds.min(dt),
                    bias: ds / (ds + dt),
                }
            })
            .collect();

        Self { links, distance }
    }
}

impl Force for LinkForce {
    fn name(&self) -> &'static str {
        "link"
    }

    fn accumulate(&self, context: &ForceContext<'_>, deltas: &mut [Vec2]) {
        let nodes = context.nodes;

        for link in &self.links {
            let source = &nodes[link.source];
            let target = &nodes[link.target];
            if !source.is_placed() || !target.is_placed() {
                continue;
            }

            let mut delta =
                (target.position + target.velocity) - (source.position + source.velocity);
            let mut length = delta.length();
            if length <= COINCIDENT_EPSILON {
                delta = separation(link.source, link.target);
                length = delta.length();
            }

            let scale = (length - self.distance) / length * context.alpha * link.strength;
            let pull = delta * scale;
            deltas[link.target] -= pull * link.bias;
            deltas[link.source] += pull * (1.0 - link.bias);
        }
    }
}

/// N-body charge with a Barnes-Hut approximation. Negative strength repels.
pub struct ManyBodyForce {
    strength: f32,
    distance_min_sq: f32,
    distance_max_sq: f32,
    theta_sq: f32,
}

impl ManyBodyForce {
    pub fn new(strength: f32, distance_min: f32, distance_max: Option<f32>, theta: f32) -> Self {
        Self {
            strength,
            distance_min_sq: distance_min * distance_min,
            distance_max_sq: distance_max.map_or(f32::INFINITY, |max| max * max),
            theta_sq: theta * theta,
        }
    }

    fn charge(&self, offset: Vec2, charge: f32, alpha: f32) -> Vec2 {
        let mut distance_sq = offset.length_sq();
        if distance_sq < self.distance_min_sq {
            distance_sq = (self.distance_min_sq * distance_sq).sqrt();
        }
        offset * (charge * alpha / distance_sq)
    }

    fn accumulate_for_node(
        &self,
        cell: &QuadNode,
        index: NodeIndex,
        positions: &[Vec2],
        alpha: f32,
        delta: &mut Vec2,
    ) {
        if cell.mass <= 0.0 {
            return;
        }

        let point = positions[index];

        if cell.is_leaf() {
            for &other in &cell.indices {
                if other == index {
                    continue;
                }
                let mut offset = positions[other] - point;
                if offset.length_sq() <= COINCIDENT_EPSILON * COINCIDENT_EPSILON {
                    offset = separation(other, index);
                }
                if offset.length_sq() >= self.distance_max_sq {
                    continue;
                }
                *delta += self.charge(offset, self.strength, alpha);
            }
            return;
        }

        let offset = cell.center_of_mass - point;
        let distance_sq = offset.length_sq();
        let width = cell.bounds.side_length();
        if width * width / self.theta_sq < distance_sq {
            if distance_sq < self.distance_max_sq {
                *delta += self.charge(offset, self.strength * cell.mass, alpha);
            }
            return;
        }

        for child in cell.children.iter().flatten() {
            self.accumulate_for_node(child, index, positions, alpha, delta);
        }
    }
}

impl Force for ManyBodyForce {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn accumulate(&self, context: &ForceContext<'_>, deltas: &mut [Vec2]) {
        let positions: Vec<Vec2> = context.nodes.iter().map(|node| node.position).collect();
        let Some(tree) = QuadNode::build(&positions) else {
            return;
        };

        for (index, delta) in deltas.iter_mut().enumerate() {
            if !positions[index].is_finite() {
                continue;
            }
            self.accumulate_for_node(&tree, index, &positions, context.alpha, delta);
        }
    }
}

/// Drifts the whole layout so its mean position moves toward `center`.
pub struct CenterForce {
    center: Vec2,
    strength: f32,
}

impl CenterForce {
    pub fn new(center: Vec2, strength: f32) -> Self {
        Self { center, strength }
    }
}

impl Force for CenterForce {
    fn name(&self) -> &'static str {
        "center"
    }

    fn accumulate(&self, context: &ForceContext<'_>, deltas: &mut [Vec2]) {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;
        for node in context.nodes.iter().filter(|node| node.is_placed()) {
            sum += node.position;
            count += 1;
        }
        if count == 0 {
            return;
        }

        let shift = (sum / count as f32 - self.center) * self.strength;
        for (node, delta) in context.nodes.iter().zip(deltas.iter_mut()) {
            if node.is_placed() {
                *delta -= shift;
            }
        }
    }
}

/// Pushes overlapping circles apart; larger nodes give way less.
pub struct CollideForce {
    padding: f32,
    strength: f32,
}

impl CollideForce {
    pub fn new(padding: f32, strength: f32) -> Self {
        Self { padding, strength }
    }
}

impl Force for CollideForce {
    fn name(&self) -> &'static str {
        "collide"
    }

    fn accumulate(&self, context: &ForceContext<'_>, deltas: &mut [Vec2]) {
        let nodes = context.nodes;

        for i in 0..nodes.len() {
            if !nodes[i].is_placed() {
                continue;
            }
            let radius_i = nodes[i].radius + self.padding;
            let predicted_i = nodes[i].position + nodes[i].velocity;

            for j in (i + 1)..nodes.len() {
                if !nodes[j].is_placed() {
                    continue;
                }
                let radius_j = nodes[j].radius + self.padding;
                let min_distance = radius_i + radius_j;

                let mut offset = predicted_i - (nodes[j].position + nodes[j].velocity);
                let mut distance = offset.length();
                if distance >= min_distance {
                    continue;
                }
                if distance <= COINCIDENT_EPSILON {
                    offset = separation(j, i);
                    distance = offset.length();
                }

                let push = offset * ((min_distance - distance) / distance * self.strength);
                let weight_i = radius_i * radius_i;
                let weight_j = radius_j * radius_j;
                let share = weight_j / (weight_i + weight_j);
                deltas[i] += push * share;
                deltas[j] -= push * (1.0 - share);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::vector::vec2;
    use crate::layout::{ClusterCentroids, LayoutNode};

    fn run(force: &dyn Force, nodes: &[LayoutNode], alpha: f32) -> Vec<Vec2> {
        let centroids = ClusterCentroids::compute(nodes);
        let context = ForceContext {
            nodes,
            alpha,
            centroids: &centroids,
        };
        let mut deltas = vec![Vec2::ZERO; nodes.len()];
        force.accumulate(&context, &mut deltas);
        deltas
    }

    #[test]
    fn test_link_pulls_distant_pair_together() {
        let nodes = [LayoutNode::at(vec2(0.0, 0.0)), LayoutNode::at(vec2(200.0, 0.0))];
        let force = LinkForce::from_pairs(2, &[(0, 1)], 50.0);
        let deltas = run(&force, &nodes, 1.0);

        assert!(deltas[0].x > 0.0);
        assert!(deltas[1].x < 0.0);
        assert!((deltas[0].x + deltas[1].x).abs() < 1e-4);
    }

    #[test]
    fn test_link_pushes_close_pair_apart() {
        let nodes = [LayoutNode::at(vec2(0.0, 0.0)), LayoutNode::at(vec2(10.0, 0.0))];
        let force = LinkForce::from_pairs(2, &[(0, 1)], 50.0);
        let deltas = run(&force, &nodes, 1.0);

        assert!(deltas[0].x < 0.0);
        assert!(deltas[1].x > 0.0);
    }

    #[test]
    fn test_negative_charge_repels() {
        let nodes = [LayoutNode::at(vec2(-5.0, 0.0)), LayoutNode::at(vec2(5.0, 0.0))];
        let force = ManyBodyForce::new(-30.0, 1.0, None, 0.9);
        let deltas = run(&force, &nodes, 1.0);

        assert!(deltas[0].x < 0.0);
        assert!(deltas[1].x > 0.0);
    }

    #[test]
    fn test_charge_ignores_pairs_beyond_max_distance() {
        let nodes = [LayoutNode::at(vec2(0.0, 0.0)), LayoutNode::at(vec2(500.0, 0.0))];
        let force = ManyBodyForce::new(-30.0, 1.0, Some(100.0), 0.9);
        let deltas = run(&force, &nodes, 1.0);

        assert_eq!(deltas[0], Vec2::ZERO);
        assert_eq!(deltas[1], Vec2::ZERO);
    }

    #[test]
    fn test_coincident_nodes_still_separate() {
        let nodes = [LayoutNode::at(vec2(3.0, 3.0)), LayoutNode::at(vec2(3.0, 3.0))];
        let force = ManyBodyForce::new(-30.0, 1.0, None, 0.9);
        let deltas = run(&force, &nodes, 1.0);

        assert!(deltas[0].is_finite() && deltas[1].is_finite());
        assert!(deltas[0].length() > 0.0);
        assert!(deltas[0].dot(deltas[1]) < 0.0);
    }

    #[test]
    fn test_center_shifts_mean_toward_origin() {
        let nodes = [LayoutNode::at(vec2(90.0, 10.0)), LayoutNode::at(vec2(110.0, 10.0))];
        let force = CenterForce::new(Vec2::ZERO, 0.5);
        let deltas = run(&force, &nodes, 1.0);

        assert_eq!(deltas[0], vec2(-50.0, -5.0));
        assert_eq!(deltas[1], vec2(-50.0, -5.0));
    }

    #[test]
    fn test_collide_only_touches_overlapping_nodes() {
        let mut near = LayoutNode::at(vec2(0.0, 0.0));
        near.radius = 5.0;
        let mut overlapping = LayoutNode::at(vec2(4.0, 0.0));
        overlapping.radius = 5.0;
        let mut far = LayoutNode::at(vec2(100.0, 0.0));
        far.radius = 5.0;

        let force = CollideForce::new(0.0, 1.0);
        let deltas = run(&force, &[near, overlapping, far], 1.0);

        assert!(deltas[0].x < 0.0);
        assert!(deltas[1].x > 0.0);
        assert_eq!(deltas[2], Vec2::ZERO);
    }
}
