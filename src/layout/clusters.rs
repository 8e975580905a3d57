use super::vector::{Vec2, fallback_direction};
use super::{Force, ForceContext, LayoutNode};
use crate::graph::NodeIndex;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct ClusterGroup {
    pub cluster: i64,
    pub centroid: Vec2,
    pub members: Vec<NodeIndex>,
}

/// Per-tick centroid cache shared by both cluster forces. Unplaced nodes are
/// left out so a fresh layout is not dragged toward the origin.
#[derive(Debug, Clone, Default)]
pub struct ClusterCentroids {
    groups: Vec<ClusterGroup>,
    by_cluster: FxHashMap<i64, usize>,
}

impl ClusterCentroids {
    pub fn compute(nodes: &[LayoutNode]) -> Self {
        let mut centroids = Self::default();

        for (index, node) in nodes.iter().enumerate() {
            let Some(cluster) = node.cluster else {
                continue;
            };
            if !node.is_placed() {
                continue;
            }

            let slot = *centroids.by_cluster.entry(cluster).or_insert_with(|| {
                centroids.groups.push(ClusterGroup {
                    cluster,
                    centroid: Vec2::ZERO,
                    members: Vec::new(),
                });
                centroids.groups.len() - 1
            });
            let group = &mut centroids.groups[slot];
            group.centroid += node.position;
            group.members.push(index);
        }

        for group in &mut centroids.groups {
            group.centroid /= group.members.len() as f32;
        }

        centroids
    }

    pub fn get(&self, cluster: i64) -> Option<Vec2> {
        self.by_cluster
            .get(&cluster)
            .map(|&slot| self.groups[slot].centroid)
    }

    pub fn groups(&self) -> &[ClusterGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Nudges each clustered node toward its cluster's centroid.
pub struct ClusterCohesion {
    strength: f32,
}

impl ClusterCohesion {
    pub fn new(strength: f32) -> Self {
        Self { strength }
    }
}

impl Force for ClusterCohesion {
    fn name(&self) -> &'static str {
        "cluster-cohesion"
    }

    fn accumulate(&self, context: &ForceContext<'_>, deltas: &mut [Vec2]) {
        let scale = self.strength * context.alpha;

        for group in context.centroids.groups() {
            for &member in &group.members {
                let position = context.nodes[member].position;
                deltas[member] += (group.centroid - position) * scale;
            }
        }
    }
}

/// Pushes whole clusters apart while their centroids sit closer than
/// `threshold`.
pub struct ClusterSeparation {
    strength: f32,
    threshold: f32,
}

impl ClusterSeparation {
    pub fn new(strength: f32, threshold: f32) -> Self {
        Self {
            strength,
            threshold,
        }
    }
}

impl Force for ClusterSeparation {
    fn name(&self) -> &'static str {
        "cluster-separation"
    }

    fn accumulate(&self, context: &ForceContext<'_>, deltas: &mut [Vec2]) {
        let groups = context.centroids.groups();

        for a in 0..groups.len() {
            for b in (a + 1)..groups.len() {
                let mut axis = groups[b].centroid - groups[a].centroid;
                let mut distance = axis.length();
                if distance >= self.threshold {
                    continue;
                }
                if distance == 0.0 {
                    axis = fallback_direction(a, b);
                    distance = 1.0;
                }

                let push = axis
                    * ((self.threshold - distance) / distance * self.strength * context.alpha);
                for &member in &groups[a].members {
                    deltas[member] -= push;
                }
                for &member in &groups[b].members {
                    deltas[member] += push;
                }
            }
        }
    }
}
