pub mod model;
pub mod stats;

pub use model::{Cluster, DEFAULT_GENRE, Link, LinkKind, Node, Snapshot, Song};
pub use stats::GraphStats;

use crate::error::{Endpoint, LoadError};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

pub type NodeIndex = usize;

/// A link with both endpoints resolved to node indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub weight: f32,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: NodeIndex,
    pub kind: LinkKind,
    pub weight: f32,
}

/// Validated, immutable view of one snapshot with its adjacency prebuilt.
#[derive(Debug, Clone)]
pub struct ArtistGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    clusters: Vec<Cluster>,
    index: FxHashMap<String, NodeIndex>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl ArtistGraph {
    pub fn load(snapshot: Snapshot) -> Result<Self, LoadError> {
        let Snapshot {
            mut nodes,
            links,
            clusters,
            ..
        } = snapshot;

        let index = build_node_index(&nodes)?;
        let edges = resolve_links(&links, &index)?;
        let clusters = clusters.unwrap_or_default();
        assign_cluster_members(&mut nodes, &clusters, &index)?;
        let adjacency = build_adjacency(nodes.len(), &edges);

        info!(
            nodes = nodes.len(),
            links = edges.len(),
            clusters = clusters.len(),
            "loaded artist graph"
        );

        Ok(Self {
            nodes,
            edges,
            clusters,
            index,
            adjacency,
        })
    }

    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
            index: FxHashMap::default(),
            adjacency: Vec::new(),
        }
    }

    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Neighbors in edge-list order, whichever side of the link the node is on.
    pub fn neighbors_of(&self, index: NodeIndex) -> &[Neighbor] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn degree(&self, index: NodeIndex) -> usize {
        self.neighbors_of(index).len()
    }

    pub fn ids(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter().map(|&i| self.nodes[i].id.clone()).collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::from_graph(self)
    }

    /// Node count per genre, largest first.
    pub fn genre_distribution(&self) -> Vec<(String, usize)> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();

        for node in &self.nodes {
            let genre = node.genre();
            let count = counts.entry(genre).or_insert(0);
            if *count == 0 {
                order.push(genre.to_string());
            }
            *count += 1;
        }

        let mut distribution: Vec<(String, usize)> = order
            .into_iter()
            .map(|genre| {
                let count = counts[genre.as_str()];
                (genre, count)
            })
            .collect();
        distribution.sort_by(|a, b| b.1.cmp(&a.1));
        distribution
    }
}

fn build_node_index(nodes: &[Node]) -> Result<FxHashMap<String, NodeIndex>, LoadError> {
    let mut index = FxHashMap::with_capacity_and_hasher(nodes.len(), Default::default());

    for (position, node) in nodes.iter().enumerate() {
        if index.insert(node.id.clone(), position).is_some() {
            return Err(LoadError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    Ok(index)
}

fn resolve_links(
    links: &[Link],
    index: &FxHashMap<String, NodeIndex>,
) -> Result<Vec<Edge>, LoadError> {
    links
        .iter()
        .enumerate()
        .map(|(position, link)| {
            let source = resolve_endpoint(index, position, &link.source, Endpoint::Source)?;
            let target = resolve_endpoint(index, position, &link.target, Endpoint::Target)?;

            if !link.weight.is_finite() || link.weight <= 0.0 {
                return Err(LoadError::InvalidWeight {
                    link: position,
                    weight: link.weight,
                });
            }

            Ok(Edge {
                source,
                target,
                weight: link.weight,
                kind: link.kind,
            })
        })
        .collect()
}

fn resolve_endpoint(
    index: &FxHashMap<String, NodeIndex>,
    link: usize,
    id: &str,
    endpoint: Endpoint,
) -> Result<NodeIndex, LoadError> {
    index
        .get(id)
        .copied()
        .ok_or_else(|| LoadError::DanglingLink {
            link,
            endpoint,
            id: id.to_string(),
        })
}

fn assign_cluster_members(
    nodes: &mut [Node],
    clusters: &[Cluster],
    index: &FxHashMap<String, NodeIndex>,
) -> Result<(), LoadError> {
    for cluster in clusters {
        for member in &cluster.members {
            let position = index
                .get(member)
                .copied()
                .ok_or_else(|| LoadError::UnknownClusterMember {
                    cluster: cluster.id,
                    id: member.clone(),
                })?;

            let node = &mut nodes[position];
            if node.cluster.is_none() {
                node.cluster = Some(cluster.id);
            }
        }
    }

    Ok(())
}

fn build_adjacency(node_count: usize, edges: &[Edge]) -> Vec<Vec<Neighbor>> {
    let mut adjacency = vec![Vec::new(); node_count];

    for edge in edges {
        adjacency[edge.source].push(Neighbor {
            node: edge.target,
            kind: edge.kind,
            weight: edge.weight,
        });
        if edge.source != edge.target {
            adjacency[edge.target].push(Neighbor {
                node: edge.source,
                kind: edge.kind,
                weight: edge.weight,
            });
        }
    }

    adjacency
}

/// Distinct neighbor indices, first occurrence order.
pub(crate) fn distinct_neighbors(graph: &ArtistGraph, index: NodeIndex) -> Vec<NodeIndex> {
    let mut seen = FxHashSet::default();
    graph
        .neighbors_of(index)
        .iter()
        .map(|neighbor| neighbor.node)
        .filter(|&node| node != index && seen.insert(node))
        .collect()
}
