use crate::config::RecommendationConfig;
use crate::graph::{ArtistGraph, NodeIndex, distinct_neighbors};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub node: NodeIndex,
    /// The library artist through which this one was found.
    pub reason: NodeIndex,
    /// How many distinct library artists this one connects to.
    pub library_connections: usize,
}

/// Out-of-library neighbors of your most-played artists, ranked by how many
/// library artists they connect to. Edge weight and type are not considered.
pub fn recommend(graph: &ArtistGraph, config: &RecommendationConfig) -> Vec<Recommendation> {
    let seeds = top_library_artists(graph, config.seed_count);

    let mut collected: FxHashSet<NodeIndex> = FxHashSet::default();
    let mut candidates: Vec<Recommendation> = Vec::new();

    for &seed in &seeds {
        for neighbor in graph.neighbors_of(seed) {
            let index = neighbor.node;
            if graph.node(index).is_owned() || !collected.insert(index) {
                continue;
            }
            candidates.push(Recommendation {
                node: index,
                reason: seed,
                library_connections: count_library_connections(graph, index),
            });
        }
    }

    candidates.sort_by_key(|candidate| Reverse(candidate.library_connections));
    candidates.truncate(config.limit);

    debug!(
        seeds = seeds.len(),
        returned = candidates.len(),
        "recommendations"
    );
    candidates
}

/// Owned artists by song count, highest first; ties keep node order.
pub fn top_library_artists(graph: &ArtistGraph, count: usize) -> Vec<NodeIndex> {
    let mut owned: Vec<NodeIndex> = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_owned())
        .map(|(index, _)| index)
        .collect();

    owned.sort_by_key(|&index| Reverse(graph.node(index).song_count));
    owned.truncate(count);
    owned
}

fn count_library_connections(graph: &ArtistGraph, index: NodeIndex) -> usize {
    distinct_neighbors(graph, index)
        .into_iter()
        .filter(|&neighbor| graph.node(neighbor).is_owned())
        .count()
}
