//! Bridge artists: nodes whose direct neighbors span several genres other
//! than their own.
//!
//! This is a local, degree-based score. It is not a graph-theoretic bridge
//! or cut vertex, and no betweenness is computed.

use crate::graph::{ArtistGraph, DEFAULT_GENRE, NodeIndex};
use serde::Serialize;
use tracing::debug;

/// Minimum number of foreign genres a node must touch to count as a bridge.
pub const MIN_FOREIGN_GENRES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeArtist {
    pub node: NodeIndex,
    pub score: usize,
    /// Foreign genres in the order they were first seen among neighbors.
    pub genres: Vec<String>,
}

pub fn foreign_genres(graph: &ArtistGraph, index: NodeIndex) -> Vec<String> {
    let own_genre = graph.node(index).genre();
    let mut genres: Vec<String> = Vec::new();

    for neighbor in graph.neighbors_of(index) {
        let genre = graph.node(neighbor.node).genre();
        if genre == own_genre || genre == DEFAULT_GENRE {
            continue;
        }
        if !genres.iter().any(|seen| seen == genre) {
            genres.push(genre.to_string());
        }
    }

    genres
}

/// Qualifying nodes, highest score first; equal scores keep node order.
pub fn find_bridges(graph: &ArtistGraph) -> Vec<BridgeArtist> {
    let mut bridges: Vec<BridgeArtist> = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.has_known_genre())
        .filter_map(|(index, _)| {
            let genres = foreign_genres(graph, index);
            (genres.len() >= MIN_FOREIGN_GENRES).then(|| BridgeArtist {
                node: index,
                score: genres.len(),
                genres,
            })
        })
        .collect();

    bridges.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(count = bridges.len(), "bridge scan");
    bridges
}
