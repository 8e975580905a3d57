use crate::graph::{ArtistGraph, NodeIndex};
use crate::string_normalization::{clean_str, name_matches};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PathSearch {
    pub path: Option<Vec<NodeIndex>>,
    pub artists_visited: usize,
    pub duration: Duration,
}

/// Outcome of a name-to-name mix path query. Not finding an artist and not
/// finding a route are reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MixPathResult {
    Found {
        path: Vec<NodeIndex>,
        artists_visited: usize,
        duration_ms: u64,
    },
    ArtistNotFound {
        query: String,
    },
    NoPath {
        from: NodeIndex,
        to: NodeIndex,
        artists_visited: usize,
        duration_ms: u64,
    },
}

impl MixPathResult {
    pub fn path(&self) -> Option<&[NodeIndex]> {
        match self {
            MixPathResult::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Number of transitions in the mix, one less than the artist count.
    pub fn step_count(&self) -> Option<usize> {
        self.path().map(|path| path.len().saturating_sub(1))
    }
}

/// First artist, in node order, whose normalized name contains the query.
pub fn resolve_artist(graph: &ArtistGraph, query: &str) -> Option<NodeIndex> {
    let normalized_query = clean_str(query);
    graph
        .nodes()
        .iter()
        .position(|node| name_matches(&node.name, &normalized_query))
}

pub fn reconstruct_path(
    parent_map: &FxHashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut current_node = target;

    while current_node != start {
        path.push(current_node);
        current_node = parent_map[&current_node];
    }

    path.push(start);
    path.reverse();
    path
}
