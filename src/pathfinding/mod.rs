pub mod bfs;
pub mod utils;

// Re-export the public functions
pub use bfs::bfs_find_path;
pub use utils::{MixPathResult, PathSearch, resolve_artist};

use crate::graph::ArtistGraph;
use tracing::debug;

/// Resolves both names, then runs BFS between them.
pub fn find_mix_path(graph: &ArtistGraph, from_query: &str, to_query: &str) -> MixPathResult {
    let Some(from) = resolve_artist(graph, from_query) else {
        return MixPathResult::ArtistNotFound {
            query: from_query.to_string(),
        };
    };
    let Some(to) = resolve_artist(graph, to_query) else {
        return MixPathResult::ArtistNotFound {
            query: to_query.to_string(),
        };
    };

    let search = bfs_find_path(graph, from, to);
    debug!(
        from = %graph.node(from).name,
        to = %graph.node(to).name,
        visited = search.artists_visited,
        found = search.path.is_some(),
        "mix path search"
    );

    match search.path {
        Some(path) => MixPathResult::Found {
            path,
            artists_visited: search.artists_visited,
            duration_ms: search.duration.as_millis() as u64,
        },
        None => MixPathResult::NoPath {
            from,
            to,
            artists_visited: search.artists_visited,
            duration_ms: search.duration.as_millis() as u64,
        },
    }
}
