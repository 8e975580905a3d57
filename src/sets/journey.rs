use super::{SetEntry, pick_top, top_unused_of_genre};
use crate::config::SetBuilderConfig;
use crate::graph::{ArtistGraph, NodeIndex};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Greedy walk from the genre's top artist along connections, preferring
/// neighbors whose genre the walk has not played yet.
pub fn build_genre_journey(
    graph: &ArtistGraph,
    start_genre: &str,
    config: &SetBuilderConfig,
) -> Vec<SetEntry> {
    let mut used: FxHashSet<NodeIndex> = FxHashSet::default();
    let Some(start) = top_unused_of_genre(graph, start_genre, &used) else {
        return Vec::new();
    };

    let mut visited_genres: FxHashSet<&str> = FxHashSet::default();
    let mut set = vec![SetEntry::from_node(graph, start)];
    used.insert(start);
    visited_genres.insert(graph.node(start).genre());

    let mut current = start;
    while set.len() < config.max_set_len {
        let Some(next) = next_step(graph, current, &used, &visited_genres) else {
            break;
        };

        used.insert(next);
        visited_genres.insert(graph.node(next).genre());
        set.push(SetEntry::from_node(graph, next));
        current = next;
    }

    debug!(start_genre, len = set.len(), "genre journey");
    set
}

fn next_step(
    graph: &ArtistGraph,
    current: NodeIndex,
    used: &FxHashSet<NodeIndex>,
    visited_genres: &FxHashSet<&str>,
) -> Option<NodeIndex> {
    let candidates: Vec<NodeIndex> = graph
        .neighbors_of(current)
        .iter()
        .map(|neighbor| neighbor.node)
        .filter(|index| {
            let node = graph.node(*index);
            !used.contains(index) && node.genre.is_some() && node.song_count > 0
        })
        .collect();

    let fresh: Vec<NodeIndex> = candidates
        .iter()
        .copied()
        .filter(|&index| !visited_genres.contains(graph.node(index).genre()))
        .collect();

    let pool = if fresh.is_empty() { candidates } else { fresh };
    pick_top(graph, pool.into_iter())
}
