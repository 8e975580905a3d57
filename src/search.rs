use crate::graph::{ArtistGraph, NodeIndex};
use crate::string_normalization::{clean_str, name_matches};

pub fn search_artists(graph: &ArtistGraph, query: &str, limit: usize) -> Vec<NodeIndex> {
    if query.trim().is_empty() {
        return vec![];
    }

    let mut results = filter_artists_by_query(graph, query);
    sort_results_by_relevance(graph, &mut results, query);
    results.truncate(limit);
    results
}

pub fn filter_artists_by_query(graph: &ArtistGraph, query: &str) -> Vec<NodeIndex> {
    let normalized_query = clean_str(query);

    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| name_matches(&node.name, &normalized_query))
        .map(|(index, _)| index)
        .collect()
}

/// Prefix matches first, then shorter names. Stable, so equal names keep
/// node order.
pub fn sort_results_by_relevance(graph: &ArtistGraph, results: &mut [NodeIndex], query: &str) {
    let normalized_query = clean_str(query);

    results.sort_by(|&a, &b| {
        let a_name = &graph.node(a).name;
        let b_name = &graph.node(b).name;

        let a_starts = clean_str(a_name).starts_with(&normalized_query);
        let b_starts = clean_str(b_name).starts_with(&normalized_query);

        match (a_starts, b_starts) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a_name.len().cmp(&b_name.len()),
        }
    });
}
