use super::{EnergyDirection, SetEntry, top_unused_of_genre};
use crate::config::SetBuilderConfig;
use crate::graph::ArtistGraph;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Genres visited from `start_genre` along the energy ladder: upward runs to
/// the top of the ladder, downward walks back to its bottom.
pub fn ladder_sequence<'a>(
    ladder: &'a [String],
    start_genre: &str,
    direction: EnergyDirection,
) -> Vec<&'a str> {
    let Some(start) = ladder.iter().position(|genre| genre == start_genre) else {
        return Vec::new();
    };

    match direction {
        EnergyDirection::Up => ladder[start..].iter().map(String::as_str).collect(),
        EnergyDirection::Down => ladder[..=start].iter().rev().map(String::as_str).collect(),
    }
}

/// One top artist per genre along the ladder, skipping genres with no
/// candidates.
pub fn build_energy_set(
    graph: &ArtistGraph,
    start_genre: &str,
    direction: EnergyDirection,
    config: &SetBuilderConfig,
) -> Vec<SetEntry> {
    let mut used = FxHashSet::default();
    let mut set = Vec::new();

    for genre in ladder_sequence(&config.energy_ladder, start_genre, direction) {
        if set.len() >= config.max_set_len {
            break;
        }
        if let Some(node) = top_unused_of_genre(graph, genre, &used) {
            used.insert(node);
            set.push(SetEntry::from_node(graph, node));
        }
    }

    debug!(start_genre, ?direction, len = set.len(), "energy set");
    set
}
