//! Greedy DJ set construction over genre-tagged artists.
//!
//! Both builders only pick artists with at least one song in the library and
//! are deterministic for a given graph: ties on song count go to the artist
//! that comes first in scan order. A genre with nothing to offer yields an
//! empty set, never an error.

pub mod energy;
pub mod journey;

pub use energy::build_energy_set;
pub use journey::build_genre_journey;

use crate::graph::{ArtistGraph, NodeIndex};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyDirection {
    #[default]
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetEntry {
    pub node: NodeIndex,
    pub genre: String,
    pub song_count: u32,
}

impl SetEntry {
    fn from_node(graph: &ArtistGraph, node: NodeIndex) -> Self {
        let artist = graph.node(node);
        Self {
            node,
            genre: artist.genre().to_string(),
            song_count: artist.song_count,
        }
    }
}

/// Highest song count among `candidates`, earliest wins ties.
fn pick_top(graph: &ArtistGraph, candidates: impl Iterator<Item = NodeIndex>) -> Option<NodeIndex> {
    candidates.min_by_key(|&index| Reverse(graph.node(index).song_count))
}

fn top_unused_of_genre(
    graph: &ArtistGraph,
    genre: &str,
    used: &FxHashSet<NodeIndex>,
) -> Option<NodeIndex> {
    let candidates = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(index, node)| {
            node.song_count > 0 && node.genre() == genre && !used.contains(index)
        })
        .map(|(index, _)| index);
    pick_top(graph, candidates)
}
