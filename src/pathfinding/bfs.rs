use super::utils::{PathSearch, reconstruct_path};
use crate::graph::{ArtistGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use std::{collections::VecDeque, time::Instant};

struct BfsState {
    start: NodeIndex,
    queue: VecDeque<NodeIndex>,
    visited: FxHashSet<NodeIndex>,
    parent_map: FxHashMap<NodeIndex, NodeIndex>,
}

impl BfsState {
    fn new(start: NodeIndex) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = FxHashSet::default();

        queue.push_back(start);
        visited.insert(start);

        Self {
            start,
            queue,
            visited,
            parent_map: FxHashMap::default(),
        }
    }

    fn visit_neighbor(&mut self, neighbor: NodeIndex, current: NodeIndex) {
        if self.visited.insert(neighbor) {
            self.parent_map.insert(neighbor, current);
            self.queue.push_back(neighbor);
        }
    }

    // Equal-length routes resolve by adjacency order, i.e. the order links
    // appeared in the snapshot.
    fn find_path_to_target(
        &mut self,
        graph: &ArtistGraph,
        target: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        while let Some(current_artist) = self.queue.pop_front() {
            if current_artist == target {
                return Some(reconstruct_path(&self.parent_map, self.start, target));
            }

            for neighbor in graph.neighbors_of(current_artist) {
                self.visit_neighbor(neighbor.node, current_artist);
            }
        }

        None
    }
}

/// Shortest route by hop count over the undirected adjacency.
pub fn bfs_find_path(graph: &ArtistGraph, start: NodeIndex, target: NodeIndex) -> PathSearch {
    let search_timer = Instant::now();

    if start >= graph.len() || target >= graph.len() {
        return PathSearch {
            path: None,
            artists_visited: 0,
            duration: search_timer.elapsed(),
        };
    }

    let mut bfs_state = BfsState::new(start);
    let path = bfs_state.find_path_to_target(graph, target);

    PathSearch {
        path,
        artists_visited: bfs_state.visited.len(),
        duration: search_timer.elapsed(),
    }
}
