use super::ArtistGraph;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_artists: usize,
    pub total_connections: usize,
    pub library_artists: usize,
    pub related_artists: usize,
}

impl GraphStats {
    pub fn from_graph(graph: &ArtistGraph) -> Self {
        let nodes = graph.nodes();

        Self {
            total_artists: nodes.len(),
            total_connections: graph.edges().len(),
            library_artists: nodes.iter().filter(|n| n.in_library).count(),
            related_artists: nodes.iter().filter(|n| n.is_related).count(),
        }
    }
}
