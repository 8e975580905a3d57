#![allow(dead_code)]

use mixgraph::config::SetBuilderConfig;
use mixgraph::graph::{Cluster, Link, LinkKind, Node, Snapshot};
use mixgraph::{ArtistGraph, NodeIndex};

/// A(X,10) - B(Y,5) - C(X,1), with D on its own.
pub fn chain_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            Node::new("a", "Artist A").with_genre("X").with_song_count(10),
            Node::new("b", "Artist B").with_genre("Y").with_song_count(5),
            Node::new("c", "Artist C").with_genre("X").with_song_count(1),
            Node::new("d", "Artist D").with_genre("Z").with_song_count(3),
        ],
        vec![
            Link::new("a", "b", LinkKind::Collaboration),
            Link::new("b", "c", LinkKind::Similar),
        ],
    )
}

pub fn chain_graph() -> ArtistGraph {
    ArtistGraph::load(chain_snapshot()).unwrap()
}

pub const DEMO_GRAPH_JSON: &str = r#"{
  "nodes": [
    {"id": "1", "name": "Taylor Swift", "song_count": 45, "importance": 0.15, "in_library": true},
    {"id": "2", "name": "Ed Sheeran", "song_count": 32, "importance": 0.12, "in_library": true},
    {"id": "3", "name": "The Weeknd", "song_count": 28, "importance": 0.11, "in_library": true},
    {"id": "4", "name": "Dua Lipa", "song_count": 22, "importance": 0.09, "in_library": true},
    {"id": "5", "name": "Post Malone", "song_count": 18, "importance": 0.08, "in_library": true},
    {"id": "6", "name": "Ariana Grande", "song_count": 15, "importance": 0.07, "in_library": true},
    {"id": "7", "name": "Drake", "song_count": 25, "importance": 0.10, "in_library": true},
    {"id": "8", "name": "Billie Eilish", "song_count": 20, "importance": 0.08, "in_library": true},
    {"id": "9", "name": "Justin Bieber", "song_count": 12, "importance": 0.06, "in_library": false, "is_related": true},
    {"id": "10", "name": "Shawn Mendes", "song_count": 8, "importance": 0.05, "in_library": false, "is_related": true},
    {"id": "11", "name": "Khalid", "song_count": 10, "importance": 0.05, "in_library": true},
    {"id": "12", "name": "SZA", "song_count": 14, "importance": 0.06, "in_library": true},
    {"id": "13", "name": "Doja Cat", "song_count": 16, "importance": 0.07, "in_library": true},
    {"id": "14", "name": "Bad Bunny", "song_count": 11, "importance": 0.05, "in_library": true},
    {"id": "15", "name": "Olivia Rodrigo", "song_count": 9, "importance": 0.04, "in_library": true}
  ],
  "links": [
    {"source": "1", "target": "2", "weight": 3, "type": "collaboration"},
    {"source": "1", "target": "6", "weight": 1, "type": "similar"},
    {"source": "2", "target": "9", "weight": 2, "type": "collaboration"},
    {"source": "2", "target": "10", "weight": 1, "type": "similar"},
    {"source": "3", "target": "6", "weight": 2, "type": "collaboration"},
    {"source": "3", "target": "7", "weight": 3, "type": "collaboration"},
    {"source": "4", "target": "13", "weight": 2, "type": "collaboration"},
    {"source": "4", "target": "3", "weight": 1, "type": "similar"},
    {"source": "5", "target": "7", "weight": 2, "type": "similar"},
    {"source": "5", "target": "3", "weight": 1, "type": "similar"},
    {"source": "6", "target": "3", "weight": 2, "type": "collaboration"},
    {"source": "6", "target": "13", "weight": 1, "type": "similar"},
    {"source": "7", "target": "5", "weight": 2, "type": "collaboration"},
    {"source": "7", "target": "14", "weight": 1, "type": "collaboration"},
    {"source": "8", "target": "11", "weight": 2, "type": "collaboration"},
    {"source": "8", "target": "15", "weight": 1, "type": "similar"},
    {"source": "9", "target": "10", "weight": 2, "type": "similar"},
    {"source": "11", "target": "12", "weight": 1, "type": "similar"},
    {"source": "12", "target": "13", "weight": 2, "type": "collaboration"},
    {"source": "12", "target": "7", "weight": 1, "type": "collaboration"},
    {"source": "13", "target": "14", "weight": 1, "type": "similar"},
    {"source": "15", "target": "1", "weight": 1, "type": "similar"}
  ],
  "stats": {"total_artists": 15, "total_connections": 22}
}"#;

pub fn demo_graph() -> ArtistGraph {
    ArtistGraph::load(Snapshot::from_json_str(DEMO_GRAPH_JSON).unwrap()).unwrap()
}

/// A hub whose neighbors span three other genres, plus a node that only
/// touches its own genre and an untagged artist.
pub fn bridge_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            Node::new("hub", "Porter Robinson").with_genre("Future Bass").with_song_count(12),
            Node::new("h1", "Deadmau5").with_genre("House").with_song_count(6),
            Node::new("t1", "Armin van Buuren").with_genre("Trance").with_song_count(4),
            Node::new("p1", "Lauv").with_genre("Pop").with_song_count(7),
            Node::new("fb", "Illenium").with_genre("Future Bass").with_song_count(9),
            Node::new("o1", "Unknown Act").with_song_count(2),
            Node::new("h2", "Eric Prydz").with_genre("House").with_song_count(3),
        ],
        vec![
            Link::new("hub", "h1", LinkKind::Similar),
            Link::new("hub", "t1", LinkKind::Similar),
            Link::new("hub", "p1", LinkKind::Collaboration),
            Link::new("hub", "fb", LinkKind::Similar),
            Link::new("hub", "o1", LinkKind::Similar),
            Link::new("h1", "h2", LinkKind::Similar),
            Link::new("h1", "t1", LinkKind::Similar),
            Link::new("o1", "h1", LinkKind::Similar),
            Link::new("o1", "p1", LinkKind::Similar),
        ],
    )
}

pub fn bridge_graph() -> ArtistGraph {
    ArtistGraph::load(bridge_snapshot()).unwrap()
}

/// One artist per rung of a short ladder, with a runner-up in House.
pub fn ladder_graph() -> ArtistGraph {
    let snapshot = Snapshot::new(
        vec![
            Node::new("pop", "Dua Lipa").with_genre("Pop").with_song_count(8),
            Node::new("house", "Fred again..").with_genre("House").with_song_count(10),
            Node::new("house2", "Disclosure").with_genre("House").with_song_count(10),
            Node::new("trance", "Above & Beyond").with_genre("Trance").with_song_count(4),
            Node::new("dnb", "Sub Focus").with_genre("Drum & Bass").with_song_count(0),
            Node::new("dub", "Skrillex").with_genre("Dubstep/Bass").with_song_count(6),
        ],
        vec![
            Link::new("pop", "house", LinkKind::Collaboration),
            Link::new("house", "house2", LinkKind::Similar),
            Link::new("house", "trance", LinkKind::Similar),
            Link::new("trance", "dub", LinkKind::Similar),
            Link::new("house2", "dnb", LinkKind::Similar),
        ],
    );
    ArtistGraph::load(snapshot).unwrap()
}

pub fn clustered_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            Node::new("a1", "North One").with_song_count(4),
            Node::new("a2", "North Two").with_song_count(4),
            Node::new("a3", "North Three").with_song_count(4),
            Node::new("b1", "South One").with_song_count(4),
            Node::new("b2", "South Two").with_song_count(4),
            Node::new("b3", "South Three").with_song_count(4),
        ],
        vec![],
    )
    .with_clusters(vec![
        Cluster {
            id: 0,
            name: Some("north".to_string()),
            members: vec!["a1".into(), "a2".into(), "a3".into()],
        },
        Cluster {
            id: 1,
            name: Some("south".to_string()),
            members: vec!["b1".into(), "b2".into(), "b3".into()],
        },
    ])
}

pub fn index_of(graph: &ArtistGraph, id: &str) -> NodeIndex {
    graph.find_node(id).unwrap()
}

pub fn short_sets(max_set_len: usize) -> SetBuilderConfig {
    SetBuilderConfig {
        max_set_len,
        ..SetBuilderConfig::default()
    }
}
