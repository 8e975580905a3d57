mod fixtures;

use fixtures::{chain_graph, demo_graph};
use mixgraph::error::TasteError;
use mixgraph::graph::{Node, Snapshot};
use mixgraph::taste::{
    GroupBridgeArtist, compare_group, compare_libraries, jaccard_similarity, taste_vector,
};
use mixgraph::ArtistGraph;
use rustc_hash::FxHashSet;

fn library(nodes: Vec<Node>) -> ArtistGraph {
    ArtistGraph::load(Snapshot::new(nodes, vec![])).unwrap()
}

#[test]
fn test_library_matches_itself() {
    let graph = demo_graph();
    let comparison = compare_libraries(&graph, &graph);

    assert_eq!(comparison.overall, 100.0);
    assert_eq!(comparison.artist_overlap, 100.0);
    assert_eq!(comparison.weighted_overlap, 100.0);
    assert_eq!(comparison.genre_match, 100.0);
    assert_eq!(comparison.shared_count, 13);
    assert_eq!(comparison.shared_artists[0], "Taylor Swift");
    assert!(comparison.unique_to_first.is_empty());
    assert!(comparison.unique_to_second.is_empty());
}

#[test]
fn test_disjoint_libraries_score_zero() {
    let comparison = compare_libraries(&chain_graph(), &demo_graph());

    assert_eq!(comparison.overall, 0.0);
    assert_eq!(comparison.shared_count, 0);
    assert_eq!(comparison.first_artist_count, 4);
    assert_eq!(comparison.second_artist_count, 13);
}

#[test]
fn test_partial_overlap_scores() {
    let first = library(vec![
        Node::new("1", "Alpha").with_genre("X").with_song_count(10),
        Node::new("2", "Beta").with_genre("X").with_song_count(5),
    ]);
    let second = library(vec![
        Node::new("1", "ALPHA").with_genre("X").with_song_count(2),
        Node::new("2", "Gamma").with_genre("Y").with_song_count(4),
        Node::new("3", "Delta").with_genre("Y").with_song_count(9).related(),
    ]);

    let comparison = compare_libraries(&first, &second);

    assert_eq!(comparison.artist_overlap, 33.3);
    assert_eq!(comparison.weighted_overlap, 10.5);
    assert_eq!(comparison.genre_match, 44.7);
    assert_eq!(comparison.overall, 29.9);
    assert_eq!(comparison.shared_artists, vec!["Alpha"]);
    assert_eq!(comparison.unique_to_first, vec!["Beta"]);
    assert_eq!(comparison.unique_to_second, vec!["Gamma"]);
}

#[test]
fn test_empty_libraries_are_identical() {
    let comparison = compare_libraries(&ArtistGraph::empty(), &ArtistGraph::empty());
    assert_eq!(comparison.overall, 100.0);
}

#[test]
fn test_jaccard_with_one_empty_side() {
    let empty: FxHashSet<&str> = FxHashSet::default();
    let some: FxHashSet<&str> = ["a"].into_iter().collect();

    assert_eq!(jaccard_similarity(&empty, &some), 0.0);
    assert_eq!(jaccard_similarity(&empty, &empty), 1.0);
}

#[test]
fn test_huge_song_counts_do_not_overflow() {
    let first = library(vec![
        Node::new("1", "Same").with_song_count(u32::MAX),
        Node::new("2", "Other Act").with_song_count(1),
    ]);
    let second = library(vec![
        Node::new("1", "Same").with_song_count(2),
        Node::new("2", "Other Act").with_song_count(1),
    ]);

    let comparison = compare_libraries(&first, &second);

    assert_eq!(comparison.shared_artists, vec!["Same", "Other Act"]);
    assert_eq!(comparison.artist_overlap, 100.0);
    assert_eq!(comparison.weighted_overlap, 0.0);
    assert_eq!(comparison.overall, 70.0);
}

fn group_libraries() -> [ArtistGraph; 3] {
    [
        library(vec![
            Node::new("1", "Alpha").with_genre("X").with_song_count(10),
            Node::new("2", "Beta").with_genre("X").with_song_count(5),
            Node::new("3", "Gamma").with_genre("Y").with_song_count(2),
        ]),
        library(vec![
            Node::new("1", "Alpha").with_genre("X").with_song_count(4),
            Node::new("2", "Beta").with_genre("X").with_song_count(1),
        ]),
        library(vec![
            Node::new("1", "alpha").with_genre("X").with_song_count(1),
            Node::new("2", "Delta").with_genre("Y").with_song_count(8),
            Node::new("3", "Gamma").with_genre("Y").with_song_count(3),
        ]),
    ]
}

#[test]
fn test_group_matrix_matches_pairwise_scores() {
    let libraries = group_libraries();
    let refs: Vec<&ArtistGraph> = libraries.iter().collect();
    let group = compare_group(&refs).unwrap();

    for i in 0..3 {
        assert_eq!(group.matrix[i][i], 100.0);
        for j in 0..3 {
            assert_eq!(group.matrix[i][j], group.matrix[j][i]);
        }
    }
    assert_eq!(
        group.matrix[0][1],
        compare_libraries(&libraries[0], &libraries[1]).overall
    );
    assert_eq!(
        group.matrix[1][2],
        compare_libraries(&libraries[1], &libraries[2]).overall
    );

    let m = &group.matrix;
    let round = |value: f64| (value * 10.0).round() / 10.0;
    assert_eq!(group.avg_compatibility[0], round((m[0][1] + m[0][2]) / 2.0));
    assert_eq!(group.avg_compatibility[2], round((m[2][0] + m[2][1]) / 2.0));
    assert_eq!(group.group_avg, round((m[0][1] + m[0][2] + m[1][2]) / 3.0));
}

#[test]
fn test_group_consensus_and_bridge_artists() {
    let libraries = group_libraries();
    let refs: Vec<&ArtistGraph> = libraries.iter().collect();
    let group = compare_group(&refs).unwrap();

    assert_eq!(group.consensus_artists, vec!["Alpha"]);
    assert_eq!(
        group.bridge_artists,
        vec![
            GroupBridgeArtist {
                name: "Beta".to_string(),
                in_profiles: 2,
                total_songs: 6,
            },
            GroupBridgeArtist {
                name: "Gamma".to_string(),
                in_profiles: 2,
                total_songs: 5,
            },
        ]
    );
}

#[test]
fn test_identical_group_is_fully_compatible() {
    let graph = demo_graph();
    let group = compare_group(&[&graph, &graph]).unwrap();

    assert_eq!(group.matrix, vec![vec![100.0, 100.0], vec![100.0, 100.0]]);
    assert_eq!(group.avg_compatibility, vec![100.0, 100.0]);
    assert_eq!(group.group_avg, 100.0);
    assert_eq!(group.consensus_artists.len(), 13);
    assert_eq!(group.consensus_artists[0], "Taylor Swift");
    assert!(group.bridge_artists.is_empty());
}

#[test]
fn test_group_needs_two_profiles() {
    let graph = demo_graph();

    assert_eq!(
        compare_group(&[&graph]).unwrap_err(),
        TasteError::NotEnoughProfiles(1)
    );
    assert_eq!(compare_group(&[]).unwrap_err(), TasteError::NotEnoughProfiles(0));
}

#[test]
fn test_taste_vector_summary() {
    let graph = library(vec![
        Node::new("1", "Alpha").with_genre("X").with_song_count(10),
        Node::new("2", "Beta").with_genre("X").with_song_count(5),
        Node::new("3", "Gamma").with_genre("Y").with_song_count(5),
        Node::new("4", "Delta").with_genre("Y").with_song_count(7).related(),
    ]);

    let vector = taste_vector(&graph);

    assert_eq!(vector.top_artists, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(vector.artist_count, 3);
    assert_eq!(vector.song_count, 20);
    assert_eq!(vector.genre_weights["X"], 0.75);
    assert_eq!(vector.genre_weights["Y"], 0.25);
    assert_eq!(vector.diversity_score, 0.811);
    assert_eq!(vector.top_genre, "X");
}

#[test]
fn test_taste_vector_edge_cases() {
    let single = library(vec![Node::new("1", "Alpha").with_genre("X").with_song_count(4)]);
    assert_eq!(taste_vector(&single).diversity_score, 0.0);

    let tied = library(vec![
        Node::new("1", "Alpha").with_genre("Y").with_song_count(5),
        Node::new("2", "Beta").with_genre("X").with_song_count(5),
    ]);
    let vector = taste_vector(&tied);
    assert_eq!(vector.top_genre, "Y");
    assert_eq!(vector.diversity_score, 1.0);

    let empty = taste_vector(&ArtistGraph::empty());
    assert_eq!(empty.top_genre, "Unknown");
    assert_eq!(empty.diversity_score, 0.0);
    assert!(empty.top_artists.is_empty());
}
