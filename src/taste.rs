//! Compares the libraries behind snapshots: artist overlap, listening
//! overlap weighted by song counts, and genre mix. Works pairwise, across a
//! group, or as a standalone summary of one library.

use crate::error::TasteError;
use crate::graph::ArtistGraph;
use crate::string_normalization::clean_str;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::cmp::Reverse;

const SHARED_ARTIST_LIMIT: usize = 50;
const UNIQUE_ARTIST_LIMIT: usize = 30;
const GROUP_ARTIST_LIMIT: usize = 20;
const TOP_ARTIST_LIMIT: usize = 100;

const ARTIST_OVERLAP_WEIGHT: f64 = 0.40;
const WEIGHTED_OVERLAP_WEIGHT: f64 = 0.30;
const GENRE_MATCH_WEIGHT: f64 = 0.30;

/// Scores are percentages rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasteComparison {
    pub overall: f64,
    pub artist_overlap: f64,
    pub weighted_overlap: f64,
    pub genre_match: f64,
    pub shared_artists: Vec<String>,
    pub shared_count: usize,
    pub unique_to_first: Vec<String>,
    pub unique_to_second: Vec<String>,
    pub first_artist_count: usize,
    pub second_artist_count: usize,
    pub first_genres: FxHashMap<String, f64>,
    pub second_genres: FxHashMap<String, f64>,
}

/// An artist shared by some, but not all, members of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupBridgeArtist {
    pub name: String,
    pub in_profiles: usize,
    pub total_songs: u64,
}

/// Rows and columns of `matrix` follow the order the libraries were given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub matrix: Vec<Vec<f64>>,
    pub consensus_artists: Vec<String>,
    pub bridge_artists: Vec<GroupBridgeArtist>,
    pub avg_compatibility: Vec<f64>,
    pub group_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasteVector {
    pub genre_weights: FxHashMap<String, f64>,
    pub top_artists: Vec<String>,
    pub artist_count: usize,
    pub song_count: u64,
    /// Normalized genre entropy: 0 for a single genre, 1 for an even spread.
    pub diversity_score: f64,
    pub top_genre: String,
}

/// Song counts keyed by normalized artist name, with display names and
/// first-seen order kept for stable output.
struct LibraryProfile {
    order: Vec<String>,
    display: FxHashMap<String, String>,
    counts: FxHashMap<String, u64>,
    genre_order: Vec<String>,
    genres: FxHashMap<String, f64>,
    total: u64,
}

impl LibraryProfile {
    fn from_graph(graph: &ArtistGraph) -> Self {
        let mut profile = Self {
            order: Vec::new(),
            display: FxHashMap::default(),
            counts: FxHashMap::default(),
            genre_order: Vec::new(),
            genres: FxHashMap::default(),
            total: 0,
        };

        for node in graph.nodes() {
            if !node.is_owned() || node.song_count == 0 {
                continue;
            }

            let key = clean_str(&node.name);
            if !profile.counts.contains_key(&key) {
                profile.order.push(key.clone());
                profile.display.insert(key.clone(), node.name.clone());
            }
            *profile.counts.entry(key).or_insert(0) += u64::from(node.song_count);

            let genre = node.genre();
            if !profile.genres.contains_key(genre) {
                profile.genre_order.push(genre.to_string());
            }
            *profile.genres.entry(genre.to_string()).or_insert(0.0) += f64::from(node.song_count);
            profile.total += u64::from(node.song_count);
        }

        if profile.total > 0 {
            let total = profile.total as f64;
            for weight in profile.genres.values_mut() {
                *weight /= total;
            }
        }

        profile
    }

    fn artists(&self) -> FxHashSet<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    fn display_names(&self, keys: Vec<&str>) -> Vec<String> {
        keys.into_iter().map(|key| self.display[key].clone()).collect()
    }

    /// Artist keys by song count, most played first.
    fn by_count(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.order.iter().map(String::as_str).collect();
        keys.sort_by_key(|key| Reverse(self.count(key)));
        keys
    }
}

struct Scores {
    artist_overlap: f64,
    weighted_overlap: f64,
    genre_match: f64,
}

impl Scores {
    fn between(first: &LibraryProfile, second: &LibraryProfile) -> Self {
        Self {
            artist_overlap: jaccard_similarity(&first.artists(), &second.artists()),
            weighted_overlap: weighted_overlap(&first.counts, &second.counts),
            genre_match: cosine_similarity(&first.genres, &second.genres),
        }
    }

    fn overall(&self) -> f64 {
        ARTIST_OVERLAP_WEIGHT * self.artist_overlap
            + WEIGHTED_OVERLAP_WEIGHT * self.weighted_overlap
            + GENRE_MATCH_WEIGHT * self.genre_match
    }
}

pub fn jaccard_similarity(first: &FxHashSet<&str>, second: &FxHashSet<&str>) -> f64 {
    if first.is_empty() && second.is_empty() {
        return 1.0;
    }
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }

    let intersection = first.intersection(second).count();
    let union = first.union(second).count();
    intersection as f64 / union as f64
}

pub fn cosine_similarity(first: &FxHashMap<String, f64>, second: &FxHashMap<String, f64>) -> f64 {
    let keys: FxHashSet<&String> = first.keys().chain(second.keys()).collect();
    if keys.is_empty() {
        return 1.0;
    }

    let (mut dot, mut first_mag, mut second_mag) = (0.0, 0.0, 0.0);
    for key in keys {
        let a = first.get(key).copied().unwrap_or(0.0);
        let b = second.get(key).copied().unwrap_or(0.0);
        dot += a * b;
        first_mag += a * a;
        second_mag += b * b;
    }

    if first_mag == 0.0 || second_mag == 0.0 {
        return 0.0;
    }
    dot / (first_mag.sqrt() * second_mag.sqrt())
}

/// Sum of per-artist minimum song counts over the sum of maximums.
pub fn weighted_overlap(first: &FxHashMap<String, u64>, second: &FxHashMap<String, u64>) -> f64 {
    let artists: FxHashSet<&String> = first.keys().chain(second.keys()).collect();
    if artists.is_empty() {
        return 1.0;
    }

    let (mut min_sum, mut max_sum) = (0u64, 0u64);
    for artist in artists {
        let a = first.get(artist).copied().unwrap_or(0);
        let b = second.get(artist).copied().unwrap_or(0);
        min_sum = min_sum.saturating_add(a.min(b));
        max_sum = max_sum.saturating_add(a.max(b));
    }

    if max_sum == 0 {
        return 0.0;
    }
    min_sum as f64 / max_sum as f64
}

pub fn compare_libraries(first: &ArtistGraph, second: &ArtistGraph) -> TasteComparison {
    let first_profile = LibraryProfile::from_graph(first);
    let second_profile = LibraryProfile::from_graph(second);
    let first_artists = first_profile.artists();
    let second_artists = second_profile.artists();
    let scores = Scores::between(&first_profile, &second_profile);

    let mut shared: Vec<&str> = first_profile
        .order
        .iter()
        .map(String::as_str)
        .filter(|key| second_artists.contains(key))
        .collect();
    let shared_count = shared.len();
    shared.sort_by_key(|key| Reverse(first_profile.count(key) + second_profile.count(key)));
    shared.truncate(SHARED_ARTIST_LIMIT);

    let unique_to_first = unique_artists(&first_profile, &second_artists);
    let unique_to_second = unique_artists(&second_profile, &first_artists);

    TasteComparison {
        overall: as_percent(scores.overall()),
        artist_overlap: as_percent(scores.artist_overlap),
        weighted_overlap: as_percent(scores.weighted_overlap),
        genre_match: as_percent(scores.genre_match),
        shared_artists: first_profile.display_names(shared),
        shared_count,
        unique_to_first: first_profile.display_names(unique_to_first),
        unique_to_second: second_profile.display_names(unique_to_second),
        first_artist_count: first_artists.len(),
        second_artist_count: second_artists.len(),
        first_genres: first_profile.genres.clone(),
        second_genres: second_profile.genres.clone(),
    }
}

fn unique_artists<'a>(profile: &'a LibraryProfile, other: &FxHashSet<&str>) -> Vec<&'a str> {
    let mut unique: Vec<&str> = profile
        .order
        .iter()
        .map(String::as_str)
        .filter(|key| !other.contains(key))
        .collect();
    unique.sort_by_key(|key| Reverse(profile.count(key)));
    unique.truncate(UNIQUE_ARTIST_LIMIT);
    unique
}

/// Pairwise scores for every member plus the artists that tie the group
/// together. Needs at least two libraries.
pub fn compare_group(libraries: &[&ArtistGraph]) -> Result<GroupComparison, TasteError> {
    if libraries.len() < 2 {
        return Err(TasteError::NotEnoughProfiles(libraries.len()));
    }

    let profiles: Vec<LibraryProfile> = libraries
        .iter()
        .map(|graph| LibraryProfile::from_graph(graph))
        .collect();
    let size = profiles.len();

    let mut matrix = vec![vec![100.0; size]; size];
    let mut pair_sum = 0.0;
    for i in 0..size {
        for j in (i + 1)..size {
            let overall = as_percent(Scores::between(&profiles[i], &profiles[j]).overall());
            matrix[i][j] = overall;
            matrix[j][i] = overall;
            pair_sum += overall;
        }
    }

    let avg_compatibility = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let others: f64 = row
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, score)| score)
                .sum();
            round_to(others / (size - 1) as f64, 1)
        })
        .collect();
    let pairs = size * (size - 1) / 2;
    let group_avg = round_to(pair_sum / pairs as f64, 1);

    let (consensus_artists, bridge_artists) = group_artists(&profiles);

    Ok(GroupComparison {
        matrix,
        consensus_artists,
        bridge_artists,
        avg_compatibility,
        group_avg,
    })
}

/// Artists held by every member, and artists held by more than one member
/// but not all of them.
fn group_artists(profiles: &[LibraryProfile]) -> (Vec<String>, Vec<GroupBridgeArtist>) {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut consensus: Vec<(String, u64)> = Vec::new();
    let mut bridges: Vec<GroupBridgeArtist> = Vec::new();

    for profile in profiles {
        for key in &profile.order {
            if !seen.insert(key.as_str()) {
                continue;
            }
            let in_profiles = profiles
                .iter()
                .filter(|other| other.counts.contains_key(key))
                .count();
            let total_songs = profiles
                .iter()
                .fold(0u64, |sum, other| sum.saturating_add(other.count(key)));
            let name = profile.display[key].clone();

            if in_profiles == profiles.len() {
                consensus.push((name, total_songs));
            } else if in_profiles > 1 {
                bridges.push(GroupBridgeArtist {
                    name,
                    in_profiles,
                    total_songs,
                });
            }
        }
    }

    consensus.sort_by_key(|(_, total)| Reverse(*total));
    consensus.truncate(GROUP_ARTIST_LIMIT);
    bridges.sort_by_key(|bridge| (Reverse(bridge.in_profiles), Reverse(bridge.total_songs)));
    bridges.truncate(GROUP_ARTIST_LIMIT);

    (consensus.into_iter().map(|(name, _)| name).collect(), bridges)
}

/// Summarizes one library on its own.
pub fn taste_vector(graph: &ArtistGraph) -> TasteVector {
    let profile = LibraryProfile::from_graph(graph);

    let mut top_artists = profile.by_count();
    top_artists.truncate(TOP_ARTIST_LIMIT);

    let entropy: f64 = profile
        .genres
        .values()
        .filter(|weight| **weight > 0.0)
        .map(|weight| -weight * weight.ln())
        .sum();
    let max_entropy = if profile.genres.len() > 1 {
        (profile.genres.len() as f64).ln()
    } else {
        1.0
    };

    let mut top_genre: Option<(&str, f64)> = None;
    for genre in &profile.genre_order {
        let weight = profile.genres[genre];
        if top_genre.is_none_or(|(_, best)| weight > best) {
            top_genre = Some((genre, weight));
        }
    }

    let top_genre = top_genre.map_or("Unknown", |(genre, _)| genre).to_string();
    let top_artists = profile.display_names(top_artists);

    TasteVector {
        top_artists,
        artist_count: profile.order.len(),
        song_count: profile.total,
        diversity_score: round_to(entropy / max_entropy, 3),
        top_genre,
        genre_weights: profile.genres,
    }
}

fn as_percent(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
