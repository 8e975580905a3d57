use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GENRE: &str = "Other";

fn default_importance() -> f64 {
    0.01
}

fn default_weight() -> f32 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plays: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "songCount")]
    pub song_count: u32,
    #[serde(default = "default_importance")]
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<i64>,
    #[serde(default, alias = "inLibrary")]
    pub in_library: bool,
    #[serde(default, alias = "isRelated")]
    pub is_related: bool,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default, alias = "totalPlays")]
    pub total_plays: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            song_count: 0,
            importance: default_importance(),
            genre: None,
            cluster: None,
            in_library: false,
            is_related: false,
            songs: Vec::new(),
            total_plays: 0,
            thumbnail: None,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_song_count(mut self, song_count: u32) -> Self {
        self.song_count = song_count;
        self
    }

    pub fn with_cluster(mut self, cluster: i64) -> Self {
        self.cluster = Some(cluster);
        self
    }

    pub fn related(mut self) -> Self {
        self.in_library = false;
        self.is_related = true;
        self
    }

    pub fn in_library(mut self) -> Self {
        self.in_library = true;
        self.is_related = false;
        self
    }

    /// Genre label, or "Other" when upstream assigned none.
    pub fn genre(&self) -> &str {
        self.genre.as_deref().unwrap_or(DEFAULT_GENRE)
    }

    pub fn has_known_genre(&self) -> bool {
        self.genre() != DEFAULT_GENRE
    }

    /// Liked-song artists come through with neither flag set, so anything not
    /// explicitly marked as related counts as owned.
    pub fn is_owned(&self) -> bool {
        self.in_library || !self.is_related
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Collaboration,
    #[serde(alias = "similarity")]
    Similar,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default, rename = "type")]
    pub kind: LinkKind,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: default_weight(),
            kind,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "nodes")]
    pub members: Vec<String>,
}

/// One complete graph as handed over by the data layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<Cluster>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<serde_json::Value>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self {
            nodes,
            links,
            clusters: None,
            stats: None,
        }
    }

    pub fn with_clusters(mut self, clusters: Vec<Cluster>) -> Self {
        self.clusters = Some(clusters);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
