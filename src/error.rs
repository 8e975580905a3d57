use thiserror::Error;

/// Why a snapshot was rejected. A rejected snapshot never replaces the graph
/// that was loaded before it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("duplicate node id '{id}'")]
    DuplicateNodeId { id: String },

    #[error("link #{link} has unknown {endpoint} '{id}'")]
    DanglingLink {
        link: usize,
        endpoint: Endpoint,
        id: String,
    },

    #[error("link #{link} has invalid weight {weight}")]
    InvalidWeight { link: usize, weight: f32 },

    #[error("cluster {cluster} lists unknown member '{id}'")]
    UnknownClusterMember { cluster: i64, id: String },

    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no snapshot loaded")]
    NoSnapshot,

    #[error("node index {0} is out of range")]
    NodeOutOfRange(usize),

    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TasteError {
    #[error("need at least 2 profiles to compare, got {0}")]
    NotEnoughProfiles(usize),
}
