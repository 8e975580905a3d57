pub mod bridges;
pub mod config;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod layout;
pub mod logging;
pub mod pathfinding;
pub mod recommendations;
pub mod search;
pub mod session;
pub mod sets;
pub mod string_normalization;
pub mod taste;

// Re-export commonly used items
pub use bridges::{BridgeArtist, find_bridges};
pub use config::MixGraphConfig;
pub use error::{ConfigError, LoadError, SessionError, TasteError};
pub use graph::{ArtistGraph, GraphStats, Link, LinkKind, Node, NodeIndex, Snapshot};
pub use layout::{Simulation, Vec2, vec2};
pub use logging::init_logging;
pub use pathfinding::{MixPathResult, bfs_find_path, find_mix_path};
pub use recommendations::{Recommendation, recommend};
pub use search::search_artists;
pub use session::{GraphSession, SessionEvent};
pub use sets::{EnergyDirection, SetEntry, build_energy_set, build_genre_journey};
pub use taste::{
    GroupComparison, TasteComparison, TasteVector, compare_group, compare_libraries, taste_vector,
};
