//! The one owner of the active snapshot and everything derived from it.
//!
//! Queries run synchronously against the current graph. Loading a new
//! snapshot replaces graph, simulation and highlights in one step, and a
//! rejected snapshot leaves all of them as they were. Hosts that run on
//! several threads must keep a session behind a single owning task.

use crate::bridges::{BridgeArtist, find_bridges};
use crate::config::{LayoutConfig, MixGraphConfig};
use crate::error::{ConfigError, SessionError};
use crate::graph::{ArtistGraph, GraphStats, NodeIndex, Snapshot, distinct_neighbors};
use crate::highlight::{Highlight, NodeHighlight};
use crate::layout::{Simulation, Vec2};
use crate::pathfinding::{MixPathResult, find_mix_path};
use crate::recommendations::{Recommendation, recommend};
use crate::search::search_artists;
use crate::sets::{EnergyDirection, SetEntry, build_energy_set, build_genre_journey};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SnapshotLoaded(GraphStats),
    SnapshotRejected(String),
    LayoutRestarted,
    HighlightChanged { focused: usize },
    Unloaded,
}

type Observer = Box<dyn FnMut(&SessionEvent)>;

struct ActiveSnapshot {
    graph: ArtistGraph,
    simulation: Simulation,
    highlight: Highlight,
}

pub struct GraphSession {
    config: MixGraphConfig,
    active: Option<ActiveSnapshot>,
    observers: Vec<Observer>,
}

impl GraphSession {
    pub fn new(config: MixGraphConfig) -> Self {
        Self {
            config,
            active: None,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &MixGraphConfig {
        &self.config
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Result<GraphStats, SessionError> {
        let graph = match ArtistGraph::load(snapshot) {
            Ok(graph) => graph,
            Err(error) => {
                warn!(%error, "snapshot rejected, keeping previous graph");
                self.emit(SessionEvent::SnapshotRejected(error.to_string()));
                return Err(error.into());
            }
        };

        let mut simulation = Simulation::new(&graph, &self.config.layout);
        if let Some(previous) = &self.active {
            simulation.carry_positions_from(&previous.simulation, &previous.graph, &graph);
        }

        let stats = graph.stats();
        self.active = Some(ActiveSnapshot {
            graph,
            simulation,
            highlight: Highlight::default(),
        });

        info!(
            artists = stats.total_artists,
            connections = stats.total_connections,
            "snapshot loaded"
        );
        self.emit(SessionEvent::SnapshotLoaded(stats));
        Ok(stats)
    }

    pub fn load_snapshot_from_path(&mut self, path: &Path) -> Result<GraphStats, SessionError> {
        match Snapshot::from_path(path) {
            Ok(snapshot) => self.load_snapshot(snapshot),
            Err(error) => {
                warn!(%error, path = %path.display(), "could not read snapshot");
                self.emit(SessionEvent::SnapshotRejected(error.to_string()));
                Err(error.into())
            }
        }
    }

    pub fn unload(&mut self) {
        if self.active.take().is_some() {
            debug!("snapshot unloaded");
            self.emit(SessionEvent::Unloaded);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    fn active(&self) -> Result<&ActiveSnapshot, SessionError> {
        self.active.as_ref().ok_or(SessionError::NoSnapshot)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveSnapshot, SessionError> {
        self.active.as_mut().ok_or(SessionError::NoSnapshot)
    }

    fn checked_index(&self, index: NodeIndex) -> Result<NodeIndex, SessionError> {
        if index < self.graph()?.len() {
            Ok(index)
        } else {
            Err(SessionError::NodeOutOfRange(index))
        }
    }

    pub fn graph(&self) -> Result<&ArtistGraph, SessionError> {
        Ok(&self.active()?.graph)
    }

    pub fn simulation(&self) -> Result<&Simulation, SessionError> {
        Ok(&self.active()?.simulation)
    }

    pub fn stats(&self) -> Result<GraphStats, SessionError> {
        Ok(self.graph()?.stats())
    }

    // Layout

    pub fn tick(&mut self) -> Result<(), SessionError> {
        self.active_mut()?.simulation.tick();
        Ok(())
    }

    pub fn restart_layout(&mut self) -> Result<(), SessionError> {
        self.active_mut()?.simulation.restart();
        self.emit(SessionEvent::LayoutRestarted);
        Ok(())
    }

    /// Applies new force settings and reheats the layout, keeping positions
    /// and pins.
    pub fn set_layout_config(&mut self, layout: LayoutConfig) -> Result<(), ConfigError> {
        layout.validate()?;
        self.config.layout = layout;

        if let Some(active) = self.active.as_mut() {
            active.simulation.set_config(&active.graph, &self.config.layout);
            self.emit(SessionEvent::LayoutRestarted);
        }
        Ok(())
    }

    pub fn pin_node(&mut self, index: NodeIndex, position: Vec2) -> Result<(), SessionError> {
        let index = self.checked_index(index)?;
        self.active_mut()?.simulation.pin(index, position);
        Ok(())
    }

    pub fn release_node(&mut self, index: NodeIndex) -> Result<(), SessionError> {
        let index = self.checked_index(index)?;
        self.active_mut()?.simulation.unpin(index);
        Ok(())
    }

    // Queries

    pub fn mix_path(
        &self,
        from_query: &str,
        to_query: &str,
    ) -> Result<MixPathResult, SessionError> {
        Ok(find_mix_path(self.graph()?, from_query, to_query))
    }

    pub fn bridges(&self) -> Result<Vec<BridgeArtist>, SessionError> {
        Ok(find_bridges(self.graph()?))
    }

    pub fn energy_set(
        &self,
        start_genre: &str,
        direction: EnergyDirection,
    ) -> Result<Vec<SetEntry>, SessionError> {
        Ok(build_energy_set(
            self.graph()?,
            start_genre,
            direction,
            &self.config.sets,
        ))
    }

    pub fn genre_journey(&self, start_genre: &str) -> Result<Vec<SetEntry>, SessionError> {
        Ok(build_genre_journey(
            self.graph()?,
            start_genre,
            &self.config.sets,
        ))
    }

    pub fn recommendations(&self) -> Result<Vec<Recommendation>, SessionError> {
        Ok(recommend(self.graph()?, &self.config.recommendations))
    }

    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<NodeIndex>, SessionError> {
        Ok(search_artists(self.graph()?, query, limit))
    }

    // Highlights

    pub fn highlight_path(&mut self, path: &[NodeIndex], now: Instant) -> Result<(), SessionError> {
        for &index in path {
            self.checked_index(index)?;
        }
        self.set_highlight(path.to_vec(), now)
    }

    /// Highlights a node together with its direct neighbors.
    pub fn highlight_neighborhood(
        &mut self,
        index: NodeIndex,
        now: Instant,
    ) -> Result<(), SessionError> {
        let index = self.checked_index(index)?;
        let mut focus = distinct_neighbors(self.graph()?, index);
        focus.push(index);
        self.set_highlight(focus, now)
    }

    fn set_highlight(&mut self, focus: Vec<NodeIndex>, now: Instant) -> Result<(), SessionError> {
        let duration = self.config.highlight.duration();
        let active = self.active_mut()?;
        active.highlight.set(focus, now, duration);
        let focused = active.highlight.focus_len();
        self.emit(SessionEvent::HighlightChanged { focused });
        Ok(())
    }

    pub fn clear_highlight(&mut self) -> Result<(), SessionError> {
        self.active_mut()?.highlight.clear();
        self.emit(SessionEvent::HighlightChanged { focused: 0 });
        Ok(())
    }

    /// Call from the tick loop; drops the highlight once its time is up.
    pub fn clear_expired_highlights(&mut self, now: Instant) -> Result<bool, SessionError> {
        let expired = self.active_mut()?.highlight.expire(now);
        if expired {
            self.emit(SessionEvent::HighlightChanged { focused: 0 });
        }
        Ok(expired)
    }

    /// State as of `now`. A highlight past its deadline reads as cleared
    /// even before `clear_expired_highlights` runs.
    pub fn node_state(
        &self,
        index: NodeIndex,
        now: Instant,
    ) -> Result<NodeHighlight, SessionError> {
        let index = self.checked_index(index)?;
        Ok(self.active()?.highlight.state_of(index, now))
    }
}
