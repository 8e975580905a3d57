use crate::graph::NodeIndex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeHighlight {
    pub highlighted: bool,
    pub faded: bool,
}

/// Emphasis for a set of nodes, fading the rest. Resets itself once the
/// fixed duration passes; there is no cancellation beyond replacing it.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    focus: FxHashSet<NodeIndex>,
    expires_at: Option<Instant>,
}

impl Highlight {
    pub fn set(
        &mut self,
        nodes: impl IntoIterator<Item = NodeIndex>,
        now: Instant,
        duration: Duration,
    ) {
        self.focus = nodes.into_iter().collect();
        self.expires_at = Some(now + duration);
    }

    pub fn clear(&mut self) {
        self.focus.clear();
        self.expires_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now < deadline)
    }

    pub fn focus_len(&self) -> usize {
        self.focus.len()
    }

    /// Returns true when this call cleared an expired highlight.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    pub fn state_of(&self, index: NodeIndex, now: Instant) -> NodeHighlight {
        if !self.is_live(now) {
            return NodeHighlight::default();
        }
        let highlighted = self.focus.contains(&index);
        NodeHighlight {
            highlighted,
            faded: !highlighted,
        }
    }
}
