use serde::{Deserialize, Serialize};

use crate::ids::{AnimationId, ElementId, KeyframeId};
use crate::timeline::{KeyframePosition, Phase};

/// Mutation notifications published by the store. Persistence and sync
/// collaborators subscribe to these to mirror the design elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    ElementAdded {
        element_id: ElementId,
    },
    ElementUpdated {
        element_id: ElementId,
    },
    ElementRemoved {
        element_id: ElementId,
    },
    AnimationCreated {
        animation_id: AnimationId,
        element_id: ElementId,
        phase: Phase,
    },
    AnimationUpdated {
        animation_id: AnimationId,
    },
    AnimationRemoved {
        animation_id: AnimationId,
        element_id: ElementId,
    },
    KeyframeCreated {
        keyframe_id: KeyframeId,
        animation_id: AnimationId,
        position: KeyframePosition,
    },
    KeyframeUpdated {
        keyframe_id: KeyframeId,
    },
    KeyframeRemoved {
        keyframe_id: KeyframeId,
        animation_id: AnimationId,
    },
    /// An undo or redo swapped in a previous design
    HistoryRestored,
    /// The whole design was replaced, e.g. by loading a snapshot
    Replaced,
}

impl StoreEvent {
    /// True for events after which listeners should re-read the whole design
    pub fn is_bulk(&self) -> bool {
        matches!(self, Self::HistoryRestored | Self::Replaced)
    }
}
