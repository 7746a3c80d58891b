use std::collections::BTreeSet;

use crate::ids::{ElementId, KeyframeId};
use crate::state::DesignState;
use crate::timeline::Phase;

/// Ephemeral UI selection. Never persisted with the design.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    elements: BTreeSet<ElementId>,
    /// Insertion order of `elements`, so the first pick stays primary
    order: Vec<ElementId>,
    keyframe: Option<KeyframeId>,
    phase: Phase,
    /// Scrub position on the composition timeline, in milliseconds
    playhead_ms: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the element selection with a single element
    pub fn select_element(&mut self, id: ElementId) {
        self.clear_elements();
        self.elements.insert(id);
        self.order.push(id);
    }

    /// Adds or removes an element from a multi-selection
    pub fn toggle_element(&mut self, id: ElementId) {
        if self.elements.remove(&id) {
            self.order.retain(|existing| *existing != id);
        } else {
            self.elements.insert(id);
            self.order.push(id);
        }
    }

    pub fn clear_elements(&mut self) {
        self.elements.clear();
        self.order.clear();
        self.keyframe = None;
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    pub fn selected_elements(&self) -> &[ElementId] {
        &self.order
    }

    /// The element the property panel edits: the first one picked
    pub fn primary_element(&self) -> Option<ElementId> {
        self.order.first().copied()
    }

    pub fn select_keyframe(&mut self, id: KeyframeId) {
        self.keyframe = Some(id);
    }

    pub fn deselect_keyframe(&mut self) {
        self.keyframe = None;
    }

    pub fn selected_keyframe(&self) -> Option<KeyframeId> {
        self.keyframe
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Switches the authoring phase. The selected keyframe belongs to the old
    /// phase's track, so it is deselected.
    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.keyframe = None;
        }
    }

    pub fn playhead_ms(&self) -> u64 {
        self.playhead_ms
    }

    pub fn set_playhead(&mut self, playhead_ms: u64) {
        self.playhead_ms = playhead_ms;
    }

    /// Drops ids that no longer exist in `state`, e.g. after an undo or a
    /// deletion elsewhere in the UI
    pub fn prune(&mut self, state: &DesignState) {
        self.order.retain(|id| state.element(*id).is_some());
        self.elements.retain(|id| state.element(*id).is_some());
        if self.keyframe.is_some_and(|id| state.keyframe(id).is_none()) {
            self.keyframe = None;
        }
    }
}
