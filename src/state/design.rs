use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::element::Element;
use crate::error::{EntityKind, StoreError, StoreResult};
use crate::ids::{AnimationId, ElementId, KeyframeId};
use crate::timeline::{Animation, Keyframe, KeyframePosition, Phase};

/// Everything a design holds: elements, their animation tracks and keyframes.
///
/// Reads are free for anyone holding a reference. Mutations go through
/// [`DesignStore`](crate::store::DesignStore), which keeps the uniqueness
/// invariants:
/// - at most one animation per `(element_id, phase)`
/// - at most one keyframe per `(animation_id, position)`
/// - no animation without its element, no keyframe without its animation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignState {
    pub(crate) elements: Vec<Element>,
    pub(crate) animations: Vec<Animation>,
    pub(crate) keyframes: Vec<Keyframe>,
}

impl DesignState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Elements in insertion order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements sorted back to front. Ties keep insertion order.
    pub fn elements_by_z(&self) -> Vec<&Element> {
        let mut elements: Vec<&Element> = self.elements.iter().collect();
        elements.sort_by_key(|element| element.z_index);
        elements
    }

    pub fn animation(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.iter().find(|animation| animation.id == id)
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// The track for `(element_id, phase)`, if one has been authored
    pub fn animation_for(&self, element_id: ElementId, phase: Phase) -> Option<&Animation> {
        self.animations
            .iter()
            .find(|animation| animation.element_id == element_id && animation.phase == phase)
    }

    pub fn animations_for(&self, element_id: ElementId) -> impl Iterator<Item = &Animation> + '_ {
        self.animations
            .iter()
            .filter(move |animation| animation.element_id == element_id)
    }

    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|keyframe| keyframe.id == id)
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Keyframes of one track, ordered by position
    pub fn keyframes_for(&self, animation_id: AnimationId) -> Vec<&Keyframe> {
        let mut keyframes: Vec<&Keyframe> = self
            .keyframes
            .iter()
            .filter(|keyframe| keyframe.animation_id == animation_id)
            .collect();
        keyframes.sort_by_key(|keyframe| keyframe.position);
        keyframes
    }

    pub fn keyframe_at(&self, animation_id: AnimationId, position: KeyframePosition) -> Option<&Keyframe> {
        self.keyframes
            .iter()
            .find(|keyframe| keyframe.animation_id == animation_id && keyframe.position == position)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(crate) fn element_index(&self, id: ElementId) -> StoreResult<usize> {
        self.elements
            .iter()
            .position(|element| element.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Element, id))
    }

    pub(crate) fn animation_index(&self, id: AnimationId) -> StoreResult<usize> {
        self.animations
            .iter()
            .position(|animation| animation.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Animation, id))
    }

    pub(crate) fn keyframe_index(&self, id: KeyframeId) -> StoreResult<usize> {
        self.keyframes
            .iter()
            .position(|keyframe| keyframe.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Keyframe, id))
    }

    /// Restores the invariants on state that did not come from the store,
    /// e.g. a loaded snapshot. Orphans are dropped, duplicate tracks are
    /// dropped, and keyframes sharing a position are merged in load order.
    /// Returns the number of records that were dropped or merged.
    pub fn normalize(&mut self) -> usize {
        let before = self.elements.len() + self.animations.len() + self.keyframes.len();

        let mut element_ids = HashSet::new();
        self.elements.retain(|element| element_ids.insert(element.id));

        let mut tracks = HashSet::new();
        self.animations.retain(|animation| {
            element_ids.contains(&animation.element_id)
                && tracks.insert((animation.element_id, animation.phase))
        });

        let animation_ids: HashSet<AnimationId> =
            self.animations.iter().map(|animation| animation.id).collect();
        let mut merged: Vec<Keyframe> = Vec::with_capacity(self.keyframes.len());
        for keyframe in self.keyframes.drain(..) {
            if !animation_ids.contains(&keyframe.animation_id) {
                continue;
            }
            match merged.iter_mut().find(|existing| {
                existing.animation_id == keyframe.animation_id
                    && existing.position == keyframe.position
            }) {
                Some(existing) => existing.merge(keyframe.properties),
                None => merged.push(keyframe),
            }
        }
        self.keyframes = merged;

        let dropped = before - (self.elements.len() + self.animations.len() + self.keyframes.len());
        if dropped > 0 {
            log::warn!("Normalized design state: dropped or merged {dropped} records");
        }
        dropped
    }
}
