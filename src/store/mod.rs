//! The property store: single source of truth for a design.
//!
//! All mutations are synchronous. A successful mutation records the prior
//! design for undo, then publishes [`StoreEvent`]s to every subscriber with
//! the new state. A failed mutation changes nothing and publishes nothing.
//!
//! Operations on ids that do not exist return [`StoreError::NotFound`]. UI
//! code that may hold stale ids goes through
//! [`PropertyControl`](crate::control::PropertyControl), which logs and
//! swallows these errors.

mod history;

pub use history::History;

use crate::element::{Element, ElementPatch};
use crate::error::{EntityKind, PropertyError, StoreError, StoreResult};
use crate::event::{EventBus, StoreEvent, StoreListener, SubscriptionId};
use crate::ids::{AnimationId, ElementId, KeyframeId};
use crate::property::{PropertyKey, PropertyMap, PropertyValue};
use crate::state::{DesignState, StoreConfig};
use crate::timeline::{
    Animation, AnimationDuration, AnimationPatch, Keyframe, KeyframePatch, KeyframePosition, Phase,
};

#[derive(Debug)]
pub struct DesignStore {
    state: DesignState,
    event_bus: EventBus,
    history: History,
    default_duration: AnimationDuration,
    default_delay: u64,
}

impl Default for DesignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignStore {
    /// An empty store with default configuration
    pub fn new() -> Self {
        let config = StoreConfig::default();
        Self {
            state: DesignState::new(),
            event_bus: EventBus::new(),
            history: History::new(config.history_limit),
            default_duration: AnimationDuration::ONE_SECOND,
            default_delay: config.default_delay_ms,
        }
    }

    /// An empty store. Fails if the configured default duration is zero.
    pub fn with_config(config: &StoreConfig) -> StoreResult<Self> {
        Ok(Self {
            state: DesignState::new(),
            event_bus: EventBus::new(),
            history: History::new(config.history_limit),
            default_duration: config.default_duration()?,
            default_delay: config.default_delay_ms,
        })
    }

    // ------------------------------------------------------------------
    // Reads

    /// Snapshot accessor for imperative code (event handlers, authoring
    /// actions). Always reflects the latest mutation.
    pub fn state(&self) -> &DesignState {
        &self.state
    }

    /// An owned copy of the current design
    pub fn snapshot(&self) -> DesignState {
        self.state.clone()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.state.element(id)
    }

    pub fn animation(&self, id: AnimationId) -> Option<&Animation> {
        self.state.animation(id)
    }

    pub fn animation_for(&self, element_id: ElementId, phase: Phase) -> Option<&Animation> {
        self.state.animation_for(element_id, phase)
    }

    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.state.keyframe(id)
    }

    pub fn keyframes_for(&self, animation_id: AnimationId) -> Vec<&Keyframe> {
        self.state.keyframes_for(animation_id)
    }

    pub fn default_duration(&self) -> AnimationDuration {
        self.default_duration
    }

    // ------------------------------------------------------------------
    // Observation

    /// Registers a listener called after every successful mutation
    pub fn subscribe(&mut self, listener: impl StoreListener + 'static) -> SubscriptionId {
        self.event_bus.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.event_bus.unsubscribe(id)
    }

    fn commit(&mut self, before: DesignState, events: Vec<StoreEvent>) {
        self.history.record(before);
        self.publish(events);
    }

    fn publish(&mut self, events: Vec<StoreEvent>) {
        for event in &events {
            log::debug!("store: {event:?}");
            self.event_bus.emit(event, &self.state);
        }
    }

    // ------------------------------------------------------------------
    // Elements

    /// Inserts an element. An id that is already taken is replaced with a
    /// fresh one. Returns the id the element was stored under.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        if self.state.element(element.id).is_some() {
            log::warn!("Element id {} already in use, assigning a new one", element.id);
            element.id = ElementId::new();
        }
        let element_id = element.id;
        let before = self.state.clone();
        self.state.elements.push(element);
        self.commit(before, vec![StoreEvent::ElementAdded { element_id }]);
        element_id
    }

    /// Merges `patch` into the element
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> StoreResult<()> {
        let index = self.state.element_index(id)?;
        if patch.is_empty() {
            return Ok(());
        }
        let before = self.state.clone();
        self.state.elements[index].apply(patch);
        self.commit(before, vec![StoreEvent::ElementUpdated { element_id: id }]);
        Ok(())
    }

    /// Writes one static property on the element. This is the default static
    /// setter used by property controls.
    pub fn set_element_property(
        &mut self,
        id: ElementId,
        key: PropertyKey,
        value: PropertyValue,
    ) -> StoreResult<()> {
        let index = self.state.element_index(id)?;
        let mut element = self.state.elements[index].clone();
        element.set_property(key, value)?;

        let before = self.state.clone();
        self.state.elements[index] = element;
        self.commit(before, vec![StoreEvent::ElementUpdated { element_id: id }]);
        Ok(())
    }

    /// Removes the element together with its animations and their keyframes
    pub fn remove_element(&mut self, id: ElementId) -> StoreResult<()> {
        let index = self.state.element_index(id)?;
        let before = self.state.clone();

        let animation_ids: Vec<AnimationId> =
            self.state.animations_for(id).map(|animation| animation.id).collect();
        let mut events = Vec::new();
        for animation_id in animation_ids {
            events.extend(self.detach_animation(animation_id));
        }
        self.state.elements.remove(index);
        events.push(StoreEvent::ElementRemoved { element_id: id });

        self.commit(before, events);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Animations

    /// Returns the track for `(element_id, phase)`, creating it with the
    /// default duration and delay if it does not exist yet
    pub fn add_animation(&mut self, element_id: ElementId, phase: Phase) -> StoreResult<AnimationId> {
        self.state.element_index(element_id)?;
        if let Some(existing) = self.state.animation_for(element_id, phase) {
            return Ok(existing.id);
        }

        let animation = Animation::new(element_id, phase, self.default_duration, self.default_delay);
        let animation_id = animation.id;
        let before = self.state.clone();
        self.state.animations.push(animation);
        self.commit(
            before,
            vec![StoreEvent::AnimationCreated {
                animation_id,
                element_id,
                phase,
            }],
        );
        Ok(animation_id)
    }

    pub fn update_animation(&mut self, id: AnimationId, patch: AnimationPatch) -> StoreResult<()> {
        let index = self.state.animation_index(id)?;
        if patch == AnimationPatch::default() {
            return Ok(());
        }
        let before = self.state.clone();
        let animation = &mut self.state.animations[index];
        if let Some(duration) = patch.duration {
            animation.duration = duration;
        }
        if let Some(delay) = patch.delay {
            animation.delay = delay;
        }
        self.commit(before, vec![StoreEvent::AnimationUpdated { animation_id: id }]);
        Ok(())
    }

    /// Removes the track and all of its keyframes
    pub fn remove_animation(&mut self, id: AnimationId) -> StoreResult<()> {
        self.state.animation_index(id)?;
        let before = self.state.clone();
        let events = self.detach_animation(id);
        self.commit(before, events);
        Ok(())
    }

    /// Removes an animation and its keyframes without touching history
    fn detach_animation(&mut self, id: AnimationId) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        self.state.keyframes.retain(|keyframe| {
            if keyframe.animation_id == id {
                events.push(StoreEvent::KeyframeRemoved {
                    keyframe_id: keyframe.id,
                    animation_id: id,
                });
                false
            } else {
                true
            }
        });
        if let Ok(index) = self.state.animation_index(id) {
            let animation = self.state.animations.remove(index);
            events.push(StoreEvent::AnimationRemoved {
                animation_id: id,
                element_id: animation.element_id,
            });
        }
        events
    }

    // ------------------------------------------------------------------
    // Keyframes

    /// Checks that every property can be keyframed on the track's element
    /// and returns the values as they will be stored (finite, in range)
    fn sanitize_keyframe_properties(
        &self,
        animation_id: AnimationId,
        properties: PropertyMap,
    ) -> StoreResult<PropertyMap> {
        let animation = &self.state.animations[self.state.animation_index(animation_id)?];
        if properties.is_empty() {
            return Ok(properties);
        }
        let element = self
            .state
            .element(animation.element_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Element, animation.element_id))?;

        properties
            .into_iter()
            .map(|(key, value)| {
                if !key.applies_to(&element.content) {
                    return Err(PropertyError::NotApplicable {
                        key,
                        content: element.content.kind(),
                    }
                    .into());
                }
                Ok((key, key.sanitize(value)?))
            })
            .collect()
    }

    /// Authors `properties` at `position` on the track. The position is
    /// clamped into [0, 100]. If a keyframe already sits at that position its
    /// properties are merged (supplied keys overwrite, others are kept) and its
    /// id is returned.
    pub fn add_keyframe(
        &mut self,
        animation_id: AnimationId,
        position: impl Into<KeyframePosition>,
        properties: PropertyMap,
    ) -> StoreResult<KeyframeId> {
        let position = position.into();
        let properties = self.sanitize_keyframe_properties(animation_id, properties)?;
        let before = self.state.clone();

        let existing = self
            .state
            .keyframe_at(animation_id, position)
            .map(|keyframe| keyframe.id);

        let (keyframe_id, event) = match existing {
            Some(keyframe_id) => {
                let index = self.state.keyframe_index(keyframe_id)?;
                self.state.keyframes[index].merge(properties);
                (keyframe_id, StoreEvent::KeyframeUpdated { keyframe_id })
            }
            None => {
                let keyframe = Keyframe::new(animation_id, position, properties);
                let keyframe_id = keyframe.id;
                self.state.keyframes.push(keyframe);
                (
                    keyframe_id,
                    StoreEvent::KeyframeCreated {
                        keyframe_id,
                        animation_id,
                        position,
                    },
                )
            }
        };

        self.commit(before, vec![event]);
        Ok(keyframe_id)
    }

    /// Applies a partial update. Properties are merged additively. Moving onto
    /// a position held by another keyframe merges this keyframe into that one
    /// (this keyframe's values win) and removes it. Returns the id of the
    /// keyframe that holds the result.
    pub fn update_keyframe(&mut self, id: KeyframeId, patch: KeyframePatch) -> StoreResult<KeyframeId> {
        let index = self.state.keyframe_index(id)?;
        let animation_id = self.state.keyframes[index].animation_id;
        let KeyframePatch { position, properties } = patch;
        let properties = self.sanitize_keyframe_properties(animation_id, properties)?;
        let target_position = position.filter(|p| *p != self.state.keyframes[index].position);
        if target_position.is_none() && properties.is_empty() {
            return Ok(id);
        }

        let before = self.state.clone();
        self.state.keyframes[index].merge(properties);

        let mut events = Vec::new();
        let mut surviving = id;
        if let Some(target) = target_position {
            let occupant = self.state.keyframes.iter().position(|keyframe| {
                keyframe.animation_id == animation_id && keyframe.position == target
            });
            match occupant {
                Some(occupant_index) => {
                    let moved = self.state.keyframes.remove(index);
                    let occupant_index = if occupant_index > index {
                        occupant_index - 1
                    } else {
                        occupant_index
                    };
                    let occupant = &mut self.state.keyframes[occupant_index];
                    occupant.merge(moved.properties);
                    surviving = occupant.id;
                    events.push(StoreEvent::KeyframeRemoved {
                        keyframe_id: id,
                        animation_id,
                    });
                }
                None => self.state.keyframes[index].position = target,
            }
        }
        events.push(StoreEvent::KeyframeUpdated {
            keyframe_id: surviving,
        });

        self.commit(before, events);
        Ok(surviving)
    }

    /// Un-authors one property on a keyframe. Absent keys are a no-op.
    pub fn remove_keyframe_property(&mut self, id: KeyframeId, key: PropertyKey) -> StoreResult<()> {
        let index = self.state.keyframe_index(id)?;
        if !self.state.keyframes[index].holds(key) {
            return Ok(());
        }
        let before = self.state.clone();
        self.state.keyframes[index].properties.remove(&key);
        self.commit(before, vec![StoreEvent::KeyframeUpdated { keyframe_id: id }]);
        Ok(())
    }

    pub fn remove_keyframe(&mut self, id: KeyframeId) -> StoreResult<()> {
        let index = self.state.keyframe_index(id)?;
        let before = self.state.clone();
        let keyframe = self.state.keyframes.remove(index);
        self.commit(
            before,
            vec![StoreEvent::KeyframeRemoved {
                keyframe_id: id,
                animation_id: keyframe.animation_id,
            }],
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // History and bulk replacement

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Restores the design as it was before the last mutation. Returns false
    /// if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.state.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.state = previous;
                self.publish(vec![StoreEvent::HistoryRestored]);
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone mutation. Returns false if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.state.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.state = next;
                self.publish(vec![StoreEvent::HistoryRestored]);
                true
            }
            None => false,
        }
    }

    /// Swaps in a whole design, e.g. one loaded from disk. The design is
    /// normalized first and the undo history is cleared.
    pub fn replace_state(&mut self, mut state: DesignState) {
        state.normalize();
        self.state = state;
        self.history.clear();
        self.publish(vec![StoreEvent::Replaced]);
    }
}
