//! The reusable property editing adapter.
//!
//! A [`PropertyControl`] binds one property of one element to a widget. It
//! reads through the resolver, routes edits to either the selected keyframe
//! or the element, and authors keyframes at the playhead. It is the only
//! place that sequences "resolve, then create the track if needed".
//!
//! The `try_*` methods report every failure. The plain methods are what
//! widgets call: they log failures (stale ids included) and carry on.

use crate::error::{EntityKind, PropertyError, StoreError, StoreResult};
use crate::ids::{ElementId, KeyframeId};
use crate::property::{PropertyKey, PropertyMap, PropertyValue};
use crate::resolver::{self, ControlMode, PropertyResolution, WriteTarget};
use crate::selection::SelectionState;
use crate::store::DesignStore;
use crate::timeline::{KeyframePatch, position_at};

/// Writes a static value on behalf of a control
pub type StaticSetter<'a> = Box<dyn FnMut(&mut DesignStore, PropertyValue) -> StoreResult<()> + 'a>;

/// Visual state of the keyframe toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyframeIndicator {
    /// No keyframe on the current track authors the property
    Static,
    /// Some keyframe on the current track authors the property
    Animated,
}

pub struct PropertyControl<'a> {
    label: &'a str,
    key: PropertyKey,
    element_id: ElementId,
    selection: &'a SelectionState,
    static_value: Option<PropertyValue>,
    static_setter: Option<StaticSetter<'a>>,
}

impl std::fmt::Debug for PropertyControl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyControl")
            .field("label", &self.label)
            .field("key", &self.key)
            .field("element_id", &self.element_id)
            .field("static_value", &self.static_value)
            .field("static_setter", &self.static_setter.as_ref().map(|_| "<setter>"))
            .finish()
    }
}

impl<'a> PropertyControl<'a> {
    pub fn new(key: PropertyKey, element_id: ElementId, selection: &'a SelectionState) -> Self {
        Self {
            label: key.label(),
            key,
            element_id,
            selection,
            static_value: None,
            static_setter: None,
        }
    }

    /// Overrides the display label
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// Supplies the static value instead of reading it from the element
    pub fn static_value(mut self, value: PropertyValue) -> Self {
        self.static_value = Some(value);
        self
    }

    /// Replaces the default static write path
    /// ([`DesignStore::set_element_property`])
    pub fn static_setter(
        mut self,
        setter: impl FnMut(&mut DesignStore, PropertyValue) -> StoreResult<()> + 'a,
    ) -> Self {
        self.static_setter = Some(Box::new(setter));
        self
    }

    pub fn key(&self) -> PropertyKey {
        self.key
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn display_label(&self) -> &str {
        self.label
    }

    /// Resolves against the store as it is right now. `None` if the element
    /// no longer exists.
    ///
    /// A selected keyframe only counts if it sits on this element's track for
    /// the current phase.
    pub fn resolve(&self, store: &DesignStore) -> Option<PropertyResolution> {
        let state = store.state();
        let element = state.element(self.element_id)?;
        let static_value = self.static_value.or_else(|| element.property(self.key));

        let animation = state.animation_for(self.element_id, self.selection.phase());
        let track = animation
            .map(|animation| state.keyframes_for(animation.id))
            .unwrap_or_default();
        let selected = self
            .selection
            .selected_keyframe()
            .and_then(|id| state.keyframe(id))
            .filter(|keyframe| animation.is_some_and(|animation| animation.id == keyframe.animation_id));

        Some(resolver::resolve(self.key, static_value, selected, track))
    }

    pub fn display_value(&self, store: &DesignStore) -> Option<PropertyValue> {
        self.resolve(store).and_then(|resolution| resolution.effective_value)
    }

    pub fn mode(&self, store: &DesignStore) -> ControlMode {
        self.resolve(store)
            .map_or(ControlMode::Static, |resolution| resolution.mode())
    }

    pub fn indicator(&self, store: &DesignStore) -> KeyframeIndicator {
        match self.resolve(store) {
            Some(resolution) if resolution.has_keyframes_on_property => KeyframeIndicator::Animated,
            _ => KeyframeIndicator::Static,
        }
    }

    /// Whether [`add_keyframe_at_playhead`](Self::add_keyframe_at_playhead)
    /// has a value to author. False for a stale element and for a size that
    /// still follows the content.
    pub fn can_key(&self, store: &DesignStore) -> bool {
        let Some(resolution) = self.resolve(store) else {
            return false;
        };
        let auto_sized = store
            .element(self.element_id)
            .is_some_and(|element| element.is_auto_sized(self.key));
        resolution.effective_value.is_some()
            && !(resolution.write_target == WriteTarget::Element && auto_sized)
    }

    /// Routes an edit through the current write target
    pub fn try_apply(&mut self, store: &mut DesignStore, value: PropertyValue) -> StoreResult<()> {
        let resolution = self
            .resolve(store)
            .ok_or_else(|| StoreError::not_found(EntityKind::Element, self.element_id))?;

        match resolution.write_target {
            WriteTarget::Keyframe(keyframe_id) => store
                .update_keyframe(keyframe_id, KeyframePatch::property(self.key, value))
                .map(|_| ()),
            WriteTarget::Element => match self.static_setter.as_mut() {
                Some(setter) => setter(store, value),
                None => store.set_element_property(self.element_id, self.key, value),
            },
        }
    }

    /// Like [`try_apply`](Self::try_apply), but logs failures instead of
    /// returning them. Returns whether the edit landed.
    pub fn apply(&mut self, store: &mut DesignStore, value: PropertyValue) -> bool {
        match self.try_apply(store, value) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Dropped edit of {} on element {}: {err}", self.key, self.element_id);
                false
            }
        }
    }

    /// Calls `render` with the display value and a change handler bound to
    /// this control, and returns whatever `render` builds. The handler is only
    /// live while `render` runs. If it fires more than once, the last value
    /// wins.
    pub fn render<R>(
        &mut self,
        store: &mut DesignStore,
        render: impl FnOnce(Option<PropertyValue>, &mut dyn FnMut(PropertyValue)) -> R,
    ) -> R {
        let display_value = self.display_value(store);
        let mut on_change = |value: PropertyValue| {
            self.apply(store, value);
        };
        render(display_value, &mut on_change)
    }

    /// Authors the current value of the property as a keyframe at the
    /// playhead, creating the track for the current phase if needed. Other
    /// properties already keyed at that position are kept.
    pub fn try_add_keyframe_at_playhead(&self, store: &mut DesignStore) -> StoreResult<KeyframeId> {
        // Read the live value before anything is created
        let resolution = self
            .resolve(store)
            .ok_or_else(|| StoreError::not_found(EntityKind::Element, self.element_id))?;
        let element = store
            .element(self.element_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Element, self.element_id))?;
        if resolution.write_target == WriteTarget::Element && element.is_auto_sized(self.key) {
            return Err(PropertyError::AutoSized { key: self.key }.into());
        }
        let value = resolution.effective_value.ok_or(PropertyError::NotApplicable {
            key: self.key,
            content: element.content.kind(),
        })?;

        let animation_id = store.add_animation(self.element_id, self.selection.phase())?;
        let position = {
            let animation = store
                .animation(animation_id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Animation, animation_id))?;
            position_at(self.selection.playhead_ms(), animation)
        };

        let mut properties = PropertyMap::new();
        properties.insert(self.key, value);
        store.add_keyframe(animation_id, position, properties)
    }

    /// Like [`try_add_keyframe_at_playhead`](Self::try_add_keyframe_at_playhead),
    /// but logs failures instead of returning them
    pub fn add_keyframe_at_playhead(&self, store: &mut DesignStore) -> Option<KeyframeId> {
        match self.try_add_keyframe_at_playhead(store) {
            Ok(keyframe_id) => Some(keyframe_id),
            Err(err) => {
                log::warn!(
                    "Could not key {} on element {}: {err}",
                    self.key,
                    self.element_id
                );
                None
            }
        }
    }
}
