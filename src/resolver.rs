//! Read/write routing for a single property.
//!
//! Every property widget shares this routing. It is a pure function of its
//! inputs and holds no state.

use crate::ids::KeyframeId;
use crate::property::{PropertyKey, PropertyValue};
use crate::timeline::Keyframe;

/// Where an edit to a property lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    /// Additive update of the selected keyframe
    Keyframe(KeyframeId),
    /// The element's static value, via the caller's setter
    Element,
}

/// Which value a property control is currently bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Static,
    Keyframed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyResolution {
    /// The value to display
    pub effective_value: Option<PropertyValue>,
    pub write_target: WriteTarget,
    /// Whether any keyframe on the current track authors this property.
    /// Only drives the indicator, never the routing.
    pub has_keyframes_on_property: bool,
}

impl PropertyResolution {
    pub fn mode(&self) -> ControlMode {
        match self.write_target {
            WriteTarget::Keyframe(_) => ControlMode::Keyframed,
            WriteTarget::Element => ControlMode::Static,
        }
    }
}

/// Resolves `key` against the selected keyframe and the current track.
///
/// The selected keyframe wins only if it holds `key`. `track` is every
/// keyframe of the current animation, empty if there is none.
pub fn resolve<'a>(
    key: PropertyKey,
    static_value: Option<PropertyValue>,
    selected_keyframe: Option<&Keyframe>,
    track: impl IntoIterator<Item = &'a Keyframe>,
) -> PropertyResolution {
    let keyed = selected_keyframe.and_then(|keyframe| keyframe.get(key).map(|value| (keyframe.id, value)));

    let (effective_value, write_target) = match keyed {
        Some((keyframe_id, value)) => (Some(value), WriteTarget::Keyframe(keyframe_id)),
        None => (static_value, WriteTarget::Element),
    };

    PropertyResolution {
        effective_value,
        write_target,
        has_keyframes_on_property: track.into_iter().any(|keyframe| keyframe.holds(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AnimationId;
    use crate::property::PropertyMap;
    use crate::timeline::KeyframePosition;

    fn keyframe(animation_id: AnimationId, position: u8, props: &[(PropertyKey, f64)]) -> Keyframe {
        let properties: PropertyMap = props
            .iter()
            .map(|(key, value)| (*key, PropertyValue::Number(*value)))
            .collect();
        Keyframe::new(animation_id, KeyframePosition::from(position), properties)
    }

    #[test]
    fn test_no_selection_reads_static() {
        let resolution = resolve(
            PropertyKey::Opacity,
            Some(PropertyValue::Number(0.8)),
            None,
            std::iter::empty(),
        );
        assert_eq!(resolution.effective_value, Some(PropertyValue::Number(0.8)));
        assert_eq!(resolution.write_target, WriteTarget::Element);
        assert_eq!(resolution.mode(), ControlMode::Static);
        assert!(!resolution.has_keyframes_on_property);
    }

    #[test]
    fn test_indicator_is_independent_of_selection() {
        let animation_id = AnimationId::new();
        let start = keyframe(animation_id, 0, &[(PropertyKey::X, 10.0)]);
        let end = keyframe(animation_id, 100, &[(PropertyKey::Y, 20.0)]);
        let track = [start.clone(), end.clone()];

        // Selected keyframe lacks X, but another keyframe on the track has it
        let resolution = resolve(
            PropertyKey::X,
            Some(PropertyValue::Number(1.0)),
            Some(&end),
            track.iter(),
        );
        assert!(resolution.has_keyframes_on_property);
        assert_eq!(resolution.write_target, WriteTarget::Element);
        assert_eq!(resolution.effective_value, Some(PropertyValue::Number(1.0)));
    }
}
