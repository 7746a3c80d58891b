use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{AnimationId, KeyframeId};
use crate::property::{PropertyKey, PropertyMap, PropertyValue, merge_properties};

/// Location of a keyframe on its own track, as an integer percentage in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct KeyframePosition(u8);

impl KeyframePosition {
    pub const START: KeyframePosition = KeyframePosition(0);
    pub const END: KeyframePosition = KeyframePosition(100);

    /// Clamps any integer into the valid range instead of rejecting it
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Position as a fraction of the track, in [0, 1]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl From<i64> for KeyframePosition {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<i32> for KeyframePosition {
    fn from(value: i32) -> Self {
        Self::clamped(i64::from(value))
    }
}

impl From<u8> for KeyframePosition {
    fn from(value: u8) -> Self {
        Self::clamped(i64::from(value))
    }
}

impl From<KeyframePosition> for u8 {
    fn from(position: KeyframePosition) -> Self {
        position.0
    }
}

impl fmt::Display for KeyframePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A point on an animation track holding sparse property overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub id: KeyframeId,
    pub animation_id: AnimationId,
    pub position: KeyframePosition,
    /// Only the properties authored at this keyframe
    pub properties: PropertyMap,
}

impl Keyframe {
    pub fn new(animation_id: AnimationId, position: KeyframePosition, properties: PropertyMap) -> Self {
        Self {
            id: KeyframeId::new(),
            animation_id,
            position,
            properties,
        }
    }

    pub fn get(&self, key: PropertyKey) -> Option<PropertyValue> {
        self.properties.get(&key).copied()
    }

    pub fn holds(&self, key: PropertyKey) -> bool {
        self.properties.contains_key(&key)
    }

    /// Additive merge: supplied keys overwrite, untouched keys are kept
    pub fn merge(&mut self, properties: PropertyMap) {
        merge_properties(&mut self.properties, properties);
    }
}

/// Partial update for a [`Keyframe`]. `properties` is merged, never replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyframePatch {
    pub position: Option<KeyframePosition>,
    pub properties: PropertyMap,
}

impl KeyframePatch {
    pub fn property(key: PropertyKey, value: PropertyValue) -> Self {
        let mut properties = PropertyMap::new();
        properties.insert(key, value);
        Self {
            position: None,
            properties,
        }
    }

    pub fn move_to(position: impl Into<KeyframePosition>) -> Self {
        Self {
            position: Some(position.into()),
            properties: PropertyMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamps() {
        assert_eq!(KeyframePosition::clamped(-20).get(), 0);
        assert_eq!(KeyframePosition::clamped(40).get(), 40);
        assert_eq!(KeyframePosition::clamped(250).get(), 100);
        assert_eq!(KeyframePosition::from(255u8), KeyframePosition::END);
    }

    #[test]
    fn test_out_of_range_position_is_clamped_when_deserializing() {
        let position: KeyframePosition = serde_json::from_str("140").unwrap();
        assert_eq!(position, KeyframePosition::END);
        assert_eq!(serde_json::to_string(&KeyframePosition::clamped(35)).unwrap(), "35");
    }
}
