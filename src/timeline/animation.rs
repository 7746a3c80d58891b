use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

use super::Phase;
use crate::error::{StoreError, StoreResult};
use crate::ids::{AnimationId, ElementId};

/// Length of an animation track in milliseconds. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct AnimationDuration(NonZeroU64);

impl AnimationDuration {
    pub const ONE_SECOND: AnimationDuration = match NonZeroU64::new(1000) {
        Some(ms) => AnimationDuration(ms),
        None => panic!("one second is non-zero"),
    };

    pub fn new(ms: u64) -> StoreResult<Self> {
        NonZeroU64::new(ms)
            .map(Self)
            .ok_or(StoreError::InvalidDuration(ms))
    }

    pub const fn as_millis(&self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for AnimationDuration {
    type Error = StoreError;

    fn try_from(ms: u64) -> Result<Self, Self::Error> {
        Self::new(ms)
    }
}

impl From<AnimationDuration> for u64 {
    fn from(duration: AnimationDuration) -> Self {
        duration.as_millis()
    }
}

/// A per-(element, phase) timeline track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub id: AnimationId,
    pub element_id: ElementId,
    pub phase: Phase,
    pub duration: AnimationDuration,
    /// Offset from the start of the composition timeline, in milliseconds
    pub delay: u64,
}

impl Animation {
    pub fn new(element_id: ElementId, phase: Phase, duration: AnimationDuration, delay: u64) -> Self {
        Self {
            id: AnimationId::new(),
            element_id,
            phase,
            duration,
            delay,
        }
    }

    /// Playhead time at which the track ends
    pub fn end_ms(&self) -> u64 {
        self.delay.saturating_add(self.duration.as_millis())
    }
}

/// Partial update for an [`Animation`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationPatch {
    pub duration: Option<AnimationDuration>,
    pub delay: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_is_rejected() {
        assert_eq!(AnimationDuration::new(0), Err(StoreError::InvalidDuration(0)));
        assert_eq!(AnimationDuration::new(250).unwrap().as_millis(), 250);
    }

    #[test]
    fn test_zero_duration_is_rejected_when_deserializing() {
        let result: Result<AnimationDuration, _> = serde_json::from_str("0");
        assert!(result.is_err());
        let duration: AnimationDuration = serde_json::from_str("1500").unwrap();
        assert_eq!(duration.as_millis(), 1500);
    }

    #[test]
    fn test_end_saturates_for_huge_delay() {
        let json = format!(
            r#"{{"id":"{}","element_id":"{}","phase":"in","duration":1000,"delay":{}}}"#,
            AnimationId::new(),
            ElementId::new(),
            u64::MAX
        );
        let animation: Animation = serde_json::from_str(&json).unwrap();
        assert_eq!(animation.end_ms(), u64::MAX);
    }
}
