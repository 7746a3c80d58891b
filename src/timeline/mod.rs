//! Animation tracks, keyframes, and the mapping between the composition
//! playhead and a track's local 0–100 position.

use serde::{Deserialize, Serialize};
use std::fmt;

mod animation;
mod keyframe;
mod position;

pub use animation::{Animation, AnimationDuration, AnimationPatch};
pub use keyframe::{Keyframe, KeyframePatch, KeyframePosition};
pub use position::{local_time, playhead_for, position_at};

/// Authoring stage of an element's animation lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    In,
    Loop,
    Out,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::In, Phase::Loop, Phase::Out];

    pub fn label(&self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Loop => "Loop",
            Self::Out => "Out",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Loop => write!(f, "loop"),
            Self::Out => write!(f, "out"),
        }
    }
}
