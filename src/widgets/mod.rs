mod keyframe_toggle;
mod property_row;

pub use keyframe_toggle::KeyframeToggle;
pub use property_row::{property_row, value_editor};
