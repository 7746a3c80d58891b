use super::{Animation, KeyframePosition};

/// Time elapsed on the animation's own track. A playhead still inside the
/// delay window maps to the start of the track.
pub fn local_time(playhead_ms: u64, animation: &Animation) -> u64 {
    playhead_ms.saturating_sub(animation.delay)
}

/// Maps a composition playhead to a keyframe position on `animation`.
///
/// Positions before the delay window clamp to 0 and positions past the end of
/// the track clamp to 100, so authoring at the playhead always yields a valid
/// keyframe.
pub fn position_at(playhead_ms: u64, animation: &Animation) -> KeyframePosition {
    let local = local_time(playhead_ms, animation) as f64;
    // `AnimationDuration` is never zero
    let duration = animation.duration.as_millis() as f64;
    let percent = (local / duration * 100.0).round();
    KeyframePosition::clamped(percent.min(100.0) as i64)
}

/// Inverse of [`position_at`]: the playhead time at which a keyframe sits
pub fn playhead_for(position: KeyframePosition, animation: &Animation) -> u64 {
    let offset = (animation.duration.as_millis() as f64 * position.fraction()).round() as u64;
    animation.delay.saturating_add(offset)
}
