/// Whole seconds since the UNIX epoch, used to stamp snapshots and pace
/// autosaves. A clock before the epoch reads as 0.
#[cfg(not(target_arch = "wasm32"))]
pub fn timestamp_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Whole seconds since the UNIX epoch, from the page's performance clock
#[cfg(target_arch = "wasm32")]
pub fn timestamp_secs() -> u64 {
    let millis = web_sys::window()
        .and_then(|window| window.performance())
        .map_or(0.0, |perf| perf.time_origin() + perf.now());
    (millis / 1000.0) as u64
}
