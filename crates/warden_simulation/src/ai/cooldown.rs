//! Cooldown clock: общий gate для attack и patrol-arrival

/// `now >= last_time + delay`
pub fn ready(last_time: f32, delay: f32, now: f32) -> bool {
    now >= last_time + delay
}
