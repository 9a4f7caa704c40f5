//! Platform abstraction layer
//!
//! The two host services the game needs: a millisecond clock for the
//! loop driver, and a capability sniff for picking the performance
//! profile. Everything else browser-specific lives in the wasm driver.

/// Milliseconds since an arbitrary epoch.
///
/// Only differences matter; the simulation receives this through `tick`
/// and never reads time itself.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::Instant;
    // Monotonic on native; the epoch is process start.
    static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// User-agent substrings that mark a constrained host.
const MOBILE_MARKERS: [&str; 7] = [
    "Android", "webOS", "iPhone", "iPad", "iPod", "BlackBerry", "Opera Mini",
];

/// Does this user agent look like a phone/tablet browser?
pub fn user_agent_is_mobile(user_agent: &str) -> bool {
    MOBILE_MARKERS.iter().any(|m| user_agent.contains(m))
}

/// Capability sniff for the current host.
#[cfg(target_arch = "wasm32")]
pub fn is_mobile() -> bool {
    web_sys::window()
        .map(|w| w.navigator().user_agent().unwrap_or_default())
        .map(|ua| user_agent_is_mobile(&ua))
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn is_mobile() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_sniff_matches_phones_not_desktops() {
        assert!(user_agent_is_mobile(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(user_agent_is_mobile("Mozilla/5.0 (Linux; Android 14)"));
        assert!(!user_agent_is_mobile(
            "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/127.0"
        ));
    }

    #[test]
    fn native_clock_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
