//! Process-wide rendering switches.
//!
//! One switch exists: SSR behaviour. In server-side or otherwise DOM-less
//! rendering contexts there is nothing to measure, so composed components
//! should skip the placeholder and render the real component immediately
//! with an unmeasured size.
//!
//! Contract: set once during application bootstrap, read many times (every
//! instance reads it on every render). It is not meant to be toggled
//! per-render.

use std::sync::atomic::{AtomicBool, Ordering};

static SSR_BEHAVIOUR: AtomicBool = AtomicBool::new(false);

/// Force `disable_placeholder` on for every composed instance in this
/// process.
pub fn enable_ssr_behaviour(enabled: bool) {
    SSR_BEHAVIOUR.store(enabled, Ordering::Relaxed);
}

pub fn ssr_behaviour_enabled() -> bool {
    SSR_BEHAVIOUR.load(Ordering::Relaxed)
}
