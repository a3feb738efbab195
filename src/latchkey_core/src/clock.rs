//! The time source injected into every component that computes expiry.

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// A shareable "now" function.
///
/// Nothing in the core reads the wall clock directly; factories and services
/// are handed one of these so expiry arithmetic stays deterministic in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Clock backed by [`Utc::now`].
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Clock frozen at `instant`.
pub fn fixed_clock(instant: DateTime<Utc>) -> Clock {
    Arc::new(move || instant)
}
