//! Process-wide platform singleton.

use std::sync::OnceLock;

use crate::signature;
use crate::strategy::PlatformStrategy;

static PLATFORM: OnceLock<PlatformStrategy> = OnceLock::new();

/// Process-wide accessor for the resolved platform strategy.
pub struct Platform;

impl Platform {
    /// Strategy for the hosting runtime.
    ///
    /// Detection and construction run exactly once, on first access, even
    /// under concurrent first calls from many threads; every call afterwards
    /// returns the same instance. The strategy is never torn down or
    /// replaced for the process lifetime.
    pub fn get() -> &'static PlatformStrategy {
        PLATFORM.get_or_init(|| PlatformStrategy::from_profile(&signature::detect_profile()))
    }
}
