//! Query generations and the staleness guard

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one logical query lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any query has started
    pub const INITIAL: Generation = Generation(0);

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen {}", self.0)
    }
}

/// Hands out generations and tells whether one is still current
///
/// Starting a generation invalidates every earlier one. Async responses
/// check `is_current` before touching shared state.
#[derive(Debug, Default)]
pub struct StalenessGuard {
    current: AtomicU64,
}

impl StalenessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating all earlier ones
    pub fn begin_generation(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.load(Ordering::SeqCst) == generation.0
    }

    pub fn current(&self) -> Generation {
        Generation(self.current.load(Ordering::SeqCst))
    }
}
