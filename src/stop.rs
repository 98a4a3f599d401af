//! Cooperative cancellation of the clique search.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cancellation token that trips when `stop()` was called on any of its clones, when its
/// deadline has passed, or when it was checked more often than its check limit allows. The search
/// checks it once per driver step and once per recursive call and returns the best cliques found
/// so far.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
    checks: Arc<AtomicUsize>,
    check_limit: Option<usize>,
}

impl StopToken {

    pub fn new() -> Self {
        StopToken::default()
    }

    /// Returns a token that trips `limit` after now.
    pub fn with_time_limit(limit: Duration) -> Self {
        StopToken {
            deadline: Some(Instant::now() + limit),
            ..StopToken::default()
        }
    }

    /// Lets the first `limit` checks pass and trips on the next one.
    pub fn with_check_limit(mut self, limit: usize) -> Self {
        self.check_limit = Some(limit);
        self
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true
        }
        if let Some(limit) = self.check_limit {
            if self.checks.fetch_add(1, Ordering::Relaxed) >= limit {
                self.flag.store(true, Ordering::Relaxed);
                return true
            }
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.flag.store(true, Ordering::Relaxed);
                true
            },
            _ => false,
        }
    }
}
