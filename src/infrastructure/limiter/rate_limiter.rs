use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

/// Counter for one client inside one fixed window.
#[derive(Debug)]
struct FixedWindow {
    started_at: Instant,
    count: u64,
}

impl FixedWindow {
    fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            count: 0,
        }
    }

    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.started_at) >= window
    }

    /// Counts a hit if the window still has room. A window that has run its
    /// full length is replaced by a fresh one starting at `now`.
    fn hit(&mut self, now: Instant, window: Duration, limit: u64) -> RateDecision {
        if self.is_expired(now, window) {
            self.started_at = now;
            self.count = 0;
        }

        let allowed = self.count < limit;
        if allowed {
            self.count += 1;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        RateDecision {
            allowed,
            limit,
            remaining: limit.saturating_sub(self.count),
            reset_after: window.saturating_sub(elapsed),
        }
    }
}

/// Outcome of one limiter check, with what the rate-limit headers need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u64,
    pub remaining: u64,
    pub reset_after: Duration,
}

impl RateDecision {
    /// Whole seconds until the window rolls over, never zero.
    pub fn reset_after_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 { secs + 1 } else { secs.max(1) }
    }
}

type Key = String;

/// Fixed-window limiter keyed by client address. Cheap to clone; clones
/// share the same counters.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    map: Arc<DashMap<Key, Mutex<FixedWindow>>>,
    limit: u64,
    window: Duration,
}

impl FixedWindowLimiter {
    pub fn new(limit: u64, window: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            limit,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    /// The hit is taken while the shard guard is held, so eviction cannot
    /// drop the window between lookup and count.
    fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        if let Some(window) = self.map.get(key) {
            return window.lock().hit(now, self.window, self.limit);
        }

        let window = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Mutex::new(FixedWindow::new(now)));
        window.lock().hit(now, self.window, self.limit)
    }

    /// Drops counters whose window has fully elapsed. Returns how many went.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    fn evict_expired_at(&self, now: Instant) -> usize {
        let before = self.map.len();
        let window = self.window;
        self.map.retain(|_, w| !w.get_mut().is_expired(now, window));
        before.saturating_sub(self.map.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}
