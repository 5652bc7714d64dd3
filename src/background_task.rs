use tokio::time::{interval, Duration};

use crate::limiter::rate_limiter::FixedWindowLimiter;

/// Periodically drops rate-limit counters whose window has elapsed so the
/// map does not grow with every address that ever submitted the form.
pub async fn start_limiter_sweep(limiter: FixedWindowLimiter) {
    let period = limiter.window().min(Duration::from_secs(60));
    let mut interval = interval(period);

    loop {
        interval.tick().await;

        let evicted = limiter.evict_expired();
        if evicted > 0 {
            tracing::debug!(
                evicted,
                remaining = limiter.tracked_clients(),
                "Evicted expired rate-limit windows"
            );
        }
    }
}
