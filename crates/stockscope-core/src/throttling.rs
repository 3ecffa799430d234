use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use crate::config::QuotaPolicy;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Client-side request budget.
///
/// Rejects a call up front when the local budget is spent, returning the
/// replenish interval as the suggested wait. It never sleeps or retries on the
/// caller's behalf.
#[derive(Clone)]
pub struct QuotaGuard {
    limiter: Arc<DirectRateLimiter>,
    replenish_interval: Duration,
}

impl QuotaGuard {
    pub fn new(policy: QuotaPolicy) -> Self {
        let quota = quota_from_policy(policy);
        let replenish_interval = quota.replenish_interval();
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            replenish_interval,
        }
    }

    /// Takes one unit of budget, or reports how long until one frees up.
    pub fn acquire(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|_| self.replenish_interval)
    }
}

impl std::fmt::Debug for QuotaGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaGuard")
            .field("replenish_interval", &self.replenish_interval)
            .finish_non_exhaustive()
    }
}

fn quota_from_policy(policy: QuotaPolicy) -> Quota {
    let burst = NonZeroU32::new(policy.limit).unwrap_or(NonZeroU32::MIN);

    let seconds_per_cell = (policy.window.as_secs_f64() / f64::from(burst.get())).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_minute(burst))
        .allow_burst(burst)
}
