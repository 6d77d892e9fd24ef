// firegate-server/src/rate_limit.rs
// ============================================================================
// Module: Firegate Rate Limiting
// Description: Fixed-window per-client request limiting.
// Purpose: Bound request volume per client with deterministic windows.
// Dependencies: crate::config, std
// ============================================================================

//! ## Overview
//! The limiter tracks one fixed window per client key. Entry tracking is
//! bounded: expired windows are pruned first, and when the table is still
//! full the oldest window is evicted. The limiter is the only shared mutable
//! state in the server and sits behind a mutex.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use crate::config::RateLimitConfig;

// ============================================================================
// SECTION: Limiter
// ============================================================================

/// One client's current fixed window.
#[derive(Debug, Clone, Copy)]
struct WindowSlot {
    /// When the window opened.
    window_start: Instant,
    /// Requests observed inside the window.
    count: u32,
}

/// Fixed-window per-client rate limiter.
pub struct FixedWindowLimiter {
    /// Requests allowed per window per client.
    max_requests: u32,
    /// Window length.
    window: Duration,
    /// Maximum number of tracked clients.
    max_entries: usize,
    /// Per-client window state.
    slots: Mutex<HashMap<IpAddr, WindowSlot>>,
}

impl FixedWindowLimiter {
    /// Creates a limiter from configuration.
    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
            max_entries: config.max_entries,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request for the client and returns whether it is allowed.
    ///
    /// The timestamp is injected so window behavior is testable without
    /// sleeping.
    pub fn allow_at(&self, client: IpAddr, now: Instant) -> bool {
        let Ok(mut slots) = self.slots.lock() else {
            // Poisoned lock: fail closed.
            return false;
        };

        if let Some(slot) = slots.get_mut(&client) {
            if now.duration_since(slot.window_start) >= self.window {
                slot.window_start = now;
                slot.count = 1;
                return true;
            }
            if slot.count >= self.max_requests {
                return false;
            }
            slot.count = slot.count.saturating_add(1);
            return true;
        }

        if slots.len() >= self.max_entries {
            prune_expired(&mut slots, now, self.window);
        }
        if slots.len() >= self.max_entries {
            evict_oldest(&mut slots);
        }
        slots.insert(client, WindowSlot {
            window_start: now,
            count: 1,
        });
        true
    }

    /// Records a request for the client at the current time.
    pub fn allow(&self, client: IpAddr) -> bool {
        self.allow_at(client, Instant::now())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Removes entries whose windows have fully elapsed.
fn prune_expired(slots: &mut HashMap<IpAddr, WindowSlot>, now: Instant, window: Duration) {
    slots.retain(|_, slot| now.duration_since(slot.window_start) < window);
}

/// Evicts the entry with the oldest window start.
fn evict_oldest(slots: &mut HashMap<IpAddr, WindowSlot>) {
    let oldest = slots
        .iter()
        .min_by_key(|(_, slot)| slot.window_start)
        .map(|(client, _)| *client);
    if let Some(client) = oldest {
        slots.remove(&client);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]

    use std::net::IpAddr;
    use std::net::Ipv4Addr;
    use std::time::Duration;
    use std::time::Instant;

    use super::FixedWindowLimiter;
    use crate::config::RateLimitConfig;

    /// Builds a limiter allowing three requests per minute.
    fn limiter() -> FixedWindowLimiter {
        FixedWindowLimiter::from_config(&RateLimitConfig {
            max_requests: 3,
            window_secs: 60,
            max_entries: 2,
        })
    }

    /// Fixed client address for tests.
    fn client(octet: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(127, 0, 0, octet))
    }

    #[test]
    fn allows_up_to_the_window_budget() {
        let limiter = limiter();
        let now = Instant::now();
        assert!(limiter.allow_at(client(1), now));
        assert!(limiter.allow_at(client(1), now));
        assert!(limiter.allow_at(client(1), now));
        assert!(!limiter.allow_at(client(1), now));
    }

    #[test]
    fn window_elapse_resets_the_budget() {
        let limiter = limiter();
        let now = Instant::now();
        for _ in 0 .. 3 {
            assert!(limiter.allow_at(client(1), now));
        }
        assert!(!limiter.allow_at(client(1), now));
        let later = now + Duration::from_secs(61);
        assert!(limiter.allow_at(client(1), later));
    }

    #[test]
    fn clients_are_limited_independently() {
        let limiter = limiter();
        let now = Instant::now();
        for _ in 0 .. 3 {
            assert!(limiter.allow_at(client(1), now));
        }
        assert!(!limiter.allow_at(client(1), now));
        assert!(limiter.allow_at(client(2), now));
    }

    #[test]
    fn full_table_evicts_the_oldest_window() {
        let limiter = limiter();
        let now = Instant::now();
        assert!(limiter.allow_at(client(1), now));
        assert!(limiter.allow_at(client(2), now + Duration::from_secs(1)));
        // Client 3 forces eviction of client 1, the oldest window.
        assert!(limiter.allow_at(client(3), now + Duration::from_secs(2)));
        // Client 1 starts a fresh window rather than resuming its old count.
        for _ in 0 .. 3 {
            assert!(limiter.allow_at(client(1), now + Duration::from_secs(3)));
        }
    }
}
