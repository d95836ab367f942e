use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::models::QuotaDecision;

// Fraction of checks that trigger a stale-record sweep
const EVICT_PROBABILITY: f64 = 0.02;

// Per-client usage record - the only mutable shared state in the system
struct QuotaRecord {
    count: u32,
    window_reset_at: Instant,
}

// Time-windowed per-client quota store. Owned by main and injected into
// the handler state, so a durable backing store can replace it without
// touching call sites. State is process-local and best-effort: it does
// not survive restarts and is not shared across instances.
pub struct QuotaStore {
    records: DashMap<String, QuotaRecord>,
    limit: u32,
    window: Duration,
}

impl QuotaStore {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            records: DashMap::new(),
            limit,
            window,
        }
    }

    // Check-and-consume: every call increments the client's count.
    // There is no separate consume step.
    pub fn check(&self, client_key: &str) -> QuotaDecision {
        let now = Instant::now();

        let mut entry = self
            .records
            .entry(client_key.to_string())
            .or_insert(QuotaRecord {
                count: 0,
                window_reset_at: now + self.window,
            });

        // Window expired..? Reset it
        if now > entry.window_reset_at {
            entry.count = 0;
            entry.window_reset_at = now + self.window;
        }

        entry.count += 1;

        let decision = QuotaDecision {
            allowed: entry.count <= self.limit,
            remaining: self.limit.saturating_sub(entry.count),
        };
        drop(entry); // release the shard before any sweep

        if rand::random::<f64>() < EVICT_PROBABILITY {
            self.evict_stale(now);
        }

        decision
    }

    // Drop records whose window expired more than one full window ago.
    // One-shot clients would otherwise accumulate forever. Best-effort:
    // quota correctness only matters inside an active window.
    fn evict_stale(&self, now: Instant) {
        self.records
            .retain(|_, record| now <= record.window_reset_at + self.window);
    }

    #[cfg(test)]
    fn record_count(&self) -> usize {
        self.records.len()
    }
}
