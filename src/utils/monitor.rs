use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Point-in-time copy of the intake counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeStats {
    pub accepted: u64,
    pub rejected: u64,
    pub delivered: u64,
    pub delivery_failed: u64,
    pub delivery_skipped: u64,
    pub server_failures: u64,
    pub uptime_seconds: u64,
}

/// Counters for lead handling. Mail delivery failures are invisible to the
/// visitor, so this is where operators find them.
#[derive(Debug)]
pub struct IntakeMonitor {
    accepted: AtomicU64,
    rejected: AtomicU64,
    delivered: AtomicU64,
    delivery_failed: AtomicU64,
    delivery_skipped: AtomicU64,
    server_failures: AtomicU64,
    start_time: Instant,
}

impl IntakeMonitor {
    pub fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            delivery_failed: AtomicU64::new(0),
            delivery_skipped: AtomicU64::new(0),
            server_failures: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_failed(&self) {
        self.delivery_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_skipped(&self) {
        self.delivery_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_server_failure(&self) {
        self.server_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self) -> IntakeStats {
        IntakeStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            delivery_failed: self.delivery_failed.load(Ordering::Relaxed),
            delivery_skipped: self.delivery_skipped.load(Ordering::Relaxed),
            server_failures: self.server_failures.load(Ordering::Relaxed),
            uptime_seconds: self.uptime().as_secs(),
        }
    }

    pub fn log_stats(&self, phase: &str) {
        let stats = self.snapshot();
        tracing::info!(
            "📊 {} - Accepted: {}, Rejected: {}, Delivered: {}, Delivery failed: {}, Skipped: {}, Server failures: {}, Uptime: {}s",
            phase,
            stats.accepted,
            stats.rejected,
            stats.delivered,
            stats.delivery_failed,
            stats.delivery_skipped,
            stats.server_failures,
            stats.uptime_seconds
        );
    }
}

impl Default for IntakeMonitor {
    fn default() -> Self {
        Self::new()
    }
}
