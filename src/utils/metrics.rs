//! Observability counters for command round trips.
//!
//! Uses atomic counters for thread-safe collection across concurrent
//! gateway requests. The gateway owns one instance in its shared state and
//! serves a snapshot from its status endpoint; there is no global instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::error::RconError;

/// Metrics collector for RCON command execution.
#[derive(Debug)]
pub struct Metrics {
    /// Total commands attempted
    pub commands_total: AtomicU64,
    /// Commands that returned an error
    pub commands_failed: AtomicU64,
    /// Authentication rejections from the upstream server
    pub auth_failures: AtomicU64,
    /// Commands that hit the network timeout
    pub timeouts: AtomicU64,
    /// TCP-level failures (connect, reset, closed)
    pub connection_errors: AtomicU64,
    /// Malformed frames or unexpected packet sequences
    pub protocol_errors: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            commands_total: AtomicU64::new(0),
            commands_failed: AtomicU64::new(0),
            auth_failures: AtomicU64::new(0),
            timeouts: AtomicU64::new(0),
            connection_errors: AtomicU64::new(0),
            protocol_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a command attempt.
    pub fn command_started(&self) {
        self.commands_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed command, classified by error kind.
    pub fn command_failed(&self, error: &RconError) {
        self.commands_failed.fetch_add(1, Ordering::Relaxed);
        let counter = match error {
            RconError::Connection(_) => &self.connection_errors,
            RconError::WrongPassword => &self.auth_failures,
            RconError::Timeout => &self.timeouts,
            RconError::Protocol(_) => &self.protocol_errors,
            RconError::Command(_) => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            commands_total: self.commands_total.load(Ordering::Relaxed),
            commands_failed: self.commands_failed.load(Ordering::Relaxed),
            auth_failures: self.auth_failures.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            connection_errors: self.connection_errors.load(Ordering::Relaxed),
            protocol_errors: self.protocol_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            commands_total = snapshot.commands_total,
            commands_failed = snapshot.commands_failed,
            auth_failures = snapshot.auth_failures,
            timeouts = snapshot.timeouts,
            connection_errors = snapshot.connection_errors,
            protocol_errors = snapshot.protocol_errors,
            uptime_seconds = snapshot.uptime_seconds,
            "Gateway metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub commands_total: u64,
    pub commands_failed: u64,
    pub auth_failures: u64,
    pub timeouts: u64,
    pub connection_errors: u64,
    pub protocol_errors: u64,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_classified_by_kind() {
        let metrics = Metrics::new();
        metrics.command_started();
        metrics.command_failed(&RconError::WrongPassword);
        metrics.command_started();
        metrics.command_failed(&RconError::Timeout);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.commands_total, 2);
        assert_eq!(snapshot.commands_failed, 2);
        assert_eq!(snapshot.auth_failures, 1);
        assert_eq!(snapshot.timeouts, 1);
        assert_eq!(snapshot.connection_errors, 0);
    }

    #[test]
    fn command_error_counts_only_as_failure() {
        let metrics = Metrics::new();
        metrics.command_started();
        metrics.command_failed(&RconError::Command("save failed".into()));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.commands_failed, 1);
        assert_eq!(snapshot.protocol_errors, 0);
    }
}
