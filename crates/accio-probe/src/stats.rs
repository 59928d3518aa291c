//! Running probe counters shared by every task in a search session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

/// Which counter a completed single probe lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found,
    NotFound,
    Error,
}

/// Point-in-time copy of the session counters.
///
/// `end_time` is the moment the snapshot was taken, not the moment the last
/// probe finished. Probes still in flight when the snapshot is taken are not
/// reflected in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeStats {
    pub total: u64,
    pub found: u64,
    pub not_found: u64,
    pub errors: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ProbeStats {
    #[must_use]
    pub fn elapsed(&self) -> chrono::TimeDelta {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    found: u64,
    not_found: u64,
    errors: u64,
}

/// Per-session statistics, shared across probe tasks behind an `Arc`.
#[derive(Debug)]
pub struct StatsRecorder {
    start_time: DateTime<Utc>,
    counters: Mutex<Counters>,
}

impl Default for StatsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_time: Utc::now(),
            counters: Mutex::new(Counters::default()),
        }
    }

    /// Count one completed single probe.
    pub async fn record(&self, outcome: ProbeOutcome) {
        let mut counters = self.counters.lock().await;
        counters.total += 1;
        match outcome {
            ProbeOutcome::Found => counters.found += 1,
            ProbeOutcome::NotFound => counters.not_found += 1,
            ProbeOutcome::Error => counters.errors += 1,
        }
    }

    /// Copy the counters, stamping `end_time` with the current time.
    ///
    /// Reading does not mutate the recorder.
    pub async fn snapshot(&self) -> ProbeStats {
        let counters = self.counters.lock().await;
        ProbeStats {
            total: counters.total,
            found: counters.found,
            not_found: counters.not_found,
            errors: counters.errors,
            start_time: self.start_time,
            end_time: Utc::now(),
        }
    }
}
