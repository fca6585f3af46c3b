//! Crawl progress reporting
//!
//! Progress is purely observational: a sink receives the planned total once
//! and then one unit per listing processed. It never influences the crawl.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receiver of crawl progress
pub trait ProgressSink: Send + Sync {
    /// Called once the crawl knows how many listings it will collect
    fn begin(&self, _total: u64) {}

    /// Called once per listing appended to the result
    fn advance(&self);
}

/// Sink that discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self) {}
}

/// Sink that reports progress through `tracing`
///
/// Logs at info level every `every` listings and when the planned total is
/// reached.
#[derive(Debug)]
pub struct LogProgress {
    every: u64,
    total: AtomicU64,
    done: AtomicU64,
}

impl LogProgress {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            total: AtomicU64::new(0),
            done: AtomicU64::new(0),
        }
    }

    /// Listings reported so far
    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(20)
    }
}

impl ProgressSink for LogProgress {
    fn begin(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        tracing::info!("Scraping {} listings", total);
    }

    fn advance(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed);

        if done % self.every == 0 || done == total {
            let percentage = if total > 0 {
                (done as f64 / total as f64) * 100.0
            } else {
                100.0
            };
            tracing::info!("Progress: {}/{} listings ({:.0}%)", done, total, percentage);
        }
    }
}
