//! Paging metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for page requests handled by a controller
#[derive(Debug, Default)]
pub struct Metrics {
    pages_requested: AtomicU64,
    pages_loaded: AtomicU64,
    pages_failed: AtomicU64,
    items_rendered: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_requested(&self) {
        self.pages_requested.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "pages_requested", "Metric incremented");
    }

    pub fn page_loaded(&self, items: usize) {
        self.pages_loaded.fetch_add(1, Ordering::Relaxed);
        self.items_rendered.fetch_add(items as u64, Ordering::Relaxed);
        tracing::debug!(counter = "pages_loaded", items, "Metric incremented");
    }

    pub fn page_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "pages_failed", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_requested: self.pages_requested.load(Ordering::Relaxed),
            pages_loaded: self.pages_loaded.load(Ordering::Relaxed),
            pages_failed: self.pages_failed.load(Ordering::Relaxed),
            items_rendered: self.items_rendered.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub pages_requested: u64,
    pub pages_loaded: u64,
    pub pages_failed: u64,
    pub items_rendered: u64,
}
