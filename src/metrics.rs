use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;

use crate::category::ContentCategory;

/// Per-category generation bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryStats {
    /// Successful generations.
    pub count: u64,
    /// Rolling average latency over successful generations, in milliseconds.
    pub avg_duration_ms: f64,
    /// Failed generations.
    pub errors: u64,
}

/// Owned copy of the full metrics state at one point in time.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub per_category: HashMap<ContentCategory, CategoryStats>,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl MetricsSnapshot {
    pub fn total_count(&self) -> u64 {
        self.per_category.values().map(|s| s.count).sum()
    }

    pub fn total_errors(&self) -> u64 {
        self.per_category.values().map(|s| s.errors).sum()
    }

    /// Mean of per-category rolling averages, in milliseconds. Zero when
    /// nothing has been recorded.
    pub fn average_duration_ms(&self) -> f64 {
        let with_data: Vec<f64> = self
            .per_category
            .values()
            .filter(|s| s.count > 0)
            .map(|s| s.avg_duration_ms)
            .collect();
        if with_data.is_empty() {
            return 0.0;
        }
        with_data.iter().sum::<f64>() / with_data.len() as f64
    }

    /// Failed generations as a fraction of all attempts.
    pub fn error_ratio(&self) -> f64 {
        let attempts = self.total_count() + self.total_errors();
        if attempts == 0 {
            return 0.0;
        }
        self.total_errors() as f64 / attempts as f64
    }

    pub fn cache_hit_ratio(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / lookups as f64
    }
}

struct MetricsState {
    per_category: HashMap<ContentCategory, CategoryStats>,
    cache_hits: u64,
    cache_misses: u64,
}

/// Generation counters under one lock. The rolling average depends on the
/// exact count each update targets, so the count increment and average
/// recompute happen in a single critical section.
pub struct GenerationMetrics {
    inner: RwLock<MetricsState>,
}

impl GenerationMetrics {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MetricsState {
                per_category: HashMap::new(),
                cache_hits: 0,
                cache_misses: 0,
            }),
        }
    }

    /// Record one generation attempt. Successes update the rolling average
    /// incrementally: `avg' = (avg * (n - 1) + sample) / n`.
    pub fn record_generation(&self, category: ContentCategory, duration: Duration, ok: bool) {
        let mut state = self.inner.write();
        let stats = state.per_category.entry(category).or_default();
        if ok {
            stats.count += 1;
            let n = stats.count as f64;
            let sample = duration.as_secs_f64() * 1000.0;
            stats.avg_duration_ms = (stats.avg_duration_ms * (n - 1.0) + sample) / n;
        } else {
            stats.errors += 1;
        }
    }

    pub fn record_cache_hit(&self) {
        self.inner.write().cache_hits += 1;
    }

    pub fn record_cache_miss(&self) {
        self.inner.write().cache_misses += 1;
    }

    pub fn category_stats(&self, category: ContentCategory) -> Option<CategoryStats> {
        self.inner.read().per_category.get(&category).copied()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.inner.read();
        MetricsSnapshot {
            per_category: state.per_category.clone(),
            cache_hits: state.cache_hits,
            cache_misses: state.cache_misses,
        }
    }
}

impl Default for GenerationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
