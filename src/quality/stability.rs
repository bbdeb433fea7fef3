use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::category::ContentCategory;

/// EWMA step for per-category error rates. One error moves the rate this
/// far toward 1.0; one success moves it the same fraction toward 0.0.
const ERROR_RATE_ALPHA: f64 = 0.1;

/// Validation failures weigh half an error: the artifact exists but is
/// structurally unsound.
const VALIDATION_ALPHA: f64 = ERROR_RATE_ALPHA / 2.0;

/// A category whose error rate crosses this after an error logs a critical
/// entry.
const CRITICAL_ERROR_RATE: f64 = 0.25;

const LATENCY_WINDOW: usize = 100;
const CRITICAL_LOG_CAP: usize = 50;

/// Per-category failure-rate tracking with success decay, a capped latency
/// window, a critical-error log, and a derived system-health scalar.
#[derive(Debug, Default)]
pub struct StabilityTracker {
    error_rates: HashMap<ContentCategory, f64>,
    latencies_ms: VecDeque<f64>,
    critical_errors: Vec<String>,
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, category: ContentCategory, duration: Duration) {
        let rate = self.error_rates.entry(category).or_insert(0.0);
        *rate *= 1.0 - ERROR_RATE_ALPHA;

        self.latencies_ms.push_back(duration.as_secs_f64() * 1000.0);
        while self.latencies_ms.len() > LATENCY_WINDOW {
            self.latencies_ms.pop_front();
        }
    }

    pub fn record_error(&mut self, category: ContentCategory, message: &str) {
        let rate = self.error_rates.entry(category).or_insert(0.0);
        *rate = *rate * (1.0 - ERROR_RATE_ALPHA) + ERROR_RATE_ALPHA;

        if *rate > CRITICAL_ERROR_RATE && self.critical_errors.len() < CRITICAL_LOG_CAP {
            let entry = format!("{category}: {message}");
            tracing::warn!(%category, error_rate = *rate, "critical stability event: {message}");
            self.critical_errors.push(entry);
        }
    }

    /// Fold in a validation outcome. Invalid artifacts nudge the category's
    /// rate like a half-weight error; valid ones decay it slightly.
    pub fn record_validation(&mut self, category: ContentCategory, valid: bool) {
        let rate = self.error_rates.entry(category).or_insert(0.0);
        if valid {
            *rate *= 1.0 - VALIDATION_ALPHA;
        } else {
            *rate = *rate * (1.0 - VALIDATION_ALPHA) + VALIDATION_ALPHA;
        }
    }

    pub fn error_rate(&self, category: ContentCategory) -> f64 {
        self.error_rates.get(&category).copied().unwrap_or(0.0)
    }

    pub fn max_error_rate(&self) -> f64 {
        self.error_rates.values().copied().fold(0.0, f64::max)
    }

    pub fn average_latency_ms(&self) -> f64 {
        if self.latencies_ms.is_empty() {
            return 0.0;
        }
        self.latencies_ms.iter().sum::<f64>() / self.latencies_ms.len() as f64
    }

    pub fn latency_samples(&self) -> usize {
        self.latencies_ms.len()
    }

    pub fn critical_errors(&self) -> &[String] {
        &self.critical_errors
    }

    /// Health scalar in [0.0, 1.0]: one minus the mean error rate, with a
    /// flat penalty per logged critical event.
    pub fn system_health(&self) -> f64 {
        let mean_rate = if self.error_rates.is_empty() {
            0.0
        } else {
            self.error_rates.values().sum::<f64>() / self.error_rates.len() as f64
        };
        let penalty = 0.05 * self.critical_errors.len() as f64;
        (1.0 - mean_rate - penalty).clamp(0.0, 1.0)
    }
}
