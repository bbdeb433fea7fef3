use std::collections::HashMap;

use crate::category::ContentCategory;

/// Per-category multiset of content hashes. Uniqueness is the ratio of
/// distinct hashes to total observations, recomputed on every record.
#[derive(Debug, Default)]
pub struct VarietyTracker {
    per_category: HashMap<ContentCategory, CategoryVariety>,
}

#[derive(Debug, Default)]
struct CategoryVariety {
    hash_counts: HashMap<u64, u32>,
    total: u64,
    uniqueness: f64,
}

impl VarietyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hash(&mut self, category: ContentCategory, hash: u64) {
        let entry = self.per_category.entry(category).or_default();
        *entry.hash_counts.entry(hash).or_insert(0) += 1;
        entry.total += 1;
        entry.uniqueness = entry.hash_counts.len() as f64 / entry.total as f64;
    }

    pub fn uniqueness(&self, category: ContentCategory) -> Option<f64> {
        self.per_category.get(&category).map(|v| v.uniqueness)
    }

    pub fn observed(&self, category: ContentCategory) -> u64 {
        self.per_category.get(&category).map_or(0, |v| v.total)
    }

    /// Mean uniqueness across categories with observations. A fresh tracker
    /// scores 1.0: no evidence of repetition yet.
    pub fn overall_uniqueness(&self) -> f64 {
        if self.per_category.is_empty() {
            return 1.0;
        }
        let sum: f64 = self.per_category.values().map(|v| v.uniqueness).sum();
        sum / self.per_category.len() as f64
    }
}
