use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::category::ContentCategory;
use crate::params::GenerationParams;
use crate::seed::{SeedManager, create_sub_rng};

/// Per-call generation scope: one dedicated primary stream plus lazily
/// forked, named phase sub-streams. Created at the start of a generation
/// call and dropped at return; never persisted.
///
/// The bundled seed manager reference lets a generator derive further named
/// seeds without threading the manager through its own signature.
pub struct GenerationContext {
    primary: SmallRng,
    category: ContentCategory,
    label: String,
    phases: HashMap<String, SmallRng>,
    seeds: Arc<SeedManager>,
}

impl GenerationContext {
    pub fn new(
        seeds: Arc<SeedManager>,
        category: ContentCategory,
        label: &str,
        params: &GenerationParams,
    ) -> Self {
        let primary = seeds.create_rng(category, label, params);
        Self {
            primary,
            category,
            label: label.to_string(),
            phases: HashMap::new(),
            seeds,
        }
    }

    pub fn category(&self) -> ContentCategory {
        self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Direct access to the primary stream.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.primary
    }

    /// Memoized context seed for a further named derivation under this
    /// context's category.
    pub fn derive_seed(&self, name: &str) -> i64 {
        self.seeds.derive_context_seed(self.category, name)
    }

    /// Lazily create and memoize one child stream per phase label. Repeated
    /// calls with the same label return the same stream, continuing its
    /// prior draw sequence.
    pub fn sub_rng(&mut self, phase: &str) -> &mut SmallRng {
        match self.phases.entry(phase.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(create_sub_rng(&mut self.primary, phase)),
        }
    }

    /// One die roll, 1..=sides. Zero sides rolls zero.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.primary.random_range(1..=sides)
    }

    pub fn roll_dice(&mut self, count: u32, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.roll_die(sides)).collect()
    }

    pub fn roll_dice_sum(&mut self, count: u32, sides: u32) -> u32 {
        (0..count).map(|_| self.roll_die(sides)).sum()
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.primary.random_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform float in [0.0, 1.0).
    pub fn random_float(&mut self) -> f64 {
        self.primary.random::<f64>()
    }

    /// Uniform float in [min, max). Returns `min` when the range is empty.
    pub fn random_float_range(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        min + self.primary.random::<f64>() * (max - min)
    }

    /// Uniform integer in [min, max], inclusive. Returns `min` without
    /// consuming randomness when the range is empty.
    pub fn random_int_range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.primary.random_range(min..=max)
    }

    /// Uniform pick from an ordered sequence. Empty input picks nothing.
    pub fn random_choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.primary.random_range(0..items.len());
        items.get(index)
    }

    /// Pick with probability weight[i] / Σweights. Negative weights count as
    /// zero. All-zero weights fall back to a uniform pick; empty or
    /// length-mismatched inputs pick nothing.
    pub fn weighted_choice<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> Option<&'a T> {
        if items.is_empty() || items.len() != weights.len() {
            return None;
        }
        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 {
            return self.random_choice(items);
        }
        let roll = self.primary.random::<f64>() * total;
        let mut cumulative = 0.0;
        for (item, &weight) in items.iter().zip(weights) {
            cumulative += weight.max(0.0);
            if roll < cumulative {
                return Some(item);
            }
        }
        items.last()
    }
}
