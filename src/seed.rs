use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::category::ContentCategory;
use crate::error::GenError;
use crate::params::GenerationParams;

/// Mix seed components through the std hasher. `DefaultHasher::new()` is
/// keyed with fixed constants, so the result is stable across processes.
fn mix_seed(base: i64, category: ContentCategory, name: &str) -> i64 {
    let mut hasher = std::hash::DefaultHasher::new();
    base.hash(&mut hasher);
    category.as_str().hash(&mut hasher);
    name.hash(&mut hasher);
    hasher.finish() as i64
}

/// Derive a child stream from the parent's current state plus a label.
/// Advances the parent by exactly one draw; children forked under different
/// labels from the same parent state diverge immediately.
pub fn create_sub_rng(parent: &mut SmallRng, label: &str) -> SmallRng {
    let fork = parent.next_u64();
    let mut hasher = std::hash::DefaultHasher::new();
    fork.hash(&mut hasher);
    label.hash(&mut hasher);
    SmallRng::seed_from_u64(hasher.finish())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedEntry {
    pub category: ContentCategory,
    pub name: String,
    pub value: i64,
}

/// Durable snapshot of a seed manager: the base seed plus every context seed
/// derived so far, ordered by (category, name). Round-trips losslessly, so a
/// restored session derives bit-identical sub-seeds to the original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedSnapshot {
    pub base_seed: i64,
    pub seeds: Vec<SeedEntry>,
}

struct SeedState {
    base_seed: i64,
    context_seeds: HashMap<(ContentCategory, String), i64>,
}

/// Converts one base seed into arbitrarily many deterministic, independent
/// sub-seeds keyed by (category, name). First-use derivations are memoized
/// under the write lock, so a key's value never changes for the lifetime of
/// the session — or, via snapshots, the lifetime of the save.
pub struct SeedManager {
    inner: RwLock<SeedState>,
}

impl SeedManager {
    /// Create a manager from a base seed. A zero seed is replaced with a
    /// time-derived value, sacrificing reproducibility for that run only.
    pub fn new(base_seed: i64) -> Self {
        let base_seed = if base_seed == 0 {
            let fallback = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as i64)
                .unwrap_or(1);
            tracing::warn!(
                base_seed = fallback,
                "zero base seed replaced with time-derived value; run is not reproducible"
            );
            fallback
        } else {
            base_seed
        };
        Self {
            inner: RwLock::new(SeedState {
                base_seed,
                context_seeds: HashMap::new(),
            }),
        }
    }

    pub fn base_seed(&self) -> i64 {
        self.inner.read().base_seed
    }

    /// Number of context seeds derived so far.
    pub fn derived_count(&self) -> usize {
        self.inner.read().context_seeds.len()
    }

    /// Whether a context seed for this key is already memoized.
    pub fn is_derived(&self, category: ContentCategory, name: &str) -> bool {
        self.inner
            .read()
            .context_seeds
            .contains_key(&(category, name.to_string()))
    }

    /// Deterministic sub-seed for a (category, name) key. The first call
    /// computes and memoizes; later calls return the stored value unchanged,
    /// even across save/load. Computation and insertion happen in one
    /// critical section, so concurrent first-derivations of the same key
    /// observe a single winner.
    pub fn derive_context_seed(&self, category: ContentCategory, name: &str) -> i64 {
        let mut state = self.inner.write();
        if let Some(&value) = state.context_seeds.get(&(category, name.to_string())) {
            return value;
        }
        let value = mix_seed(state.base_seed, category, name);
        state.context_seeds.insert((category, name.to_string()), value);
        value
    }

    /// Pure derivation from a base seed plus the stable serialization of the
    /// parameter block. Identical inputs always agree; any field change in
    /// the block alters the result.
    pub fn derive_parameter_seed(base_seed: i64, params: &GenerationParams) -> i64 {
        let mut hasher = std::hash::DefaultHasher::new();
        base_seed.hash(&mut hasher);
        params.fingerprint().hash(&mut hasher);
        hasher.finish() as i64
    }

    /// Compose both derivations into a ready stream: the memoized context
    /// seed for (category, name) folded with the parameter block and the
    /// caller's requested seed.
    pub fn create_rng(
        &self,
        category: ContentCategory,
        name: &str,
        params: &GenerationParams,
    ) -> SmallRng {
        let context_seed = self.derive_context_seed(category, name);
        let param_seed = Self::derive_parameter_seed(params.seed, params);
        let mut hasher = std::hash::DefaultHasher::new();
        context_seed.hash(&mut hasher);
        param_seed.hash(&mut hasher);
        SmallRng::seed_from_u64(hasher.finish())
    }

    /// Snapshot for save-game persistence. Entries are sorted by
    /// (category, name) so output is stable across runs.
    pub fn snapshot(&self) -> SeedSnapshot {
        let state = self.inner.read();
        let mut seeds: Vec<SeedEntry> = state
            .context_seeds
            .iter()
            .map(|((category, name), &value)| SeedEntry {
                category: *category,
                name: name.clone(),
                value,
            })
            .collect();
        seeds.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
        SeedSnapshot {
            base_seed: state.base_seed,
            seeds,
        }
    }

    /// Restore a manager from a snapshot. Memoized values are adopted
    /// verbatim — a loaded save never silently re-derives, even if the
    /// derivation algorithm has changed since the save was written.
    pub fn restore(snapshot: SeedSnapshot) -> Self {
        let context_seeds = snapshot
            .seeds
            .into_iter()
            .map(|entry| ((entry.category, entry.name), entry.value))
            .collect();
        Self {
            inner: RwLock::new(SeedState {
                base_seed: snapshot.base_seed,
                context_seeds,
            }),
        }
    }

    pub fn snapshot_json(&self) -> Result<String, GenError> {
        serde_json::to_string(&self.snapshot()).map_err(|e| GenError::Snapshot(e.to_string()))
    }

    pub fn restore_json(json: &str) -> Result<Self, GenError> {
        let snapshot: SeedSnapshot =
            serde_json::from_str(json).map_err(|e| GenError::Snapshot(e.to_string()))?;
        Ok(Self::restore(snapshot))
    }
}
