use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::category::ContentCategory;
use crate::error::GenError;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 20;
pub const MIN_PLAYER_LEVEL: u8 = 1;
pub const MAX_PLAYER_LEVEL: u8 = 20;

/// Default per-call deadline, matching the quality engine's generation-time
/// threshold.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Read-only view of the live game world threaded through generation calls.
/// The core never mutates it and never retains it past the call.
pub trait WorldView: Send + Sync {
    fn average_party_level(&self) -> u32;
    fn region_count(&self) -> usize;
}

/// Constraints for map generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapConstraints {
    /// Grid width in tiles.
    pub width: usize,
    /// Grid height in tiles.
    pub height: usize,
    /// Target fraction of walkable tiles (0.0–1.0).
    pub density: f64,
    /// Target fraction of water tiles (0.0–1.0).
    pub water_fraction: f64,
    /// Terrain roughness (0.0–1.0).
    pub roughness: f64,
}

impl Default for MapConstraints {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            density: 0.45,
            water_fraction: 0.1,
            roughness: 0.5,
        }
    }
}

/// Constraints for settlement placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementConstraints {
    pub count: u32,
    pub min_population: u32,
    pub max_population: u32,
}

impl Default for SettlementConstraints {
    fn default() -> Self {
        Self {
            count: 3,
            min_population: 50,
            max_population: 2000,
        }
    }
}

/// Constraints for faction relationship tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactionConstraints {
    pub count: u32,
    /// Upper bound on hostile relations per faction.
    pub max_rivalries: u32,
}

impl Default for FactionConstraints {
    fn default() -> Self {
        Self {
            count: 4,
            max_rivalries: 2,
        }
    }
}

/// Constraints for quest generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestConstraints {
    pub min_steps: u32,
    pub max_steps: u32,
    /// Optional theme hint passed through to the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Default for QuestConstraints {
    fn default() -> Self {
        Self {
            min_steps: 2,
            max_steps: 6,
            theme: None,
        }
    }
}

/// Constraints for item generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemConstraints {
    pub count: u32,
    /// Bias toward rarer drops (0.0–1.0).
    pub rarity_bias: f64,
}

impl Default for ItemConstraints {
    fn default() -> Self {
        Self {
            count: 8,
            rarity_bias: 0.2,
        }
    }
}

/// Constraints for character generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterConstraints {
    pub count: u32,
}

impl Default for CharacterConstraints {
    fn default() -> Self {
        Self { count: 1 }
    }
}

/// Per-category constraint block. One statically typed variant per content
/// category; dispatch on it is always an exhaustive match, so a "wrong type
/// in constraints" failure cannot be expressed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CategoryConstraints {
    Map(MapConstraints),
    Settlement(SettlementConstraints),
    Faction(FactionConstraints),
    Quest(QuestConstraints),
    Item(ItemConstraints),
    Character(CharacterConstraints),
}

impl CategoryConstraints {
    pub fn category(&self) -> ContentCategory {
        match self {
            CategoryConstraints::Map(_) => ContentCategory::Map,
            CategoryConstraints::Settlement(_) => ContentCategory::Settlement,
            CategoryConstraints::Faction(_) => ContentCategory::Faction,
            CategoryConstraints::Quest(_) => ContentCategory::Quest,
            CategoryConstraints::Item(_) => ContentCategory::Item,
            CategoryConstraints::Character(_) => ContentCategory::Character,
        }
    }

    fn range_errors(&self, errors: &mut Vec<String>) {
        fn check_unit(errors: &mut Vec<String>, field: &str, value: f64) {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{field} must be within [0.0, 1.0], got {value}"));
            }
        }

        match self {
            CategoryConstraints::Map(c) => {
                if c.width == 0 || c.height == 0 {
                    errors.push(format!(
                        "map dimensions must be non-zero, got {}x{}",
                        c.width, c.height
                    ));
                }
                check_unit(errors, "density", c.density);
                check_unit(errors, "water_fraction", c.water_fraction);
                check_unit(errors, "roughness", c.roughness);
            }
            CategoryConstraints::Settlement(c) => {
                if c.count == 0 {
                    errors.push("settlement count must be at least 1".to_string());
                }
                if c.min_population > c.max_population {
                    errors.push(format!(
                        "settlement population range inverted: {} > {}",
                        c.min_population, c.max_population
                    ));
                }
            }
            CategoryConstraints::Faction(c) => {
                if c.count == 0 {
                    errors.push("faction count must be at least 1".to_string());
                }
            }
            CategoryConstraints::Quest(c) => {
                if c.min_steps == 0 {
                    errors.push("quest must have at least one step".to_string());
                }
                if c.min_steps > c.max_steps {
                    errors.push(format!(
                        "quest step range inverted: {} > {}",
                        c.min_steps, c.max_steps
                    ));
                }
            }
            CategoryConstraints::Item(c) => {
                if c.count == 0 {
                    errors.push("item count must be at least 1".to_string());
                }
                check_unit(errors, "rarity_bias", c.rarity_bias);
            }
            CategoryConstraints::Character(c) => {
                if c.count == 0 {
                    errors.push("character count must be at least 1".to_string());
                }
            }
        }
    }
}

/// One generation request. Immutable once built; the core never mutates it.
#[derive(Clone)]
pub struct GenerationParams {
    /// Caller-requested seed. `0` is the sentinel for "no specific seed";
    /// the session base seed alone drives determinism in that case.
    pub seed: i64,
    /// Difficulty rating, 1–20.
    pub difficulty: u8,
    /// Average player level the content targets, 1–20.
    pub player_level: u8,
    /// Read-only world reference, if the generator wants live-world context.
    pub world: Option<Arc<dyn WorldView>>,
    /// Per-call deadline, checked at call boundaries only.
    pub timeout: Duration,
    /// Typed per-category constraint block.
    pub constraints: CategoryConstraints,
}

/// Serialized shape folded into parameter-seed derivation. Excludes the seed
/// itself (it is the other hash input) and the world reference (external
/// mutable state never participates in determinism).
#[derive(Serialize)]
struct ParamsFingerprint<'a> {
    difficulty: u8,
    player_level: u8,
    timeout_ms: u128,
    constraints: &'a CategoryConstraints,
}

impl GenerationParams {
    pub fn new(seed: i64, constraints: CategoryConstraints) -> Self {
        Self {
            seed,
            difficulty: 10,
            player_level: 1,
            world: None,
            timeout: DEFAULT_TIMEOUT,
            constraints,
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_player_level(mut self, player_level: u8) -> Self {
        self.player_level = player_level;
        self
    }

    pub fn with_world(mut self, world: Arc<dyn WorldView>) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn category(&self) -> ContentCategory {
        self.constraints.category()
    }

    /// All range violations in this parameter block, in field order.
    pub fn range_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            errors.push(format!(
                "difficulty must be within [{MIN_DIFFICULTY}, {MAX_DIFFICULTY}], got {}",
                self.difficulty
            ));
        }
        if !(MIN_PLAYER_LEVEL..=MAX_PLAYER_LEVEL).contains(&self.player_level) {
            errors.push(format!(
                "player level must be within [{MIN_PLAYER_LEVEL}, {MAX_PLAYER_LEVEL}], got {}",
                self.player_level
            ));
        }
        self.constraints.range_errors(&mut errors);
        errors
    }

    /// Reject malformed parameters before any generation work starts.
    pub fn validate(&self) -> Result<(), GenError> {
        let errors = self.range_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(GenError::invalid_params(errors.join("; ")))
        }
    }

    /// Stable serialization of the block for seed derivation. Field order is
    /// declaration order, so the output only changes when a field changes.
    pub fn fingerprint(&self) -> String {
        let fp = ParamsFingerprint {
            difficulty: self.difficulty,
            player_level: self.player_level,
            timeout_ms: self.timeout.as_millis(),
            constraints: &self.constraints,
        };
        serde_json::to_string(&fp).unwrap_or_default()
    }
}

impl fmt::Debug for GenerationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationParams")
            .field("seed", &self.seed)
            .field("difficulty", &self.difficulty)
            .field("player_level", &self.player_level)
            .field("has_world", &self.world.is_some())
            .field("timeout", &self.timeout)
            .field("constraints", &self.constraints)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        for constraints in [
            CategoryConstraints::Map(MapConstraints::default()),
            CategoryConstraints::Settlement(SettlementConstraints::default()),
            CategoryConstraints::Faction(FactionConstraints::default()),
            CategoryConstraints::Quest(QuestConstraints::default()),
            CategoryConstraints::Item(ItemConstraints::default()),
            CategoryConstraints::Character(CharacterConstraints::default()),
        ] {
            let params = GenerationParams::new(42, constraints);
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn difficulty_out_of_range_rejected() {
        let params = GenerationParams::new(1, CategoryConstraints::Map(MapConstraints::default()))
            .with_difficulty(0);
        assert!(params.validate().is_err());

        let params = GenerationParams::new(1, CategoryConstraints::Map(MapConstraints::default()))
            .with_difficulty(21);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, GenError::InvalidParams { .. }));
    }

    #[test]
    fn map_density_out_of_range_rejected() {
        let params = GenerationParams::new(
            1,
            CategoryConstraints::Map(MapConstraints {
                density: 1.5,
                ..MapConstraints::default()
            }),
        );
        let errors = params.range_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("density"));
    }

    #[test]
    fn zero_map_dimensions_rejected() {
        let params = GenerationParams::new(
            1,
            CategoryConstraints::Map(MapConstraints {
                width: 0,
                ..MapConstraints::default()
            }),
        );
        assert!(params.validate().is_err());
    }

    #[test]
    fn inverted_quest_steps_rejected() {
        let params = GenerationParams::new(
            1,
            CategoryConstraints::Quest(QuestConstraints {
                min_steps: 5,
                max_steps: 2,
                theme: None,
            }),
        );
        assert!(params.validate().is_err());
    }

    #[test]
    fn constraints_category_matches_variant() {
        assert_eq!(
            CategoryConstraints::Quest(QuestConstraints::default()).category(),
            ContentCategory::Quest
        );
        assert_eq!(
            CategoryConstraints::Item(ItemConstraints::default()).category(),
            ContentCategory::Item
        );
    }

    #[test]
    fn fingerprint_stable_and_field_sensitive() {
        let base = GenerationParams::new(7, CategoryConstraints::Map(MapConstraints::default()));
        let same = GenerationParams::new(7, CategoryConstraints::Map(MapConstraints::default()));
        assert_eq!(base.fingerprint(), same.fingerprint());

        let harder = base.clone().with_difficulty(15);
        assert_ne!(base.fingerprint(), harder.fingerprint());
    }

    #[test]
    fn world_reference_is_read_only_shared_state() {
        struct StubWorld;
        impl WorldView for StubWorld {
            fn average_party_level(&self) -> u32 {
                7
            }
            fn region_count(&self) -> usize {
                3
            }
        }

        let params =
            GenerationParams::new(1, CategoryConstraints::Map(MapConstraints::default()))
                .with_world(Arc::new(StubWorld));
        let world = params.world.as_ref().unwrap();
        assert_eq!(world.average_party_level(), 7);
        assert_eq!(world.region_count(), 3);
        // The world reference never participates in the fingerprint.
        let bare = GenerationParams::new(1, CategoryConstraints::Map(MapConstraints::default()));
        assert_eq!(params.fingerprint(), bare.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_seed() {
        let a = GenerationParams::new(1, CategoryConstraints::Map(MapConstraints::default()));
        let b = GenerationParams::new(2, CategoryConstraints::Map(MapConstraints::default()));
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
