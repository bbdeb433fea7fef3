mod map;

pub use map::check_connectivity;

use crate::content::{
    CharacterArtifact, FactionArtifact, GeneratedContent, ItemArtifact, QuestArtifact,
    SettlementArtifact,
};
use crate::params::{GenerationParams, MAX_PLAYER_LEVEL, MIN_PLAYER_LEVEL};

/// Outcome of a structural check. `valid` is false exactly when `errors` is
/// non-empty; warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Concatenate both finding lists and AND the validity flags.
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural-correctness checker per artifact kind. Strict mode enables the
/// map connectivity flood-fill.
pub struct ContentValidator {
    strict: bool,
}

impl ContentValidator {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Range checks on a parameter block, reported as findings rather than
    /// errors. Bounds: difficulty and player level in [1, 20]; map density,
    /// water fraction, and roughness in [0.0, 1.0]; non-empty ranges.
    pub fn validate_params(&self, params: &GenerationParams) -> ValidationResult {
        let mut result = ValidationResult::new();
        for error in params.range_errors() {
            result.add_error(error);
        }
        result
    }

    pub fn validate(&self, content: &GeneratedContent) -> ValidationResult {
        match content {
            GeneratedContent::Map(map) => self.validate_map(map),
            GeneratedContent::Settlement(settlement) => self.validate_settlement(settlement),
            GeneratedContent::Faction(faction) => self.validate_faction(faction),
            GeneratedContent::Quest(quest) => self.validate_quest(quest),
            GeneratedContent::Item(items) => self.validate_items(items),
            GeneratedContent::Character(character) => self.validate_character(character),
        }
    }

    fn validate_map(&self, map: &crate::content::MapArtifact) -> ValidationResult {
        let mut result = ValidationResult::new();
        if map.width == 0 || map.height == 0 {
            result.add_error(format!(
                "map dimensions must be non-zero, got {}x{}",
                map.width, map.height
            ));
            return result;
        }
        if map.tiles.len() != map.width * map.height {
            result.add_error(format!(
                "tile buffer length {} does not match {}x{} grid",
                map.tiles.len(),
                map.width,
                map.height
            ));
            return result;
        }
        if self.strict {
            check_connectivity(map, &mut result);
        } else if map.walkable_count() == 0 {
            result.add_error("map has no walkable tiles".to_string());
        }
        result
    }

    fn validate_settlement(&self, settlement: &SettlementArtifact) -> ValidationResult {
        let mut result = ValidationResult::new();
        if settlement.name.trim().is_empty() {
            result.add_error("settlement name is empty");
        }
        if settlement.population == 0 {
            result.add_error("settlement population is zero");
        }
        if !(0.0..=1.0).contains(&settlement.prosperity) {
            result.add_error(format!(
                "settlement prosperity must be within [0.0, 1.0], got {}",
                settlement.prosperity
            ));
        }
        if settlement.buildings.is_empty() {
            result.add_warning("settlement has no buildings");
        }
        result
    }

    fn validate_faction(&self, faction: &FactionArtifact) -> ValidationResult {
        let mut result = ValidationResult::new();
        if faction.name.trim().is_empty() {
            result.add_error("faction name is empty");
        }
        if faction.members == 0 {
            result.add_warning("faction has no members");
        }
        for relation in &faction.relations {
            if !(-1.0..=1.0).contains(&relation.standing) {
                result.add_error(format!(
                    "faction standing toward {} must be within [-1.0, 1.0], got {}",
                    relation.other, relation.standing
                ));
            }
            if relation.other == faction.name {
                result.add_error(format!(
                    "faction {} has a relation to itself",
                    faction.name
                ));
            }
        }
        result
    }

    fn validate_quest(&self, quest: &QuestArtifact) -> ValidationResult {
        let mut result = ValidationResult::new();
        if quest.title.trim().is_empty() {
            result.add_error("quest title is empty");
        }
        if quest.steps.is_empty() {
            result.add_error("quest has no steps");
            return result;
        }
        for (position, step) in quest.steps.iter().enumerate() {
            if step.index as usize != position {
                result.add_error(format!(
                    "quest step at position {position} carries index {}",
                    step.index
                ));
            }
            if step.description.trim().is_empty() {
                result.add_error(format!("quest step {position} has an empty description"));
            }
        }
        result
    }

    fn validate_items(&self, items: &ItemArtifact) -> ValidationResult {
        let mut result = ValidationResult::new();
        if items.items.is_empty() {
            result.add_error("item artifact is empty");
            return result;
        }
        for item in &items.items {
            if item.name.trim().is_empty() {
                result.add_error("item name is empty");
            }
            if item.value == 0 {
                result.add_warning(format!("item {} has zero value", item.name));
            }
        }
        result
    }

    fn validate_character(&self, character: &CharacterArtifact) -> ValidationResult {
        let mut result = ValidationResult::new();
        if character.name.trim().is_empty() {
            result.add_error("character name is empty");
        }
        let level_range = MIN_PLAYER_LEVEL..=MAX_PLAYER_LEVEL;
        if !level_range.contains(&character.level) {
            result.add_error(format!(
                "character level must be within [{MIN_PLAYER_LEVEL}, {MAX_PLAYER_LEVEL}], got {}",
                character.level
            ));
        }
        if character.role.trim().is_empty() {
            result.add_warning("character has no role");
        }
        result
    }
}
