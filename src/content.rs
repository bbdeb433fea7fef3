use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::category::ContentCategory;

/// Version tag folded into every content hash. Bump when an artifact's
/// serialized shape changes, so old and new hashes never silently collide.
pub const CONTENT_HASH_VERSION: u32 = 1;

/// One cell of a generated map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Floor,
    Wall,
    Door,
    Water,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Door)
    }
}

/// A generated map: a row-major grid of tiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapArtifact {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl MapArtifact {
    /// Build a map filled with a single tile kind.
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(y * self.width + x).copied()
    }

    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementArtifact {
    pub name: String,
    pub population: u32,
    /// Economic health (0.0–1.0).
    pub prosperity: f64,
    pub buildings: Vec<String>,
}

/// Standing toward another faction, -1.0 (open war) to 1.0 (close allies).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactionRelation {
    pub other: String,
    pub standing: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactionArtifact {
    pub name: String,
    pub members: u32,
    pub relations: Vec<FactionRelation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestStep {
    pub index: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestArtifact {
    pub title: String,
    pub steps: Vec<QuestStep>,
    pub reward_tier: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedItem {
    pub name: String,
    pub rarity: Rarity,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemArtifact {
    pub items: Vec<GeneratedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterArtifact {
    pub name: String,
    pub level: u8,
    pub role: String,
}

/// Any artifact a generator can produce, tagged by category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedContent {
    Map(MapArtifact),
    Settlement(SettlementArtifact),
    Faction(FactionArtifact),
    Quest(QuestArtifact),
    Item(ItemArtifact),
    Character(CharacterArtifact),
}

impl GeneratedContent {
    pub fn category(&self) -> ContentCategory {
        match self {
            GeneratedContent::Map(_) => ContentCategory::Map,
            GeneratedContent::Settlement(_) => ContentCategory::Settlement,
            GeneratedContent::Faction(_) => ContentCategory::Faction,
            GeneratedContent::Quest(_) => ContentCategory::Quest,
            GeneratedContent::Item(_) => ContentCategory::Item,
            GeneratedContent::Character(_) => ContentCategory::Character,
        }
    }

    /// Hash of the canonical serialized form, used for variety tracking.
    /// Hashes over the versioned serde representation, never display
    /// formatting, so formatting churn cannot change a hash.
    pub fn content_hash(&self) -> u64 {
        // Serialization of these plain data types cannot fail.
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = std::hash::DefaultHasher::new();
        CONTENT_HASH_VERSION.hash(&mut hasher);
        canonical.hash(&mut hasher);
        hasher.finish()
    }
}
