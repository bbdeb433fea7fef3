use std::fmt;

use serde::{Deserialize, Serialize};

/// One kind of generated artifact. Every generator, constraint block, and
/// quality bucket is keyed by exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Map,
    Settlement,
    Faction,
    Quest,
    Item,
    Character,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 6] = [
        ContentCategory::Map,
        ContentCategory::Settlement,
        ContentCategory::Faction,
        ContentCategory::Quest,
        ContentCategory::Item,
        ContentCategory::Character,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentCategory::Map => "map",
            ContentCategory::Settlement => "settlement",
            ContentCategory::Faction => "faction",
            ContentCategory::Quest => "quest",
            ContentCategory::Item => "item",
            ContentCategory::Character => "character",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
